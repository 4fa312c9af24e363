// Network access for the sync client
pub mod client;
pub mod transport;

pub use client::{describe_as_curl, HttpTransport, SIMPLE_REQUEST_CONTENT_TYPE};
pub use transport::Transport;
