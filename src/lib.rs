//! Form-to-sheet sync client.
//!
//! Reads a name/role pair from a form surface, writes it to a
//! spreadsheet-backed HTTP endpoint and renders the endpoint's rows as a
//! table. The core lives in [`sync::FormSyncClient`]; it talks to the network
//! through [`api::Transport`] and to the user through [`view::View`].

pub mod api;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod routes;
pub mod sync;
pub mod templates;
pub mod utils;
pub mod view;

pub use config::AppConfig;
pub use error::{ConfigError, SyncError, TransportError, ValidationError};
pub use sync::{FetchOutcome, FormSyncClient, SubmitOutcome};
