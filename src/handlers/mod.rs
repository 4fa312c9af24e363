pub mod form;
pub mod helpers;

pub use form::{index_get, refresh_post, stylesheet_get, submit_post};
