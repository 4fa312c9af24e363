use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;

/// Request/response capability the sync client depends on.
///
/// Both methods return the raw response body; decoding the JSON envelope is
/// the caller's job so that a malformed body and a network failure surface
/// the same way.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` as-is to `url`.
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError>;

    /// GET `url` with the given query pairs appended.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, url: &str, body: String) -> Result<String, TransportError> {
        (**self).post(url, body).await
    }

    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).get(url, query).await
    }
}
