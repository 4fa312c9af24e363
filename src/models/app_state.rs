use std::sync::Arc;

use crate::api::{HttpTransport, Transport};
use crate::config::AppConfig;
use crate::sync::FormSyncClient;
use crate::view::PageView;

/// Shared state of the web front end.
///
/// Only configuration and the transport are shared. Every request gets its
/// own [`PageView`], so form fields, the key, the display region and the
/// debug log never outlive the response they were rendered into.
pub struct AppState<T = HttpTransport> {
    pub config: AppConfig,
    pub transport: Arc<T>,
}

impl<T: Transport> AppState<T> {
    pub fn new(config: AppConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// A client bound to a fresh, empty page.
    pub fn client(&self) -> FormSyncClient<Arc<T>, PageView> {
        FormSyncClient::new(self.config.clone(), Arc::clone(&self.transport), PageView::new())
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}
