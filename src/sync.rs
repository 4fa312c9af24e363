//! The form-to-sheet client.
//!
//! [`FormSyncClient`] reads the form through a [`View`], writes and reads the
//! endpoint through a [`Transport`], and reports every notable step to both
//! `tracing` and the view's debug panel.

use serde::de::DeserializeOwned;

use crate::api::Transport;
use crate::config::AppConfig;
use crate::error::{SyncError, TransportError, ValidationError};
use crate::models::{Row, ServerResponse, SubmissionPayload, TableResponse};
use crate::render::{format_rows, KEY_PROMPT_MESSAGE, LOAD_ERROR_MESSAGE, NO_DATA_MESSAGE};
use crate::view::{Field, View};

/// Result of a successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A table with `rows` rows (header included) was rendered.
    Rendered { rows: usize },
    /// The sheet had no rows; the "no data" message was rendered.
    Empty,
}

/// Result of an accepted write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The refresh issued after the write. Its failure is already shown in
    /// the display region and does not undo the write.
    pub refresh: Result<FetchOutcome, SyncError>,
}

/// Keeps the submit control disabled while alive.
struct PendingSubmit<'a, V: View> {
    view: &'a V,
}

impl<'a, V: View> PendingSubmit<'a, V> {
    fn engage(view: &'a V) -> Self {
        view.set_button_state(true);
        Self { view }
    }
}

impl<V: View> Drop for PendingSubmit<'_, V> {
    fn drop(&mut self) {
        self.view.set_button_state(false);
    }
}

pub struct FormSyncClient<T, V> {
    config: AppConfig,
    transport: T,
    view: V,
}

impl<T: Transport, V: View> FormSyncClient<T, V> {
    pub fn new(config: AppConfig, transport: T, view: V) -> Self {
        Self {
            config,
            transport,
            view,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Report whether the endpoint is configured.
    pub fn announce_config(&self) {
        match self.config.validate() {
            Ok(()) => self.log("Config loaded. Script URL configured."),
            Err(e) => self.log_error(&format!("{}. Requests will fail until it is set.", e)),
        }
    }

    /// Startup sequence: report config, then load the table unless access
    /// control is on (no request may go out before a key is entered).
    pub async fn start(&self) -> Option<Result<FetchOutcome, SyncError>> {
        self.announce_config();
        if self.config.access_control {
            self.log("Access control enabled. Enter the key and refresh to load data.");
            self.view.render_message(KEY_PROMPT_MESSAGE, false);
            None
        } else {
            Some(self.fetch_data().await)
        }
    }

    /// Validate the form, write it, and on success clear name/role and
    /// refresh the table once.
    ///
    /// The submit control is disabled for exactly the duration of the write.
    pub async fn submit(&self) -> Result<SubmitOutcome, SyncError> {
        let payload = match self.collect_submission() {
            Ok(payload) => payload,
            Err(e) => {
                self.log_error(&format!("Input validation failed: {}", e));
                return Err(e.into());
            }
        };

        self.log(&format!("Attempting to send data: {}, {}...", payload.name, payload.role));
        let written = {
            let _pending = PendingSubmit::engage(&self.view);
            self.send_submission(&payload).await
        };

        match written {
            Ok(()) => {
                self.log("Write Successful!");
                self.view.set_field(Field::Name, "");
                self.view.set_field(Field::Role, "");
                // Reuse the key the write was accepted with; the field may
                // have changed while the write was in flight.
                let refresh = self.load_and_render(payload.key.as_deref()).await;
                Ok(SubmitOutcome { refresh })
            }
            Err(e) => {
                match &e {
                    SyncError::Server(msg) | SyncError::WrongCredential(msg) => {
                        self.log_error(&format!("Server Error: {}", msg));
                    }
                    other => self.log_error(&format!("Fetch Error: {}", other)),
                }
                Err(e)
            }
        }
    }

    /// Read the sheet and render it into the display region.
    pub async fn fetch_data(&self) -> Result<FetchOutcome, SyncError> {
        let key = if self.config.access_control {
            match self.require_key() {
                Ok(key) => Some(key),
                Err(e) => {
                    self.log_error("Refresh skipped: access key is empty.");
                    self.view.render_message(KEY_PROMPT_MESSAGE, false);
                    return Err(e.into());
                }
            }
        } else {
            None
        };
        self.load_and_render(key.as_deref()).await
    }

    async fn load_and_render(&self, key: Option<&str>) -> Result<FetchOutcome, SyncError> {
        self.log("Fetching data from the sheet...");
        match self.load_rows(key).await {
            Ok(rows) => {
                self.log(&format!("Data received. Rows found: {}", rows.len()));
                if rows.is_empty() {
                    self.view.render_message(NO_DATA_MESSAGE, false);
                    Ok(FetchOutcome::Empty)
                } else {
                    self.view.render_table(&format_rows(&rows));
                    Ok(FetchOutcome::Rendered { rows: rows.len() })
                }
            }
            Err(e) => {
                self.log_error(&format!("Read Error: {}", e));
                self.view.render_message(LOAD_ERROR_MESSAGE, true);
                Err(e)
            }
        }
    }

    fn collect_submission(&self) -> Result<SubmissionPayload, ValidationError> {
        let name = self.view.get_field(Field::Name).trim().to_string();
        let role = self.view.get_field(Field::Role).trim().to_string();
        if name.is_empty() || role.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let key = if self.config.access_control {
            Some(self.require_key()?)
        } else {
            None
        };
        Ok(SubmissionPayload { key, name, role })
    }

    fn require_key(&self) -> Result<String, ValidationError> {
        let key = self.view.get_field(Field::Key);
        if key.trim().is_empty() {
            Err(ValidationError::MissingKey)
        } else {
            Ok(key)
        }
    }

    async fn send_submission(&self, payload: &SubmissionPayload) -> Result<(), SyncError> {
        let body = payload
            .to_body()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let raw = self.transport.post(&self.config.script_url, body).await?;
        let response: ServerResponse = parse_body(&raw)?;
        self.log(&format!("Server Response: {}", raw.trim()));
        if response.is_success() {
            Ok(())
        } else {
            Err(SyncError::from_server_message(response.error_message()))
        }
    }

    async fn load_rows(&self, key: Option<&str>) -> Result<Vec<Row>, SyncError> {
        let query: Vec<(&str, &str)> = key.map(|k| vec![("key", k)]).unwrap_or_default();
        let raw = self.transport.get(&self.config.script_url, &query).await?;
        let response: TableResponse = parse_body(&raw)?;
        if !response.is_success() {
            return Err(SyncError::from_server_message(response.error_message()));
        }
        Ok(response.into_rows())
    }

    fn log(&self, message: &str) {
        tracing::info!("{}", message);
        if self.config.debug_log {
            self.view.append_log(message, false);
        }
    }

    fn log_error(&self, message: &str) {
        tracing::error!("{}", message);
        if self.config.debug_log {
            self.view.append_log(message, true);
        }
    }
}

fn parse_body<R: DeserializeOwned>(raw: &str) -> Result<R, TransportError> {
    serde_json::from_str(raw).map_err(|e| TransportError::MalformedBody(e.to_string()))
}
