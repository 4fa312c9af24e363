use serde::Deserialize;

pub const STATUS_SUCCESS: &str = "success";

const UNKNOWN_ERROR: &str = "Unknown error";

/// Reply to a write request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ServerResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn error_message(&self) -> String {
        error_or_unknown(self.error.as_deref())
    }
}

pub(crate) fn error_or_unknown(error: Option<&str>) -> String {
    match error {
        Some(e) if !e.trim().is_empty() => e.to_string(),
        _ => UNKNOWN_ERROR.to_string(),
    }
}
