use serde::Deserialize;
use serde_json::Value;

use super::server_response::{error_or_unknown, STATUS_SUCCESS};

/// One sheet row, cells in column order.
pub type Row = Vec<Value>;

/// Reply to a read request. The first row of `data` is the header.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TableResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub data: Option<Vec<Row>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TableResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn error_message(&self) -> String {
        error_or_unknown(self.error.as_deref())
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.data.unwrap_or_default()
    }
}
