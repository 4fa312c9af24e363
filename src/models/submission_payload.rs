use serde::Serialize;

/// Body of the write request.
///
/// `key` is only present in access-control mode and is left out of the JSON
/// entirely otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub role: String,
}

impl SubmissionPayload {
    /// JSON text sent as the request body.
    pub fn to_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
