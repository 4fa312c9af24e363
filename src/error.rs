/// Error types for the sync client
use thiserror::Error;

/// Substrings (lowercase) that mark a server error as a credential failure.
const CREDENTIAL_MARKERS: &[&str] = &["invalid key", "wrong key", "unauthorized"];

/// Missing user input, detected before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name or role is empty
    #[error("Please fill in all fields")]
    MissingFields,

    /// Access-control mode is on and the key field is empty
    #[error("Please enter the access key")]
    MissingKey,
}

/// Failures below the response contract: the request never produced a
/// usable JSON body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

/// Everything `submit` and `fetch_data` can fail with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The endpoint answered with `status: "error"`
    #[error("Server error: {0}")]
    Server(String),

    /// Server error whose text points at a bad access key
    #[error("Wrong access key: {0}")]
    WrongCredential(String),

    #[error("Connection failed: {0}")]
    Transport(TransportError),

    /// Only produced when a request timeout is configured
    #[error("Request timed out")]
    Timeout,
}

impl From<TransportError> for SyncError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => SyncError::Timeout,
            other => SyncError::Transport(other),
        }
    }
}

impl SyncError {
    /// Classify an `error` string returned by the endpoint.
    pub fn from_server_message(message: String) -> Self {
        if is_credential_failure(&message) {
            SyncError::WrongCredential(message)
        } else {
            SyncError::Server(message)
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, SyncError::Validation(_))
    }
}

pub fn is_credential_failure(message: &str) -> bool {
    let lower = message.to_lowercase();
    CREDENTIAL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Configuration problems found while reading the environment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("SCRIPT_URL is not configured")]
    MissingScriptUrl,

    #[error("Invalid REQUEST_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_is_credential_failure() {
        let err = SyncError::from_server_message("Invalid key".into());
        assert_eq!(err, SyncError::WrongCredential("Invalid key".into()));
        assert!(err.to_string().contains("Wrong access key"));
    }

    #[test]
    fn test_credential_match_ignores_case() {
        assert!(is_credential_failure("UNAUTHORIZED request"));
        assert!(is_credential_failure("wrong KEY supplied"));
    }

    #[test]
    fn test_other_messages_stay_server_errors() {
        let err = SyncError::from_server_message("Sheet not found".into());
        assert_eq!(err, SyncError::Server("Sheet not found".into()));
        assert_eq!(err.to_string(), "Server error: Sheet not found");
    }

    #[test]
    fn test_timeout_maps_to_its_own_kind() {
        assert_eq!(SyncError::from(TransportError::Timeout), SyncError::Timeout);
        assert!(matches!(
            SyncError::from(TransportError::Request("dns".into())),
            SyncError::Transport(_)
        ));
    }

    #[test]
    fn test_validation_message_is_user_facing() {
        let err: SyncError = ValidationError::MissingFields.into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please fill in all fields");
    }
}
