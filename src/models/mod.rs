pub mod app_state;
pub mod server_response;
pub mod submission_payload;
pub mod table_response;

pub use app_state::AppState;
pub use server_response::{ServerResponse, STATUS_SUCCESS};
pub use submission_payload::SubmissionPayload;
pub use table_response::{Row, TableResponse};
