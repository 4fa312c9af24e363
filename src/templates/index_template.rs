use askama::Template;

use crate::diagnostics::LogEntry;

/// One rendered line of the debug panel.
pub struct LogLine {
    pub text: String,
    pub is_error: bool,
}

impl From<&LogEntry> for LogLine {
    fn from(entry: &LogEntry) -> Self {
        Self {
            text: entry.line(),
            is_error: entry.is_error,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub version: &'static str,
    pub configured: bool,
    pub access_control: bool,
    pub name: String,
    pub role: String,
    pub submit_label: String,
    /// Label shown by the browser while the write is in flight.
    pub pending_label: &'static str,
    pub pending: bool,
    /// Pre-rendered, already escaped table markup.
    pub table_html: Option<String>,
    pub message: Option<String>,
    pub message_is_error: bool,
    pub show_log: bool,
    pub log_lines: Vec<LogLine>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}
