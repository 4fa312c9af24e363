//! The UI surface the sync client reads from and writes to.

pub mod page;
pub mod terminal;

pub use page::{DisplayRegion, PageSnapshot, PageView};
pub use terminal::TerminalView;

/// Label of the submit control when idle.
pub const SUBMIT_LABEL: &str = "Send to Sheet";
/// Label while a write is in flight.
pub const SUBMIT_PENDING_LABEL: &str = "Sending...";

/// Named input fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Role,
    Key,
}

/// Handle-based UI surface.
///
/// Methods take `&self`: implementations keep their state behind interior
/// mutability so the client can hold the view while a request is pending.
pub trait View: Send + Sync {
    /// Current text of a field. Empty when the field does not exist.
    fn get_field(&self, field: Field) -> String;

    fn set_field(&self, field: Field, value: &str);

    /// `true` disables the submit control and shows [`SUBMIT_PENDING_LABEL`];
    /// `false` restores it.
    fn set_button_state(&self, pending: bool);

    /// Replace the display region with a table. `rows[0]` is the header.
    fn render_table(&self, rows: &[Vec<String>]);

    /// Replace the display region with a message.
    fn render_message(&self, text: &str, is_error: bool);

    /// Add a line to the debug log panel.
    fn append_log(&self, text: &str, is_error: bool);
}
