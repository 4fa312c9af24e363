use std::sync::{Mutex, MutexGuard};

use super::{Field, View, SUBMIT_LABEL, SUBMIT_PENDING_LABEL};
use crate::diagnostics::{LogEntry, LogPanel};
use crate::render::{render_table_html, LOAD_ERROR_MESSAGE};

/// What the display region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DisplayRegion {
    #[default]
    Empty,
    /// Escaped table markup.
    Table(String),
    Message { text: String, is_error: bool },
}

#[derive(Debug, Default)]
struct PageState {
    name: String,
    role: String,
    key: String,
    pending: bool,
    display: DisplayRegion,
    log: LogPanel,
    flash: Vec<String>,
}

/// Point-in-time copy of the page, used to render it.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub name: String,
    pub role: String,
    pub pending: bool,
    pub submit_label: &'static str,
    pub display: DisplayRegion,
    pub log: Vec<LogEntry>,
}

/// Server-side form page for one web request.
///
/// The lock is only taken inside individual calls, never across an await.
#[derive(Debug, Default)]
pub struct PageView {
    state: Mutex<PageState>,
}

impl PageView {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a one-shot notice for the next page render.
    pub fn push_flash(&self, message: impl Into<String>) {
        self.lock().flash.push(message.into());
    }

    pub fn take_flash(&self) -> Vec<String> {
        std::mem::take(&mut self.lock().flash)
    }

    /// The key is never part of a snapshot.
    pub fn snapshot(&self) -> PageSnapshot {
        let state = self.lock();
        PageSnapshot {
            name: state.name.clone(),
            role: state.role.clone(),
            pending: state.pending,
            submit_label: if state.pending { SUBMIT_PENDING_LABEL } else { SUBMIT_LABEL },
            display: state.display.clone(),
            log: state.log.entries().to_vec(),
        }
    }
}

impl View for PageView {
    fn get_field(&self, field: Field) -> String {
        let state = self.lock();
        match field {
            Field::Name => state.name.clone(),
            Field::Role => state.role.clone(),
            Field::Key => state.key.clone(),
        }
    }

    fn set_field(&self, field: Field, value: &str) {
        let mut state = self.lock();
        let slot = match field {
            Field::Name => &mut state.name,
            Field::Role => &mut state.role,
            Field::Key => &mut state.key,
        };
        *slot = value.to_string();
    }

    fn set_button_state(&self, pending: bool) {
        self.lock().pending = pending;
    }

    fn render_table(&self, rows: &[Vec<String>]) {
        let display = match render_table_html(rows) {
            Ok(html) => DisplayRegion::Table(html),
            Err(e) => {
                tracing::error!(%e, "Template render error");
                DisplayRegion::Message {
                    text: LOAD_ERROR_MESSAGE.to_string(),
                    is_error: true,
                }
            }
        };
        self.lock().display = display;
    }

    fn render_message(&self, text: &str, is_error: bool) {
        self.lock().display = DisplayRegion::Message {
            text: text.to_string(),
            is_error,
        };
    }

    fn append_log(&self, text: &str, is_error: bool) {
        self.lock().log.append(text, is_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_label_follows_pending() {
        let view = PageView::new();
        assert_eq!(view.snapshot().submit_label, SUBMIT_LABEL);
        view.set_button_state(true);
        assert!(view.snapshot().pending);
        assert_eq!(view.snapshot().submit_label, SUBMIT_PENDING_LABEL);
        view.set_button_state(false);
        assert_eq!(view.snapshot().submit_label, SUBMIT_LABEL);
    }

    #[test]
    fn test_table_replaces_message() {
        let view = PageView::new();
        view.render_message("No data found.", false);
        view.render_table(&[vec!["Name".into()], vec!["Alice".into()]]);
        match view.snapshot().display {
            DisplayRegion::Table(html) => assert!(html.contains("<th>Name</th>")),
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_flash_is_one_shot() {
        let view = PageView::new();
        view.push_flash("Please fill in all fields");
        assert_eq!(view.take_flash(), vec!["Please fill in all fields".to_string()]);
        assert!(view.take_flash().is_empty());
    }

    #[test]
    fn test_fields_round_trip() {
        let view = PageView::new();
        view.set_field(Field::Key, "s3cret");
        assert_eq!(view.get_field(Field::Key), "s3cret");
        view.set_field(Field::Name, "Bob");
        assert_eq!(view.snapshot().name, "Bob");
    }
}
