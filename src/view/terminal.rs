use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Local;
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use super::{Field, View, SUBMIT_PENDING_LABEL};
use crate::diagnostics::format_log_line;

/// Command-line surface: fields come from arguments, the table goes to
/// stdout, log lines go to stderr.
pub struct TerminalView {
    fields: Mutex<HashMap<Field, String>>,
    spinner: Mutex<Option<ProgressBar>>,
    show_log: bool,
}

impl TerminalView {
    pub fn new(show_log: bool) -> Self {
        Self {
            fields: Mutex::new(HashMap::new()),
            spinner: Mutex::new(None),
            show_log,
        }
    }

    pub fn with_field(self, field: Field, value: impl Into<String>) -> Self {
        self.set_field(field, &value.into());
        self
    }

    fn fields(&self) -> MutexGuard<'_, HashMap<Field, String>> {
        self.fields.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Terminal table with the first row as header.
pub fn build_table(rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    if let Some((header, body)) = rows.split_first() {
        table.set_header(header);
        for row in body {
            table.add_row(row);
        }
    }
    table
}

impl View for TerminalView {
    fn get_field(&self, field: Field) -> String {
        self.fields().get(&field).cloned().unwrap_or_default()
    }

    fn set_field(&self, field: Field, value: &str) {
        self.fields().insert(field, value.to_string());
    }

    fn set_button_state(&self, pending: bool) {
        let mut spinner = self.spinner();
        if pending {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(SUBMIT_PENDING_LABEL);
            bar.enable_steady_tick(Duration::from_millis(100));
            *spinner = Some(bar);
        } else if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
    }

    fn render_table(&self, rows: &[Vec<String>]) {
        println!("\n{}\n", build_table(rows));
    }

    fn render_message(&self, text: &str, is_error: bool) {
        if is_error {
            println!("{}", text.red());
        } else {
            println!("{}", text.dim());
        }
    }

    fn append_log(&self, text: &str, is_error: bool) {
        if !self.show_log {
            return;
        }
        let line = format_log_line(Local::now().time(), text, is_error);
        if is_error {
            eprintln!("{}", line.red());
        } else {
            eprintln!("{}", line.rgb(100, 100, 100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_default_to_empty() {
        let view = TerminalView::new(false).with_field(Field::Name, "Alice");
        assert_eq!(view.get_field(Field::Name), "Alice");
        assert_eq!(view.get_field(Field::Key), "");
    }

    #[test]
    fn test_table_uses_first_row_as_header() {
        let rows = vec![
            vec!["Name".to_string(), "Role".to_string()],
            vec!["Alice".to_string(), "Admin".to_string()],
            vec!["Bob".to_string(), "Dev".to_string()],
        ];
        let table = build_table(&rows);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Bob"));
    }

    #[test]
    fn test_button_state_toggles_spinner() {
        let view = TerminalView::new(false);
        view.set_button_state(true);
        assert!(view.spinner().is_some());
        view.set_button_state(false);
        assert!(view.spinner().is_none());
    }
}
