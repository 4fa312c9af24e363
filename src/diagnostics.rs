use chrono::{Local, NaiveTime};

/// Maximum number of log entries kept in memory.
const MAX_LOG_ENTRIES: usize = 500;

/// Format a debug panel line: `[HH:MM:SS] INFO: message`.
pub fn format_log_line(time: NaiveTime, message: &str, is_error: bool) -> String {
    let prefix = if is_error { "ERROR:" } else { "INFO:" };
    format!("[{}] {} {}", time.format("%H:%M:%S"), prefix, message)
}

/// A single debug panel entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Monotonically increasing identifier.
    pub id: u64,
    /// Wall-clock time the entry was appended.
    pub time: NaiveTime,
    pub message: String,
    pub is_error: bool,
}

impl LogEntry {
    pub fn line(&self) -> String {
        format_log_line(self.time, &self.message, self.is_error)
    }
}

/// Append-only debug log shown next to the form.
///
/// Entries stay in the order they were appended. When the buffer is full the
/// oldest entries are dropped from the front.
#[derive(Clone, Debug)]
pub struct LogPanel {
    entries: Vec<LogEntry>,
    next_id: u64,
}

impl Default for LogPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn append(&mut self, message: &str, is_error: bool) -> &LogEntry {
        self.append_at(Local::now().time(), message, is_error)
    }

    pub fn append_at(&mut self, time: NaiveTime, message: &str, is_error: bool) -> &LogEntry {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(LogEntry {
            id,
            time,
            message: message.to_string(),
            is_error,
        });
        if self.entries.len() > MAX_LOG_ENTRIES {
            let excess = self.entries.len() - MAX_LOG_ENTRIES;
            self.entries.drain(..excess);
        }
        &self.entries[self.entries.len() - 1]
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_line_format() {
        assert_eq!(format_log_line(at(9, 5, 7), "Config loaded.", false), "[09:05:07] INFO: Config loaded.");
        assert_eq!(format_log_line(at(23, 0, 0), "Read Error: boom", true), "[23:00:00] ERROR: Read Error: boom");
    }

    #[test]
    fn test_entries_keep_append_order() {
        let mut panel = LogPanel::new();
        panel.append_at(at(10, 0, 0), "first", false);
        panel.append_at(at(10, 0, 1), "second", true);
        let messages: Vec<_> = panel.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["first", "second"]);
        assert_eq!(panel.entries()[1].id, 2);
        assert!(panel.entries()[1].is_error);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut panel = LogPanel::new();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            panel.append(&format!("m{}", i), false);
        }
        assert_eq!(panel.len(), MAX_LOG_ENTRIES);
        assert_eq!(panel.entries()[0].message, "m10");
        let ids: Vec<u64> = panel.entries().iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
}
