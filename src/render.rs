//! Turning sheet rows into display text and HTML.

use askama::Template;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use std::fmt::Display;

use crate::models::Row;
use crate::templates::DataTableTemplate;
use crate::utils::value_to_cell_text;

pub const NO_DATA_MESSAGE: &str = "No data found.";
pub const LOAD_ERROR_MESSAGE: &str = "Error loading data.";
pub const KEY_PROMPT_MESSAGE: &str = "Enter the access key and press Refresh to load data.";

/// Month/day/year, 12-hour clock. Matches how browsers print a date with
/// the default locale.
pub const LOCALE_DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_UTC_FORMATS: &[&str] = &["%Y-%m-%dT%H:%MZ", "%Y-%m-%dT%H:%M:%S%.fZ"];

/// Lexical check for an ISO-8601 UTC timestamp: a literal `T` and a literal
/// `Z` anywhere in the text. Deliberately loose; it decides which cells get
/// reformatted.
pub fn looks_like_timestamp(text: &str) -> bool {
    text.contains('T') && text.contains('Z')
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_UTC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp_in<Tz>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(LOCALE_DATETIME_FORMAT).to_string()
}

/// Display text for one cell, with timestamps shown in `tz`.
///
/// Text that passes [`looks_like_timestamp`] but does not parse is shown
/// unchanged.
pub fn format_cell_in<Tz>(value: &Value, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let text = value_to_cell_text(value);
    if looks_like_timestamp(&text) {
        if let Some(ts) = parse_timestamp(&text) {
            return format_timestamp_in(ts, tz);
        }
    }
    text
}

pub fn format_cell(value: &Value) -> String {
    format_cell_in(value, &Local)
}

pub fn format_rows_in<Tz>(rows: &[Row], tz: &Tz) -> Vec<Vec<String>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    rows.iter()
        .map(|row| row.iter().map(|cell| format_cell_in(cell, tz)).collect())
        .collect()
}

pub fn format_rows(rows: &[Row]) -> Vec<Vec<String>> {
    format_rows_in(rows, &Local)
}

/// HTML `<table>` for already formatted rows: the first row as `<th>`
/// cells, the rest as `<td>`. Cell text is escaped.
pub fn render_table_html(rows: &[Vec<String>]) -> Result<String, askama::Error> {
    let (header, body) = match rows.split_first() {
        Some((header, body)) => (header.clone(), body.to_vec()),
        None => (Vec::new(), Vec::new()),
    };
    DataTableTemplate { header, body }.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    #[test]
    fn test_heuristic_needs_both_letters() {
        assert!(looks_like_timestamp("2024-01-15T10:30:00Z"));
        assert!(!looks_like_timestamp("2024-01-15T10:30:00"));
        assert!(!looks_like_timestamp("Zed"));
        assert!(looks_like_timestamp("TZ"));
    }

    #[test]
    fn test_timestamp_is_localized() {
        let shown = format_cell_in(&json!("2024-01-15T10:30:00Z"), &Utc);
        assert_eq!(shown, "1/15/2024, 10:30:00 AM");
    }

    #[test]
    fn test_timestamp_follows_time_zone() {
        let cet = FixedOffset::east_opt(3600).unwrap();
        let shown = format_cell_in(&json!("2024-01-15T23:30:00.000Z"), &cet);
        assert_eq!(shown, "1/16/2024, 12:30:00 AM");
    }

    #[test]
    fn test_local_format_differs_from_raw() {
        let raw = "2024-01-15T10:30:00Z";
        assert_ne!(format_cell(&json!(raw)), raw);
    }

    #[test]
    fn test_minutes_only_timestamp() {
        assert_eq!(format_cell_in(&json!("2024-01-15T10:30Z"), &Utc), "1/15/2024, 10:30:00 AM");
    }

    #[test]
    fn test_lookalike_text_is_left_alone() {
        assert_eq!(format_cell_in(&json!("TOTAL ZONE"), &Utc), "TOTAL ZONE");
        assert_eq!(format_cell_in(&json!("Admin"), &Utc), "Admin");
        assert_eq!(format_cell_in(&json!(7), &Utc), "7");
    }

    #[test]
    fn test_table_html_header_and_data_cells() {
        let rows = vec![
            vec!["Name".to_string(), "Role".to_string()],
            vec!["Alice".to_string(), "Admin".to_string()],
        ];
        let html = render_table_html(&rows).unwrap();
        assert_eq!(html.matches("<tr>").count(), 2);
        assert!(html.contains("<th>Name</th><th>Role</th>"));
        assert!(html.contains("<td>Alice</td><td>Admin</td>"));
        assert!(!html.contains("<td>Name</td>"));
    }

    #[test]
    fn test_table_html_escapes_cells() {
        let rows = vec![vec!["<b>x</b>".to_string()]];
        let html = render_table_html(&rows).unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;b&gt;"));
    }
}
