use serde_json::Value;

/// Text shown for a single cell of a sheet row.
///
/// Strings pass through untouched, null is blank, nested values are
/// flattened the way the sheet would display them.
pub fn value_to_cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(value_to_cell_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => obj
            .iter()
            .map(|(key, val)| format!("{}: {}", key, value_to_cell_text(val)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::value_to_cell_text;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(value_to_cell_text(&json!("Alice")), "Alice");
        assert_eq!(value_to_cell_text(&json!(42)), "42");
        assert_eq!(value_to_cell_text(&json!(true)), "true");
        assert_eq!(value_to_cell_text(&json!(null)), "");
    }

    #[test]
    fn test_nested() {
        assert_eq!(value_to_cell_text(&json!(["a", 1])), "a, 1");
    }
}
