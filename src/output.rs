//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::{Map, Value};

use crate::table::Table;

/// Trait for human-readable output.
///
/// Used by the CLI when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Table {
    fn pretty_print(&self) -> String {
        if self.is_empty() && self.columns().is_empty() {
            return "(no rows)".to_string();
        }
        format!("{self}\n{} row(s)", self.len())
    }
}

impl PrettyPrint for Value {
    fn pretty_print(&self) -> String {
        match self {
            Value::Object(map) => pretty_object(map),
            Value::Array(items) => match Table::from_records(items) {
                Ok(table) => table.pretty_print(),
                Err(_) => items
                    .iter()
                    .map(scalar_text)
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
            other => scalar_text(other),
        }
    }
}

/// Page responses render their `data` records as a table under a summary of
/// the remaining fields. Other objects render as aligned key/value lines.
fn pretty_object(map: &Map<String, Value>) -> String {
    let records = map.get("data").and_then(Value::as_array);
    let table = records.and_then(|r| Table::from_records(r).ok());

    let width = map.keys().map(String::len).max().unwrap_or(0).max(8) + 1;
    let mut lines: Vec<String> = map
        .iter()
        .filter(|(key, _)| !(table.is_some() && key.as_str() == "data"))
        .map(|(key, value)| format!("{:width$}  {}", format!("{key}:"), scalar_text(value)))
        .collect();

    if let Some(table) = table {
        if !lines.is_empty() {
            lines.push("─".repeat(30));
        }
        lines.push(table.pretty_print());
    }
    lines.join("\n")
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
