//! Row-oriented tables built from page responses.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use tabled::builder::Builder;

use crate::error::{CarbonArcError, Result};

/// A table of JSON cells.
///
/// Columns keep first-seen order; a record lacking a column gets `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from a slice of JSON objects.
    ///
    /// # Errors
    ///
    /// Returns [`CarbonArcError::UnexpectedResponse`] if a record is not an object.
    pub fn from_records(records: &[Value]) -> Result<Self> {
        let mut table = Self::default();
        for (i, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or_else(|| {
                CarbonArcError::UnexpectedResponse(format!("record {i} is not an object"))
            })?;
            table.push_object(object);
        }
        Ok(table)
    }

    fn push_object(&mut self, object: &Map<String, Value>) {
        for key in object.keys() {
            self.ensure_column(key);
        }
        let row = self
            .columns
            .iter()
            .map(|c| object.get(c).cloned().unwrap_or(Value::Null))
            .collect();
        self.rows.push(row);
    }

    fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(Value::Null);
        }
        self.columns.len() - 1
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// A single cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Set `name` to `value` on every row, adding the column if needed.
    #[must_use]
    pub fn with_column(mut self, name: &str, value: Value) -> Self {
        let idx = self.ensure_column(name);
        for row in &mut self.rows {
            row[idx] = value.clone();
        }
        self
    }

    /// Stack tables vertically. Columns are the union in first-seen order.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut out = Table::default();
        for table in tables {
            let indices: Vec<usize> = table
                .columns
                .iter()
                .map(|c| out.ensure_column(c))
                .collect();
            for row in table.rows {
                let mut merged = vec![Value::Null; out.columns.len()];
                for (cell, &idx) in row.into_iter().zip(&indices) {
                    merged[idx] = cell;
                }
                out.rows.push(merged);
            }
        }
        out
    }

    /// Rows as JSON objects.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| self.columns.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = Builder::default();
        builder.push_record(self.columns.iter().cloned());
        for row in &self.rows {
            builder.push_record(row.iter().map(cell_text));
        }
        write!(f, "{}", builder.build())
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn data_array<'a>(value: &'a Value, context: &str) -> Result<&'a [Value]> {
    value
        .get("data")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| CarbonArcError::UnexpectedResponse(format!("{context} has no `data` array")))
}

/// Map the response's top-level `data` records directly to rows.
///
/// # Errors
///
/// Returns [`CarbonArcError::UnexpectedResponse`] if `data` is missing or a
/// record is not an object.
pub fn flatten_dataframe(response: &Value) -> Result<Table> {
    Table::from_records(data_array(response, "response")?)
}

/// Flatten a timeseries response into one table with an `entity` column.
///
/// The input `data` is a list of per-entity blocks, each holding an `entity`
/// value and its own `data` records. Rows keep block order, then record order.
///
/// # Errors
///
/// Returns [`CarbonArcError::UnexpectedResponse`] if the nesting is not as
/// described above.
pub fn flatten_timeseries(response: &Value) -> Result<Table> {
    let blocks = data_array(response, "response")?;
    let mut tables = Vec::with_capacity(blocks.len());
    for (i, block) in blocks.iter().enumerate() {
        let entity = block.get("entity").cloned().ok_or_else(|| {
            CarbonArcError::UnexpectedResponse(format!("timeseries block {i} has no `entity`"))
        })?;
        let records = data_array(block, &format!("timeseries block {i}"))?;
        tables.push(Table::from_records(records)?.with_column("entity", entity));
    }
    Ok(Table::concat(tables))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_flatten_timeseries_tags_entity() {
        let response = json!({"data":[{"entity":"A","data":[{"d":1}]},{"entity":"B","data":[{"d":2}]}]});
        let table = flatten_timeseries(&response).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["d", "entity"]);
        assert_eq!(table.column("entity").unwrap(), vec![&json!("A"), &json!("B")]);
        assert_eq!(table.get(1, "d"), Some(&json!(2)));
    }

    #[test]
    fn test_flatten_timeseries_keeps_record_order_within_block() {
        let response = json!({"data":[
            {"entity": 7, "data": [{"date": "2024-01-01", "v": 1}, {"date": "2024-01-02", "v": 2}]},
            {"entity": 9, "data": [{"date": "2024-01-01", "v": 3}]}
        ]});
        let table = flatten_timeseries(&response).unwrap();
        let values: Vec<_> = table.column("v").unwrap().into_iter().cloned().collect();
        assert_eq!(values, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(table.get(2, "entity"), Some(&json!(9)));
    }

    #[test]
    fn test_flatten_timeseries_rejects_missing_entity() {
        let response = json!({"data":[{"data":[{"d":1}]}]});
        assert!(matches!(
            flatten_timeseries(&response),
            Err(CarbonArcError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_flatten_dataframe_unions_columns() {
        let response = json!({"data":[{"a":1,"b":2},{"b":3,"c":4}], "pages": 1});
        let table = flatten_dataframe(&response).unwrap();
        assert_eq!(table.columns(), ["a", "b", "c"]);
        assert_eq!(table.rows()[0], vec![json!(1), json!(2), Value::Null]);
        assert_eq!(table.rows()[1], vec![Value::Null, json!(3), json!(4)]);
    }

    #[test]
    fn test_columns_follow_response_key_order() {
        let body = r#"{"data":[{"spend":10,"date":"2024-01-01","brand":"acme"}],"pages":1}"#;
        let response: Value = serde_json::from_str(body).unwrap();
        let table = flatten_dataframe(&response).unwrap();
        assert_eq!(table.columns(), ["spend", "date", "brand"]);
    }

    #[test]
    fn test_flatten_dataframe_requires_data() {
        assert!(flatten_dataframe(&json!({"pages": 0})).is_err());
        assert!(flatten_dataframe(&json!({"data": []})).unwrap().is_empty());
    }

    #[test]
    fn test_concat_fills_missing_columns() {
        let left = Table::from_records(&[json!({"x": 1})]).unwrap();
        let right = Table::from_records(&[json!({"y": 2})]).unwrap();
        let table = Table::concat([left, right]);
        assert_eq!(table.columns(), ["x", "y"]);
        assert_eq!(table.get(0, "y"), Some(&Value::Null));
        assert_eq!(table.get(1, "x"), Some(&Value::Null));
    }

    #[test]
    fn test_display_renders_header_and_cells() {
        let table = Table::from_records(&[json!({"name": "acme", "score": 0.9})]).unwrap();
        let rendered = table.to_string();
        assert!(rendered.contains("name"));
        assert!(rendered.contains("acme"));
        assert!(rendered.contains("0.9"));
        assert!(!rendered.contains("\"acme\""));
    }
}
