use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use crate::types::RawTable;

/// Drops rows that are empty across all fields and columns that are empty
/// across all rows. Spreadsheet exports pad both freely.
pub fn normalize(table: RawTable) -> RawTable {
    let rows: Vec<BTreeMap<String, Value>> = table
        .rows
        .into_iter()
        .filter(|row| row.values().any(|value| !is_blank(value)))
        .collect();

    let mut dead_columns: BTreeSet<String> = rows
        .iter()
        .flat_map(|row| row.keys().cloned())
        .collect();
    for row in &rows {
        dead_columns.retain(|column| row.get(column).is_none_or(is_blank));
    }

    let rows = rows
        .into_iter()
        .map(|mut row| {
            row.retain(|column, _| !dead_columns.contains(column));
            row
        })
        .collect();
    RawTable { rows }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Non-blank string value of a cell, or `None` when absent.
pub fn cell_str(row: &BTreeMap<String, Value>, column: &str) -> Option<String> {
    let value = row.get(column)?;
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Numeric value of a cell. String cells parse after stripping the thousands
/// separators sheet exports insert.
pub fn cell_f64(row: &BTreeMap<String, Value>, column: &str) -> Option<f64> {
    match row.get(column)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Boolean value of a cell, accepting the TRUE/FALSE strings sheets export.
pub fn cell_bool(row: &BTreeMap<String, Value>, column: &str) -> Option<bool> {
    match row.get(column)? {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn drops_fully_empty_rows() {
        let table = RawTable {
            rows: vec![
                row(&[("a", json!("x")), ("b", Value::Null)]),
                row(&[("a", Value::Null), ("b", json!(""))]),
                row(&[("a", json!("  ")), ("b", Value::Null)]),
            ],
        };
        let normalized = normalize(table);
        assert_eq!(normalized.len(), 1);
    }

    #[test]
    fn drops_columns_empty_across_all_rows() {
        let table = RawTable {
            rows: vec![
                row(&[("keep", json!("x")), ("drop", Value::Null)]),
                row(&[("keep", json!("y")), ("drop", json!(""))]),
            ],
        };
        let normalized = normalize(table);
        assert_eq!(normalized.len(), 2);
        assert!(normalized.rows[0].contains_key("keep"));
        assert!(!normalized.rows[0].contains_key("drop"));
        assert!(!normalized.rows[1].contains_key("drop"));
    }

    #[test]
    fn column_present_in_one_row_survives() {
        let table = RawTable {
            rows: vec![
                row(&[("a", json!("x"))]),
                row(&[("a", json!("y")), ("b", json!("z"))]),
            ],
        };
        let normalized = normalize(table);
        assert_eq!(cell_str(&normalized.rows[1], "b").as_deref(), Some("z"));
    }

    #[test]
    fn cell_accessors_treat_blank_as_absent() {
        let cells = row(&[
            ("text", json!("  hi ")),
            ("blank", json!("   ")),
            ("number", json!(12.5)),
            ("number_text", json!("1,234.5")),
            ("flag", json!("FALSE")),
        ]);
        assert_eq!(cell_str(&cells, "text").as_deref(), Some("hi"));
        assert_eq!(cell_str(&cells, "blank"), None);
        assert_eq!(cell_str(&cells, "missing"), None);
        assert_eq!(cell_f64(&cells, "number"), Some(12.5));
        assert_eq!(cell_f64(&cells, "number_text"), Some(1234.5));
        assert_eq!(cell_bool(&cells, "flag"), Some(false));
        assert_eq!(cell_bool(&cells, "text"), None);
    }
}
