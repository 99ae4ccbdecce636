// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON documents.
//!
//! Two layouts are accepted: an array of records (`[{"A": 1}, ...]`) and an object of
//! columns, where each column is either an array or an index-keyed object
//! (`{"A": {"0": 1, "1": 2}}`).

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as Json};
use tally_core::{Table, Value};

use crate::error::{LoadError, Result};
use crate::infer::{build_table, text_or_date};

pub(crate) fn load_json(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;
    let doc: Json = serde_json::from_str(&text).map_err(|e| LoadError::read(path, e))?;
    match doc {
        Json::Array(rows) => from_records(path, rows),
        Json::Object(columns) => from_columns(path, columns),
        _ => Err(LoadError::read(
            path,
            "expected an array of records or an object of columns",
        )),
    }
}

fn from_records(path: &Path, rows: Vec<Json>) -> Result<Table> {
    let mut records = Vec::with_capacity(rows.len());
    let mut names: Vec<String> = Vec::new();
    for (i, row) in rows.into_iter().enumerate() {
        let Json::Object(record) = row else {
            return Err(LoadError::read(path, format!("record {i} is not an object")));
        };
        for key in record.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
        records.push(record);
    }
    let columns = names
        .iter()
        .map(|name| {
            records
                .iter()
                .map(|r| r.get(name).map_or(Value::Null, json_value))
                .collect()
        })
        .collect();
    build_table(path, names, columns)
}

fn from_columns(path: &Path, columns: Map<String, Json>) -> Result<Table> {
    let mut names = Vec::with_capacity(columns.len());
    let mut values = Vec::with_capacity(columns.len());
    for (name, column) in columns {
        let cells: Vec<Value> = match column {
            Json::Array(cells) => cells.iter().map(json_value).collect(),
            Json::Object(cells) => cells.values().map(json_value).collect(),
            _ => {
                return Err(LoadError::read(
                    path,
                    format!("column `{name}` is neither an array nor an object"),
                ));
            }
        };
        names.push(name);
        values.push(cells);
    }
    build_table(path, names, values)
}

fn json_value(v: &Json) -> Value {
    match v {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        Json::String(s) => text_or_date(s),
        nested => Value::text(nested.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn write(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.json");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn records_keep_first_seen_key_order() {
        let (_dir, path) = write(
            r#"[{"SELLER": "Alice", "TOTAL": 1000, "DATE": "2023-04-12"},
                {"SELLER": "Bob", "TOTAL": 2.5, "EXTRA": null}]"#,
        );
        let table = load_json(&path).unwrap();
        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, ["SELLER", "TOTAL", "DATE", "EXTRA"]);
        assert_eq!(table.value(0, 1), Some(&Value::Float(1000.0)));
        assert_eq!(table.value(1, 1), Some(&Value::Float(2.5)));
        assert_eq!(
            table.value(0, 2),
            Some(&Value::Date(NaiveDate::from_ymd_opt(2023, 4, 12).unwrap()))
        );
        assert_eq!(table.value(1, 2), Some(&Value::Null));
        assert_eq!(table.value(0, 3), Some(&Value::Null));
    }

    #[test]
    fn column_objects_are_accepted() {
        let (_dir, path) = write(
            r#"{"SELLER": {"0": "Alice", "1": "Bob"}, "TOTAL": [10, 20]}"#,
        );
        let table = load_json(&path).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.value(1, 0), Some(&Value::text("Bob")));
        assert_eq!(table.value(1, 1), Some(&Value::Int(20)));
    }

    #[test]
    fn mixed_number_columns_are_widened() {
        let (_dir, path) = write(r#"{"UNIT_PRICE": [100, 12.5, null], "QUANTITY": [1, 2, 3]}"#);
        let table = load_json(&path).unwrap();
        let prices = table.column("UNIT_PRICE").unwrap();
        assert_eq!(prices.values(), [Value::Float(100.0), Value::Float(12.5), Value::Null]);
        let quantities = table.column("QUANTITY").unwrap();
        assert_eq!(quantities.values(), [Value::Int(1), Value::Int(2), Value::Int(3)]);
    }

    #[test]
    fn scalars_and_ragged_columns_are_read_errors() {
        let (_dir, path) = write("42");
        assert!(matches!(load_json(&path), Err(LoadError::ReadError { .. })));
        let (_dir, path) = write(r#"{"A": [1, 2], "B": [1]}"#);
        assert!(matches!(load_json(&path), Err(LoadError::ReadError { .. })));
        let (_dir, path) = write("[1, 2]");
        assert!(matches!(load_json(&path), Err(LoadError::ReadError { .. })));
    }
}
