// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell type inference for text-based sources.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tally_core::{Column, Table, Value};

use crate::error::{LoadError, Result};

/// Spellings treated as a missing cell.
const MISSING: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Infers a typed value from a delimited-text field.
///
/// Tried in order: missing, integer, float, boolean, ISO date, text.
pub(crate) fn infer_field(raw: &str) -> Value {
    let s = raw.trim();
    if MISSING.contains(&s) {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    if s.bytes().any(|b| b.is_ascii_digit())
        && let Ok(f) = s.parse::<f64>()
    {
        return Value::Float(f);
    }
    match s {
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }
    text_or_date(raw)
}

/// Keeps `s` as text unless it is an ISO date or date-time.
pub(crate) fn text_or_date(s: &str) -> Value {
    parse_iso_date(s.trim()).map_or_else(|| Value::text(s), Value::Date)
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    // Cheap reject before trying every format.
    if s.len() < 8 || !s.as_bytes()[0].is_ascii_digit() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Converts a column of integral floats into integers.
///
/// Spreadsheets store every number as a float; a column whose numbers are all whole reads
/// back as integers. Columns with any fractional value or non-numeric cell are left alone.
pub(crate) fn narrow_integral_floats(values: &mut [Value]) {
    let mut saw_float = false;
    for v in values.iter() {
        match v {
            Value::Null | Value::Int(_) => {}
            Value::Float(f) if is_whole(*f) => saw_float = true,
            _ => return,
        }
    }
    if !saw_float {
        return;
    }
    for v in values.iter_mut() {
        if let Value::Float(f) = *v {
            #[allow(clippy::cast_possible_truncation, reason = "whole and in the i64 range")]
            let i = f as i64;
            *v = Value::Int(i);
        }
    }
}

/// Converts the integers of a column that also holds floats into floats.
///
/// Text sources type each cell on its own, so `100` and `12.5` in one column would
/// otherwise yield `Int` and `Float` cells side by side.
pub(crate) fn widen_mixed_numbers(values: &mut [Value]) {
    let has_float = values.iter().any(|v| matches!(v, Value::Float(_)));
    if !has_float || !values.iter().any(|v| matches!(v, Value::Int(_))) {
        return;
    }
    for v in values.iter_mut() {
        if let Value::Int(i) = *v {
            *v = Value::Float(i as f64);
        }
    }
}

fn is_whole(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15
}

/// Builds a table from header names and column-major cells.
///
/// Blank headers become `Unnamed: <index>` and repeated headers get a `.<n>` suffix.
/// Columns mixing integers and floats are widened to floats.
pub(crate) fn build_table(
    path: &Path,
    headers: impl IntoIterator<Item = String>,
    columns: Vec<Vec<Value>>,
) -> Result<Table> {
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::with_capacity(columns.len());
    for (i, (header, mut values)) in headers.into_iter().zip(columns).enumerate() {
        widen_mixed_numbers(&mut values);
        let base = if header.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            header.trim().to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        seen.push(name.clone());
        out.push(Column::new(name, values));
    }
    Table::new(out).map_err(|e| LoadError::read(path, e))
}
