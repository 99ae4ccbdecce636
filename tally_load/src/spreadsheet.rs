// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Excel workbooks via `calamine`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, DataType, Reader, Sheets, Xls, Xlsx, open_workbook};
use tally_core::{Table, Value};

use crate::SourceKind;
use crate::error::{LoadError, Result};
use crate::infer::{build_table, narrow_integral_floats};

type Workbook = Sheets<BufReader<File>>;

fn open(path: &Path, kind: SourceKind) -> Result<Workbook> {
    let workbook = match kind {
        SourceKind::Xls => open_workbook::<Xls<_>, _>(path)
            .map(Sheets::Xls)
            .map_err(|e| LoadError::read(path, e))?,
        _ => open_workbook::<Xlsx<_>, _>(path)
            .map(Sheets::Xlsx)
            .map_err(|e| LoadError::read(path, e))?,
    };
    Ok(workbook)
}

pub(crate) fn sheet_names(path: &Path, kind: SourceKind) -> Result<Vec<String>> {
    Ok(open(path, kind)?.sheet_names())
}

pub(crate) fn load_sheet(path: &Path, kind: SourceKind, sheet: Option<&str>) -> Result<Table> {
    let mut workbook = open(path, kind)?;
    let name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::read(path, "workbook has no sheets"))?,
    };
    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| LoadError::read(path, e))?;
    tracing::debug!(sheet = %name, size = ?range.get_size(), "reading worksheet");

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::empty());
    };
    let headers: Vec<String> = header.iter().map(header_text).collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(row.get(i).map_or(Value::Null, cell_value));
        }
    }
    for column in &mut columns {
        narrow_integral_floats(column);
    }
    build_table(path, headers, columns)
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) if f.fract() == 0.0 => format!("{f:.0}"),
        other => other.to_string(),
    }
}

/// Converts a worksheet cell into a table value.
///
/// Error cells read as missing; date cells become dates, time of day dropped.
pub(crate) fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty | Data::Error(_) => Value::Null,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) | Data::DurationIso(s) => Value::text(s.as_str()),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map_or_else(|| Value::text(cell.to_string()), Value::Date),
    }
}

#[cfg(test)]
mod tests {
    use calamine::CellErrorType;

    use super::*;

    #[test]
    fn cells_map_to_values() {
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_value(&Data::Error(CellErrorType::Div0)), Value::Null);
        assert_eq!(cell_value(&Data::Int(3)), Value::Int(3));
        assert_eq!(cell_value(&Data::Float(2.5)), Value::Float(2.5));
        assert_eq!(cell_value(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(cell_value(&Data::String("Bob".into())), Value::text("Bob"));
        assert_eq!(cell_value(&Data::String("  ".into())), Value::Null);
    }

    #[test]
    fn numeric_headers_drop_the_fraction() {
        assert_eq!(header_text(&Data::Float(2023.0)), "2023");
        assert_eq!(header_text(&Data::String("TOTAL".into())), "TOTAL");
        assert_eq!(header_text(&Data::Empty), "");
    }

    #[test]
    fn corrupt_workbook_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = load_sheet(&path, SourceKind::Xlsx, None).unwrap_err();
        assert!(matches!(err, LoadError::ReadError { .. }));
    }
}
