// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned columnar tables.

use crate::error::{Result, TableError};
use crate::value::{Value, ValueKind};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a column from anything convertible into [`Value`].
    pub fn from_values<T: Into<Value>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cells, top to bottom.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the cell at `row`.
    pub fn get(&self, row: usize) -> Option<&Value> {
        self.values.get(row)
    }

    /// Kind of the first non-null cell, if any.
    pub fn kind(&self) -> Option<ValueKind> {
        self.values.iter().find(|v| !v.is_null()).map(Value::kind)
    }

    /// Returns `true` when every non-missing cell is an `Int` or a `Float`.
    pub fn is_numeric(&self) -> bool {
        let mut any = false;
        for v in &self.values {
            match v {
                Value::Int(_) | Value::Float(_) => any = true,
                Value::Null => {}
                _ => return false,
            }
        }
        any
    }

    /// Numeric view of row `row`, failing with [`TableError::ParseError`] on non-numbers.
    ///
    /// Missing cells map to `None`.
    pub fn f64_at(&self, row: usize) -> Result<Option<f64>> {
        match self.values.get(row) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| TableError::ParseError {
                column: self.name.clone(),
                row,
                value: v.to_string(),
                expected: "a number",
            }),
        }
    }
}

/// An immutable table: ordered named columns of equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Builds a table, checking that names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        for (i, col) in columns.iter().enumerate() {
            if col.len() != rows {
                return Err(TableError::LengthMismatch {
                    column: col.name.clone(),
                    expected: rows,
                    found: col.len(),
                });
            }
            if columns[..i].iter().any(|c| c.name == col.name) {
                return Err(TableError::DuplicateColumn(col.name.clone()));
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Returns `true` if a column named `name` exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Position of the column named `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| self.missing(name))
    }

    /// The column named `name`.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.column_index(name).map(|i| &self.columns[i])
    }

    /// Checks that every name in `names` is a column of this table.
    pub fn require_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            self.column_index(name.as_ref())?;
        }
        Ok(())
    }

    /// The cell at (`row`, column index `col`).
    pub fn value(&self, row: usize, col: usize) -> Option<&Value> {
        self.columns.get(col)?.get(row)
    }

    /// Builds a new table from the given row indices, in the given order.
    ///
    /// Out-of-range indices are skipped.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        let rows: Vec<usize> = rows.iter().copied().filter(|&r| r < self.rows).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = rows.iter().map(|&r| c.values[r].clone()).collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        Self {
            columns,
            rows: rows.len(),
        }
    }

    /// The first `n` rows.
    pub fn head(&self, n: usize) -> Self {
        let idx: Vec<usize> = (0..n.min(self.rows)).collect();
        self.take_rows(&idx)
    }

    /// Returns a new table with `column` added, replacing any column of the same name in place.
    pub fn with_column(&self, column: Column) -> Result<Self> {
        let found = column.len();
        if !self.columns.is_empty() && found != self.rows {
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected: self.rows,
                found,
            });
        }
        let mut columns = self.columns.clone();
        match columns.iter().position(|c| c.name == column.name) {
            Some(i) => columns[i] = column,
            None => columns.push(column),
        }
        Self::new(columns)
    }

    /// Arithmetic mean of a numeric column, skipping missing cells.
    ///
    /// Returns `NaN` when the column has no numeric cells.
    pub fn mean(&self, name: &str) -> Result<f64> {
        let col = self.column(name)?;
        let mut sum = 0.0;
        let mut n = 0_usize;
        for row in 0..col.len() {
            if let Some(v) = col.f64_at(row)?.filter(|v| !v.is_nan()) {
                sum += v;
                n += 1;
            }
        }
        Ok(if n == 0 { f64::NAN } else { sum / n as f64 })
    }

    fn missing(&self, name: &str) -> TableError {
        TableError::ColumnNotFound {
            column: name.to_owned(),
            available: self.column_names().collect::<Vec<_>>().join(", "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales() -> Table {
        Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob", "Alice"]),
            Column::from_values("TOTAL", [1000_i64, 4000, 2250]),
        ])
        .expect("valid table")
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::from_values("A", [1_i64, 2]),
            Column::from_values("B", [1_i64]),
        ])
        .unwrap_err();
        assert!(
            matches!(
                err,
                TableError::LengthMismatch { ref column, expected: 2, found: 1 } if column == "B"
            ),
            "{err:?}"
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::from_values("A", [1_i64]),
            Column::from_values("A", [2_i64]),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn("A".into()));
    }

    #[test]
    fn missing_column_lists_available_names() {
        let err = sales().column("QUANTITY").unwrap_err();
        assert_eq!(
            err,
            TableError::ColumnNotFound {
                column: "QUANTITY".into(),
                available: "SELLER, TOTAL".into(),
            }
        );
    }

    #[test]
    fn with_column_replaces_in_place_and_leaves_source_untouched() {
        let t = sales();
        let doubled = Column::from_values("TOTAL", [2000_i64, 8000, 4500]);
        let t2 = t.with_column(doubled).expect("same length");
        assert_eq!(t2.column_names().collect::<Vec<_>>(), ["SELLER", "TOTAL"]);
        assert_eq!(t2.value(0, 1), Some(&Value::Int(2000)));
        assert_eq!(t.value(0, 1), Some(&Value::Int(1000)), "source unchanged");
    }

    #[test]
    fn with_column_rejects_wrong_length() {
        let short = Column::from_values("YEAR", [2023_i64]);
        let err = sales().with_column(short).unwrap_err();
        assert!(matches!(
            err,
            TableError::LengthMismatch { ref column, expected: 3, found: 1 } if column == "YEAR"
        ));
    }

    #[test]
    fn take_rows_and_head_preserve_order() {
        let t = sales();
        let picked = t.take_rows(&[2, 0, 99]);
        assert_eq!(picked.row_count(), 2);
        assert_eq!(picked.value(0, 1), Some(&Value::Int(2250)));
        assert_eq!(t.head(1).row_count(), 1);
        assert_eq!(t.head(10).row_count(), 3);
    }

    #[test]
    fn mean_skips_nulls_and_rejects_text() {
        let t = Table::new(vec![
            Column::new("X", vec![Value::Int(1), Value::Null, Value::Float(2.0)]),
            Column::from_values("S", ["a", "b", "c"]),
        ])
        .expect("valid table");
        assert!((t.mean("X").expect("numeric") - 1.5).abs() < 1e-12);
        assert!(matches!(t.mean("S"), Err(TableError::ParseError { .. })));
    }
}
