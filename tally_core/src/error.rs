// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table errors.

use thiserror::Error;

/// Errors raised while building or reading a [`crate::Table`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A referenced column is not part of the table.
    #[error("column `{column}` not found (available: {available})")]
    ColumnNotFound {
        /// The requested column name.
        column: String,
        /// Comma-separated names of the columns that do exist.
        available: String,
    },
    /// A value could not be interpreted as the type an operation needs.
    #[error("column `{column}`, row {row}: cannot interpret `{value}` as {expected}")]
    ParseError {
        /// Column holding the offending value.
        column: String,
        /// Zero-based row index.
        row: usize,
        /// The value, rendered as text.
        value: String,
        /// What the operation expected (e.g. `"a date"`, `"a number"`).
        expected: &'static str,
    },
    /// A column's length disagrees with the rest of the table.
    #[error("column `{column}` has {found} rows, expected {expected}")]
    LengthMismatch {
        /// Offending column.
        column: String,
        /// Row count of the table.
        expected: usize,
        /// Row count of the column.
        found: usize,
    },
    /// Two columns share a name.
    #[error("duplicate column `{0}`")]
    DuplicateColumn(String),
}

/// Result alias for table operations.
pub type Result<T, E = TableError> = core::result::Result<T, E>;
