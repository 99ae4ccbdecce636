// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comma-separated files.

use std::path::Path;

use tally_core::{Table, Value};

use crate::error::{LoadError, Result};
use crate::infer::{build_table, infer_field};

pub(crate) fn load_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::read(path, e))?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::read(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::read(path, e))?;
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(infer_field(field));
        }
    }
    build_table(path, headers, columns)
}
