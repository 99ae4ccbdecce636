// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular data sources for tally.
//!
//! A [`Loader`] is bound to one file. Construction checks that the file exists and that its
//! extension names a supported format; nothing is read until [`Loader::load`] or
//! [`Loader::list_sub_sheets`] is called.
//!
//! ```no_run
//! use tally_load::Loader;
//!
//! let loader = Loader::new("data/sales.xlsx")?;
//! let table = loader.load(None)?;
//! println!("{table}");
//! # Ok::<(), tally_load::LoadError>(())
//! ```

mod delimited;
mod error;
mod infer;
mod json;
mod spreadsheet;

use core::fmt;
use std::path::{Path, PathBuf};

use tally_core::Table;

pub use error::{BoxError, LoadError, Result};

/// File format, detected from the extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Office Open XML workbook (`.xlsx`).
    Xlsx,
    /// Legacy Excel workbook (`.xls`).
    Xls,
    /// Comma-separated values (`.csv`).
    Csv,
    /// JSON (`.json`).
    Json,
}

impl SourceKind {
    /// Maps a file extension (any case, no leading dot) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Returns `true` for workbook formats, which can hold several sheets.
    pub fn is_spreadsheet(self) -> bool {
        matches!(self, Self::Xlsx | Self::Xls)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Csv => "csv",
            Self::Json => "json",
        })
    }
}

/// A checked handle on a data file.
#[derive(Clone, Debug)]
pub struct Loader {
    path: PathBuf,
    kind: SourceKind,
}

impl Loader {
    /// Binds a loader to `path`.
    ///
    /// Fails with [`LoadError::NotFound`] when the path does not exist, then with
    /// [`LoadError::UnsupportedFormat`] when the extension is not recognised.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(LoadError::NotFound(path));
        }
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let Some(kind) = SourceKind::from_extension(&extension) else {
            return Err(LoadError::UnsupportedFormat { path, extension });
        };
        Ok(Self { path, kind })
    }

    /// The bound path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The detected format.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Sheet names of a workbook, in workbook order.
    ///
    /// CSV and JSON sources have no sheets: this logs a warning and returns `Ok(None)`.
    pub fn list_sub_sheets(&self) -> Result<Option<Vec<String>>> {
        if !self.kind.is_spreadsheet() {
            tracing::warn!(
                path = %self.path.display(),
                kind = %self.kind,
                "sheet listing is only available for spreadsheets"
            );
            return Ok(None);
        }
        spreadsheet::sheet_names(&self.path, self.kind).map(Some)
    }

    /// Reads the source into a table.
    ///
    /// Workbooks read `sheet`, or their first sheet when `None`. Other formats read the
    /// whole file and ignore `sheet`.
    pub fn load(&self, sheet: Option<&str>) -> Result<Table> {
        let table = match self.kind {
            SourceKind::Xlsx | SourceKind::Xls => {
                spreadsheet::load_sheet(&self.path, self.kind, sheet)?
            }
            SourceKind::Csv => delimited::load_csv(&self.path)?,
            SourceKind::Json => json::load_json(&self.path)?,
        };
        tracing::info!(
            path = %self.path.display(),
            kind = %self.kind,
            rows = table.row_count(),
            columns = table.column_count(),
            "loaded source"
        );
        Ok(table)
    }
}
