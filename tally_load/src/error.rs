// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loader errors.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed underlying cause of a [`LoadError::ReadError`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors raised while opening or parsing a data source.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not exist.
    #[error("no such file: `{}`", .0.display())]
    NotFound(PathBuf),
    /// The extension is not one of `.xlsx`, `.xls`, `.csv` or `.json`.
    #[error(
        "unsupported extension `{extension}` for `{}` (expected .xlsx, .xls, .csv or .json)",
        path.display()
    )]
    UnsupportedFormat {
        /// The rejected path.
        path: PathBuf,
        /// Its extension, lowercased; empty when there is none.
        extension: String,
    },
    /// The source exists but could not be parsed.
    #[error("cannot read `{}`: {source}", path.display())]
    ReadError {
        /// The source being read.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::ReadError {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// Result alias for loading.
pub type Result<T, E = LoadError> = core::result::Result<T, E>;
