// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Report errors.

use std::io;
use std::path::PathBuf;

use tally_core::TableError;
use tally_load::LoadError;
use tally_render::RenderError;
use thiserror::Error;

/// Any failure that aborts a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// The input could not be opened or parsed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Date enrichment of the loaded table failed.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A query referenced a missing column or met an unusable value.
    #[error("query {query}: {source}")]
    Query {
        /// Query name.
        query: String,
        /// Underlying table error.
        #[source]
        source: TableError,
    },
    /// An image or the report document could not be produced.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// A directory or output file could not be written.
    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Intermediate results could not be printed.
    #[error("cannot print results: {0}")]
    Print(#[source] io::Error),
}

impl ReportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for report runs.
pub type Result<T, E = ReportError> = core::result::Result<T, E>;
