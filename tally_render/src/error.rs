// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render errors.

use std::io;
use std::path::PathBuf;

use tally_core::TableError;
use thiserror::Error;

/// Errors raised while rendering scenes or writing output files.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input table could not be read (missing column, non-numeric histogram input).
    #[error(transparent)]
    Table(#[from] TableError),
    /// The generated SVG was rejected by the parser.
    #[error("invalid SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),
    /// A pixmap of the requested size could not be allocated.
    #[error("cannot allocate a {width}x{height} raster")]
    Raster {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(String),
    /// Writing an output file failed.
    #[error("cannot write `{}`: {source}", path.display())]
    Io {
        /// File being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A document was finished without any pages.
    #[error("report document `{}` has no pages", .0.display())]
    EmptyDocument(PathBuf),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for rendering.
pub type Result<T, E = RenderError> = core::result::Result<T, E>;
