// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::Path;

use crate::document::ReportDocument;

/// Where a rendered artifact goes.
#[derive(Debug)]
pub enum RenderTarget<'a> {
    /// A standalone PNG file.
    File(&'a Path),
    /// The next page of an open report document.
    Document(&'a mut ReportDocument),
}

impl<'a> From<&'a Path> for RenderTarget<'a> {
    fn from(path: &'a Path) -> Self {
        Self::File(path)
    }
}

impl<'a> From<&'a mut ReportDocument> for RenderTarget<'a> {
    fn from(doc: &'a mut ReportDocument) -> Self {
        Self::Document(doc)
    }
}
