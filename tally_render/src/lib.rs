// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output backends for tally scenes.
//!
//! A [`Scene`] is serialised to SVG ([`scene_to_svg`]), rasterised with `resvg`
//! ([`Rasterizer`]) and then either written as a PNG file or appended as a page of a
//! [`ReportDocument`]. [`Renderer`] wires the table-grid and histogram chart specs to those
//! steps.

mod document;
mod error;
mod raster;
mod svg;
mod target;

use std::fs;

use tally_charts::{HistogramSpec, TableGridSpec};
use tally_core::{Scene, Table};
use tally_text::HeuristicTextMeasurer;
use tally_transforms::histogram;

pub use document::ReportDocument;
pub use error::{RenderError, Result};
pub use raster::{RasterImage, Rasterizer, RenderOptions};
pub use svg::{FONT_FAMILY, scene_to_svg};
pub use target::RenderTarget;

/// Id base of the marks in each rendered scene; every image is its own scene.
const SCENE_ID_BASE: u64 = 1;

/// Renders result tables and histograms to PNG files or report pages.
#[derive(Debug, Default)]
pub struct Renderer {
    measurer: HeuristicTextMeasurer,
    rasterizer: Rasterizer,
    options: RenderOptions,
}

impl Renderer {
    /// Creates a renderer with the given sizing options.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            measurer: HeuristicTextMeasurer,
            rasterizer: Rasterizer::new(),
            options,
        }
    }

    /// Sizing options in use.
    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders `table` as a styled grid.
    ///
    /// At most `max_rows` body rows are drawn; a note above the grid states the full row
    /// count when rows were cut.
    pub fn render_table(
        &self,
        table: &Table,
        title: &str,
        max_rows: usize,
        target: RenderTarget<'_>,
    ) -> Result<()> {
        let spec = TableGridSpec::new(SCENE_ID_BASE, title).with_max_rows(max_rows);
        if let Some(note) = spec.truncation_note(table.row_count()) {
            tracing::debug!(title, %note, "table truncated");
        }
        let scene = spec.scene(table, &self.measurer);
        self.render_scene(&scene, target)
    }

    /// Renders a `bin_count`-bin histogram of the numeric cells in `column`.
    pub fn render_histogram(
        &self,
        table: &Table,
        column: &str,
        title: &str,
        bin_count: usize,
        target: RenderTarget<'_>,
    ) -> Result<()> {
        let bins = histogram(table, column, bin_count)?;
        let scene =
            HistogramSpec::new(SCENE_ID_BASE, title, column).scene(&bins, &self.measurer);
        self.render_scene(&scene, target)
    }

    /// Rasterises `scene` and sends it to `target`.
    pub fn render_scene(&self, scene: &Scene, target: RenderTarget<'_>) -> Result<()> {
        let image = self.rasterize(scene)?;
        match target {
            RenderTarget::File(path) => {
                let png = image.png()?;
                fs::write(path, &png).map_err(|e| RenderError::io(path, e))?;
                tracing::info!(
                    path = %path.display(),
                    width = image.width(),
                    height = image.height(),
                    "wrote image"
                );
            }
            RenderTarget::Document(doc) => doc.add_page(&image),
        }
        Ok(())
    }

    /// Rasterises `scene` at the size given by the render options.
    pub fn rasterize(&self, scene: &Scene) -> Result<RasterImage> {
        let (width, height) = self.options.pixel_size(scene.view());
        let svg = scene_to_svg(scene, width, height);
        self.rasterizer.rasterize(&svg, width, height)
    }
}
