// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG rasterisation via `resvg`.

use core::fmt;

use kurbo::Rect;
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

use crate::error::{RenderError, Result};

/// Output sizing: a uniform scale from layout units to pixels, capped per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// Pixels per layout unit.
    pub scale: f64,
    /// Largest permitted width in pixels.
    pub max_width: u32,
    /// Largest permitted height in pixels.
    pub max_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            max_width: 1800,
            max_height: 1800,
        }
    }
}

impl RenderOptions {
    /// Sets the pixel scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the pixel caps.
    pub fn with_max_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    /// Pixel size for a scene covering `view`.
    ///
    /// The view is scaled by `scale`, then shrunk uniformly until it fits the caps, so the
    /// aspect ratio is preserved. Each side is at least one pixel.
    pub fn pixel_size(&self, view: Rect) -> (u32, u32) {
        let scale = if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        };
        let w = (view.width() * scale).max(1.0);
        let h = (view.height() * scale).max(1.0);
        let fit = (f64::from(self.max_width.max(1)) / w)
            .min(f64::from(self.max_height.max(1)) / h)
            .min(1.0);
        (to_px(w * fit), to_px(h * fit))
    }
}

#[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
fn to_px(v: f64) -> u32 {
    v.round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Turns SVG documents into pixmaps.
///
/// Holds the font database, so create one per run and reuse it.
pub struct Rasterizer {
    options: usvg::Options<'static>,
}

impl fmt::Debug for Rasterizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rasterizer")
            .field("fonts", &self.options.fontdb.len())
            .finish_non_exhaustive()
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Creates a rasteriser with the system fonts loaded.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        tracing::debug!(fonts = options.fontdb.len(), "loaded system fonts");
        Self { options }
    }

    /// Parses `svg` and paints it onto a white `width` x `height` pixmap.
    pub fn rasterize(&self, svg: &str, width: u32, height: u32) -> Result<RasterImage> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Raster { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);
        resvg::render(&tree, Transform::default(), &mut pixmap.as_mut());
        Ok(RasterImage {
            width,
            height,
            pixmap,
        })
    }
}

/// A rendered, opaque image.
pub struct RasterImage {
    width: u32,
    height: u32,
    pixmap: Pixmap,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl RasterImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Encodes the image as PNG.
    pub fn png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Png(e.to_string()))
    }

    /// Packed 8-bit RGB samples, row-major.
    pub fn rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixmap.pixels().len() * 3);
        for px in self.pixmap.pixels() {
            let c = px.demultiply();
            out.extend_from_slice(&[c.red(), c.green(), c.blue()]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Rect::new(0.0, 0.0, 800.0, 600.0), 1.0, (800, 600))]
    #[case(Rect::new(0.0, 0.0, 800.0, 600.0), 2.0, (1600, 1200))]
    #[case(Rect::new(0.0, 0.0, 3600.0, 900.0), 1.0, (1800, 450))]
    #[case(Rect::new(0.0, 0.0, 400.0, 4000.0), 1.0, (180, 1800))]
    #[case(Rect::new(0.0, 0.0, 0.0, 0.0), 1.0, (1, 1))]
    fn pixel_size_scales_then_caps(
        #[case] view: Rect,
        #[case] scale: f64,
        #[case] expected: (u32, u32),
    ) {
        let options = RenderOptions::default().with_scale(scale);
        assert_eq!(options.pixel_size(view), expected);
    }

    #[test]
    fn rasterizes_onto_white() {
        let raster = Rasterizer::default();
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="2" viewBox="0 0 4 2"><rect x="0" y="0" width="2" height="2" fill="#ff0000"/></svg>"##;
        let image = raster.rasterize(svg, 4, 2).unwrap();
        assert_eq!((image.width(), image.height()), (4, 2));
        let rgb = image.rgb();
        assert_eq!(rgb.len(), 4 * 2 * 3);
        assert_eq!(&rgb[0..3], &[255, 0, 0]);
        assert_eq!(&rgb[9..12], &[255, 255, 255]);
        let png = image.png().unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn malformed_svg_is_an_error() {
        let raster = Rasterizer::default();
        let err = raster.rasterize("<svg", 4, 4).unwrap_err();
        assert!(matches!(err, RenderError::Svg(_)));
    }
}
