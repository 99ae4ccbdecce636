// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for report layout.
//!
//! Table grids size their columns from the widest cell, and chart guides reserve margins for
//! tick labels and titles. Both need text extents before any glyph is drawn, so layout code
//! depends on the small [`TextMeasurer`] interface defined here rather than on a shaping
//! engine. The rasteriser downstream does the real shaping.

/// A minimal text measurement interface used by table and chart layout.
pub trait TextMeasurer {
    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers split on `\n` themselves.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Text styling inputs relevant to measurement and rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in layout units (pixels at scale 1).
    pub font_size: f64,
    /// Font weight (`400` for normal, `700` for bold).
    pub font_weight: FontWeight,
}

impl TextStyle {
    /// Creates a normal-weight style with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::NORMAL,
        }
    }

    /// Returns the same style with a bold weight.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::BOLD;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);

    /// Returns `true` for weights at or above semi-bold.
    #[must_use]
    pub fn is_bold(self) -> bool {
        self.0 >= 600
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// The advance width.
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A heuristic measurer that needs no font data.
///
/// It assumes an average glyph width of ~0.6em (~0.66em for bold) and a baseline at ~0.8em.
/// Good enough to size grid columns for the sans-serif faces the rasteriser picks.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let em = if style.font_weight.is_bold() { 0.66 } else { 0.6 };
        let advance_width = em * style.font_size * text.chars().count() as f64;
        TextMetrics {
            advance_width,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
            leading: 0.0,
        }
    }
}
