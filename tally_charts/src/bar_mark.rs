// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interval bar mark generation.

use kurbo::Rect;
use peniko::Brush;
use tally_core::{Mark, MarkId, RectMark, Stroke};

use crate::scale::ScaleLinear;

/// Vertical bars spanning data-space x-intervals, as drawn by a histogram.
///
/// Each bar covers `[x0, x1]` along x and rises from `baseline` to its value along y.
#[derive(Clone, Debug)]
pub struct BarMarkSpec {
    /// Stable-id base; bar `i` uses `id_base + i`.
    pub id_base: u64,
    /// Scale for bar edges along x.
    pub x_scale: ScaleLinear,
    /// Scale for bar values along y.
    pub y_scale: ScaleLinear,
    /// Baseline in data units (typically `0.0`).
    pub baseline: f64,
    /// Fill paint for bars.
    pub fill: Brush,
    /// Optional bar outline.
    pub stroke: Option<Stroke>,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl BarMarkSpec {
    /// Creates a bar mark spec with `baseline = 0` and a default fill (`Brush::default()`).
    pub fn new(id_base: u64, x_scale: ScaleLinear, y_scale: ScaleLinear) -> Self {
        Self {
            id_base,
            x_scale,
            y_scale,
            baseline: 0.0,
            fill: Brush::default(),
            stroke: None,
            z_index: crate::z_order::SERIES_FILL,
        }
    }

    /// Sets the baseline in data units.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the bar outline.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates one rect per `(x0, x1, value)` interval. Zero-height bars are skipped.
    pub fn marks(&self, bars: impl IntoIterator<Item = (f64, f64, f64)>) -> Vec<Mark> {
        let y0 = self.y_scale.map(self.baseline);
        bars.into_iter()
            .enumerate()
            .filter(|(_, (_, _, v))| *v != self.baseline)
            .map(|(i, (x0, x1, v))| {
                let rect = Rect::new(
                    self.x_scale.map(x0),
                    self.y_scale.map(v),
                    self.x_scale.map(x1),
                    y0,
                )
                .abs();
                Mark::new(
                    MarkId::from_raw(self.id_base).child(i as u64),
                    self.z_index,
                    RectMark {
                        rect,
                        fill: self.fill.clone(),
                        stroke: self.stroke.clone(),
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn bars_span_intervals_and_skip_empty_bins() {
        let x = ScaleLinear::new((0.0, 4.0), (0.0, 400.0));
        let y = ScaleLinear::new((0.0, 10.0), (200.0, 0.0));
        let marks = BarMarkSpec::new(100, x, y)
            .with_fill(css::STEEL_BLUE)
            .marks([(0.0, 1.0, 5.0), (1.0, 2.0, 0.0), (2.0, 4.0, 10.0)]);
        assert_eq!(marks.len(), 2);
        let first = marks[0].as_rect().unwrap();
        assert_eq!(first.rect, Rect::new(0.0, 100.0, 100.0, 200.0));
        let last = marks[1].as_rect().unwrap();
        assert_eq!(last.rect, Rect::new(200.0, 0.0, 400.0, 200.0));
        assert_eq!(marks[1].id, MarkId::from_raw(102));
    }
}
