// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Histogram charts.

use kurbo::Point;
use peniko::color::palette::css;
use peniko::{Brush, Color};
use tally_core::{MarkId, Scene, Stroke, TextAnchor, TextBaseline};
use tally_text::{FontWeight, TextMeasurer};
use tally_transforms::Bins;

use crate::axis::{AxisSpec, AxisStyle, GridStyle};
use crate::bar_mark::BarMarkSpec;
use crate::layout::{ChartLayout, ChartLayoutSpec, Size};
use crate::rect_mark::RectMarkSpec;
use crate::scale::ScaleLinearSpec;
use crate::table_grid::TITLE_BLUE;
use crate::text_mark::TextMarkSpec;
use crate::title::TitleSpec;
use crate::z_order;

/// Frequency-label slate (`#334155`).
pub const LABEL_SLATE: Color = Color::from_rgb8(0x33, 0x41, 0x55);

/// Layout and styling for a histogram of one numeric column.
#[derive(Clone, Debug)]
pub struct HistogramSpec {
    /// Stable-id base for generated marks.
    pub id_base: u64,
    /// Chart title.
    pub title: String,
    /// X-axis title (the binned column).
    pub x_title: String,
    /// Y-axis title.
    pub y_title: String,
    /// Outer chart size.
    pub size: Size,
    /// Bar fill.
    pub bar_fill: Brush,
    /// Bar outline.
    pub bar_stroke: Stroke,
    /// Frequency label paint.
    pub label_fill: Brush,
    /// Frequency label font size.
    pub label_font_size: f64,
}

impl HistogramSpec {
    /// Creates a histogram spec with the report styling.
    pub fn new(id_base: u64, title: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            id_base,
            title: title.into(),
            x_title: column.into(),
            y_title: String::from("frequency"),
            size: Size::new(800.0, 600.0),
            bar_fill: TITLE_BLUE.with_alpha(0.7).into(),
            bar_stroke: Stroke::solid(css::BLACK, 1.0),
            label_fill: LABEL_SLATE.into(),
            label_font_size: 11.0,
        }
    }

    /// Lays out the bins and returns the scene.
    pub fn scene(&self, bins: &Bins, measurer: &dyn TextMeasurer) -> Scene {
        let x_domain = (
            bins.edges.first().copied().unwrap_or(0.0),
            bins.edges.last().copied().unwrap_or(1.0),
        );
        // Integer-valued ticks: the raw step never drops below one.
        let max_count = bins.max_count().max(1);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "clamped to a tiny range before the cast"
        )]
        let y_ticks = max_count.clamp(1, 5) as usize;
        let y_top = max_count as f64 * 1.15;

        let axis_style = AxisStyle {
            label_font_size: 11.0,
            title_font_size: 13.0,
            ..AxisStyle::default()
        };
        let grid = GridStyle {
            stroke: Stroke::solid(css::BLACK.with_alpha(0.5), 0.8).dashed(4.0, 3.0),
        };
        let x_axis = AxisSpec::bottom(self.id_base + 10_000, ScaleLinearSpec::new(x_domain))
            .with_tick_count(6)
            .with_style(axis_style.clone())
            .with_grid(grid.clone())
            .with_title(self.x_title.clone());
        let y_axis = AxisSpec::left(
            self.id_base + 20_000,
            ScaleLinearSpec::new((0.0, y_top)).with_nice(true),
        )
        .with_tick_count(y_ticks)
        .with_style(axis_style)
        .with_grid(grid)
        .with_title(self.y_title.clone());
        let title = TitleSpec::new(MarkId::from_raw(self.id_base).child(1), &self.title)
            .with_font_size(16.0)
            .with_font_weight(FontWeight::BOLD)
            .with_fill(TITLE_BLUE)
            .with_padding(8.0);

        let layout = ChartLayout::arrange(&ChartLayoutSpec {
            title_top: Some(title.measure(measurer)),
            view_size: self.size,
            outer_padding: 16.0,
            axis_left: Some(y_axis.measure(measurer)),
            axis_bottom: Some(x_axis.measure(measurer)),
        });
        let plot = layout.plot;
        let x_scale = x_axis.scale_linear(plot);
        let y_scale = y_axis.scale_linear(plot);

        let mut scene = Scene::new(layout.view);
        scene.push(
            RectMarkSpec::new(MarkId::from_raw(self.id_base), layout.view)
                .with_fill(css::WHITE)
                .with_z_index(z_order::PLOT_BACKGROUND)
                .mark(),
        );
        if let Some(rect) = layout.title_top {
            scene.extend(title.marks(measurer, rect));
        }
        if let Some(rect) = layout.axis_bottom {
            scene.extend(x_axis.marks(plot, rect));
        }
        if let Some(rect) = layout.axis_left {
            scene.extend(y_axis.marks(plot, rect));
        }

        let bars = bins.iter().map(|(lo, hi, n)| (lo, hi, n as f64));
        scene.extend(
            BarMarkSpec::new(self.id_base + 100, x_scale, y_scale)
                .with_fill(self.bar_fill.clone())
                .with_stroke(self.bar_stroke.clone())
                .marks(bars),
        );
        for (i, (lo, hi, n)) in bins.iter().enumerate() {
            let top = y_scale.map(n as f64);
            scene.push(
                TextMarkSpec::new(
                    MarkId::from_raw(self.id_base + 5_000).child(i as u64),
                    Point::new(x_scale.map(0.5 * (lo + hi)), top - 3.0),
                    n.to_string(),
                )
                .with_font_size(self.label_font_size)
                .with_fill(self.label_fill.clone())
                .with_anchor(TextAnchor::Middle)
                .with_baseline(TextBaseline::Alphabetic)
                .with_z_index(z_order::AXIS_LABELS)
                .mark(),
            );
        }

        tracing::debug!(
            bins = bins.len(),
            total = bins.total(),
            plot_w = plot.width(),
            plot_h = plot.height(),
            "histogram laid out"
        );
        scene
    }
}
