// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tiny measure/arrange layout helper for charts.
//!
//! - **Measure**: guides (title, axes) report the thickness they need.
//! - **Arrange**: the plot rectangle is whatever remains of the view, and guides are placed
//!   adjacent to it.

use kurbo::Rect;

/// A width/height pair used by chart layout.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    /// Width in scene units.
    pub width: f64,
    /// Height in scene units.
    pub height: f64,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Layout inputs for a single chart: a plot area plus an optional title and axes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChartLayoutSpec {
    /// Optional chart title thickness (reserved above the plot and guides).
    pub title_top: Option<f64>,
    /// Outer chart bounds; the plot gets whatever the guides leave over.
    pub view_size: Size,
    /// Extra padding around the whole chart (applied on all sides).
    pub outer_padding: f64,
    /// Left axis thickness, if the chart has one.
    pub axis_left: Option<f64>,
    /// Bottom axis thickness, if the chart has one.
    pub axis_bottom: Option<f64>,
}

/// Output of the arrange pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartLayout {
    /// Outer chart bounds.
    pub view: Rect,
    /// Reserved rectangle for the chart title (if any).
    pub title_top: Option<Rect>,
    /// The plot (data) rectangle.
    pub plot: Rect,
    /// Reserved rectangle for the left axis (if any).
    pub axis_left: Option<Rect>,
    /// Reserved rectangle for the bottom axis (if any).
    pub axis_bottom: Option<Rect>,
}

impl ChartLayout {
    /// Computes a layout from the provided specification.
    pub fn arrange(spec: &ChartLayoutSpec) -> Self {
        let outer_padding = spec.outer_padding.max(0.0);
        let title_top_h = spec.title_top.unwrap_or(0.0).max(0.0);
        let axis_left_w = spec.axis_left.unwrap_or(0.0).max(0.0);
        let axis_bottom_h = spec.axis_bottom.unwrap_or(0.0).max(0.0);

        let margin_left = outer_padding + axis_left_w;
        let margin_right = outer_padding;
        let margin_top = outer_padding + title_top_h;
        let margin_bottom = outer_padding + axis_bottom_h;

        let view = Rect::new(
            0.0,
            0.0,
            spec.view_size.width.max(0.0),
            spec.view_size.height.max(0.0),
        );
        let plot_w = (view.width() - margin_left - margin_right).max(0.0);
        let plot_h = (view.height() - margin_top - margin_bottom).max(0.0);
        let plot = Rect::new(
            margin_left,
            margin_top,
            margin_left + plot_w,
            margin_top + plot_h,
        );

        let axis_left = (axis_left_w > 0.0)
            .then(|| Rect::new(plot.x0 - axis_left_w, plot.y0, plot.x0, plot.y1));
        let axis_bottom = (axis_bottom_h > 0.0)
            .then(|| Rect::new(plot.x0, plot.y1, plot.x1, plot.y1 + axis_bottom_h));
        let title_top = (title_top_h > 0.0)
            .then(|| Rect::new(0.0, outer_padding, view.x1, outer_padding + title_top_h));

        Self {
            view,
            title_top,
            plot,
            axis_left,
            axis_bottom,
        }
    }
}
