// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis mark generation.
//!
//! A single [`AxisSpec`] with an `orient` of `bottom` or `left` can be measured (for layout)
//! and arranged (to generate marks) against a linear scale.

use std::sync::Arc;

use kurbo::Rect;
use peniko::Brush;
use peniko::color::palette::css;
use tally_core::{Mark, MarkId, Stroke, TextAnchor, TextBaseline};
use tally_text::{TextMeasurer, TextStyle};

use crate::format::format_tick_with_step;
use crate::rule_mark::RuleMarkSpec;
use crate::scale::{ScaleLinear, ScaleLinearSpec, tick_step};
use crate::text_mark::TextMarkSpec;
use crate::z_order;

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Stroke for the axis domain line and tick marks.
    pub rule: Stroke,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            rule: Stroke::solid(css::BLACK, 1.0),
            label_fill: css::BLACK.into(),
            label_font_size: 10.0,
            title_fill: css::BLACK.into(),
            title_font_size: 11.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke for gridlines.
    pub stroke: Stroke,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: Stroke::solid(css::BLACK.with_alpha(40.0 / 255.0), 1.0),
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
}

/// A linear axis specification.
#[derive(Clone)]
pub struct AxisSpec {
    /// Stable-id base; each generated mark uses a deterministic offset from this base.
    pub id_base: u64,
    /// The axis scale specification.
    pub scale: ScaleLinearSpec,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Tick line length (in pixels).
    pub tick_size: f64,
    /// Whether to draw tick marks.
    pub ticks: bool,
    /// Whether to draw tick labels.
    pub labels: bool,
    /// Whether to draw the axis domain line.
    pub show_domain: bool,
    /// Padding between the tick end and the tick label.
    pub tick_padding: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional gridline styling; if `Some`, gridlines span the plot area.
    pub grid: Option<GridStyle>,
    /// Optional axis title text.
    pub title: Option<String>,
    /// Distance from tick labels to the title.
    pub title_offset: f64,
    /// Optional tick label formatter, called with `(value, tick_step)`.
    pub tick_formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("id_base", &self.id_base)
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size", &self.tick_size)
            .field("ticks", &self.ticks)
            .field("labels", &self.labels)
            .field("show_domain", &self.show_domain)
            .field("tick_padding", &self.tick_padding)
            .field("style", &self.style)
            .field("grid", &self.grid)
            .field("title", &self.title)
            .field("title_offset", &self.title_offset)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification with `tick_count = 10`, `tick_size = 5`, no title and
    /// no grid.
    pub fn new(id_base: u64, scale: ScaleLinearSpec, orient: AxisOrient) -> Self {
        let tick_padding = match orient {
            AxisOrient::Bottom => 4.0,
            AxisOrient::Left => 6.0,
        };
        Self {
            id_base,
            scale,
            orient,
            tick_count: 10,
            tick_size: 5.0,
            ticks: true,
            labels: true,
            show_domain: true,
            tick_padding,
            style: AxisStyle::default(),
            grid: None,
            title: None,
            title_offset: 8.0,
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self::new(id_base, scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(id_base: u64, scale: ScaleLinearSpec) -> Self {
        Self::new(id_base, scale, AxisOrient::Left)
    }

    /// Set the approximate tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(f64, f64) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Enable gridlines using the provided style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Returns the scale mapping axis values into plot coordinates.
    pub fn scale_linear(&self, plot: Rect) -> ScaleLinear {
        let range = match self.orient {
            AxisOrient::Bottom => (plot.x0, plot.x1),
            AxisOrient::Left => (plot.y1, plot.y0),
        };
        self.scale.instantiate_resolved(range, self.tick_count)
    }

    fn tick_values(&self) -> (Vec<f64>, f64) {
        let domain = self.scale.resolved_domain(self.tick_count);
        let ticks: Vec<f64> = ScaleLinear::new(domain, (0.0, 1.0))
            .ticks(self.tick_count)
            .into_iter()
            .filter(|v| *v >= domain.0 - 1e-9 && *v <= domain.1 + 1e-9)
            .collect();
        let step = tick_step(&ticks);
        (ticks, step)
    }

    fn format_tick(&self, v: f64, step: f64) -> String {
        match &self.tick_formatter {
            Some(f) => (f)(v, step),
            None => format_tick_with_step(v, step),
        }
    }

    /// Measure the thickness this axis needs along its normal direction.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let tick_extent = if self.ticks {
            self.tick_size.abs()
        } else {
            0.0
        };
        let label_style = TextStyle::new(self.style.label_font_size);
        let mut max_label_extent = 0.0_f64;
        if self.labels {
            let (ticks, step) = self.tick_values();
            for v in ticks {
                let metrics = measurer.measure(&self.format_tick(v, step), &label_style);
                let extent = match self.orient {
                    AxisOrient::Bottom => metrics.line_height(),
                    AxisOrient::Left => metrics.advance_width,
                };
                max_label_extent = max_label_extent.max(extent);
            }
        }
        let label_thickness = if self.labels {
            self.tick_padding.max(0.0) + max_label_extent
        } else {
            0.0
        };
        let mut out = tick_extent + label_thickness;
        if self.title.is_some() {
            // Left titles are rotated, so their height maps to width.
            out += self.title_offset.max(0.0) + self.style.title_font_size;
        }
        out
    }

    /// Generate axis marks for the given plot rectangle and arranged axis rectangle.
    ///
    /// `axis_rect` should be the reserved region for this axis, adjacent to `plot`.
    pub fn marks(&self, plot: Rect, axis_rect: Rect) -> Vec<Mark> {
        let scale = self.scale_linear(plot);
        let (ticks, step) = self.tick_values();
        let tick_size = self.tick_size.abs();
        let tick_extent = if self.ticks { tick_size } else { 0.0 };
        let label_gap = self.tick_padding.max(0.0);
        let mut out = Vec::new();

        for (i, v) in ticks.iter().copied().enumerate() {
            let p = scale.map(v);
            let i = i as u64;

            if let Some(grid) = &self.grid {
                let rule = match self.orient {
                    AxisOrient::Bottom => {
                        RuleMarkSpec::vertical(self.mark_id(2000 + i), p, plot.y0, plot.y1)
                    }
                    AxisOrient::Left => {
                        RuleMarkSpec::horizontal(self.mark_id(2000 + i), p, plot.x0, plot.x1)
                    }
                };
                out.push(
                    rule.with_stroke(grid.stroke.clone())
                        .with_z_index(z_order::GRID_LINES)
                        .mark(),
                );
            }

            if self.ticks {
                let id = self.mark_id(1 + i);
                let rule = match self.orient {
                    AxisOrient::Bottom => {
                        RuleMarkSpec::vertical(id, p, plot.y1, plot.y1 + tick_size)
                    }
                    AxisOrient::Left => {
                        RuleMarkSpec::horizontal(id, p, plot.x0 - tick_size, plot.x0)
                    }
                };
                out.push(
                    rule.with_stroke(self.style.rule.clone())
                        .with_z_index(z_order::AXIS_RULES)
                        .mark(),
                );
            }

            if self.labels {
                let (pos, anchor, baseline) = match self.orient {
                    AxisOrient::Bottom => (
                        (p, plot.y1 + tick_extent + label_gap),
                        TextAnchor::Middle,
                        TextBaseline::Hanging,
                    ),
                    AxisOrient::Left => (
                        (plot.x0 - tick_extent - label_gap, p),
                        TextAnchor::End,
                        TextBaseline::Middle,
                    ),
                };
                out.push(self.text(
                    1000 + i,
                    z_order::AXIS_LABELS,
                    pos,
                    self.format_tick(v, step),
                    (anchor, baseline, 0.0),
                    self.style.label_font_size,
                    &self.style.label_fill,
                ));
            }
        }

        if self.show_domain {
            let domain = match self.orient {
                AxisOrient::Bottom => {
                    RuleMarkSpec::horizontal(self.mark_id(0), plot.y1, plot.x0, plot.x1)
                }
                AxisOrient::Left => {
                    RuleMarkSpec::vertical(self.mark_id(0), plot.x0, plot.y0, plot.y1)
                }
            };
            out.push(
                domain
                    .with_stroke(self.style.rule.clone())
                    .with_z_index(z_order::AXIS_RULES)
                    .mark(),
            );
        }

        if let Some(title) = &self.title {
            let size = self.style.title_font_size;
            let (pos, layout) = match self.orient {
                AxisOrient::Bottom => (
                    (0.5 * (plot.x0 + plot.x1), axis_rect.y1 - size),
                    (TextAnchor::Middle, TextBaseline::Hanging, 0.0),
                ),
                AxisOrient::Left => (
                    (axis_rect.x0 + 0.5 * size, 0.5 * (plot.y0 + plot.y1)),
                    (TextAnchor::Middle, TextBaseline::Middle, -90.0),
                ),
            };
            out.push(self.text(
                9000,
                z_order::AXIS_TITLES,
                pos,
                title.clone(),
                layout,
                size,
                &self.style.title_fill,
            ));
        }

        out
    }

    fn mark_id(&self, offset: u64) -> MarkId {
        MarkId::from_raw(self.id_base).child(offset)
    }

    fn text(
        &self,
        offset: u64,
        z_index: i32,
        pos: (f64, f64),
        text: String,
        (anchor, baseline, angle): (TextAnchor, TextBaseline, f64),
        font_size: f64,
        fill: &Brush,
    ) -> Mark {
        TextMarkSpec::new(self.mark_id(offset), pos.into(), text)
            .with_font_size(font_size)
            .with_anchor(anchor)
            .with_baseline(baseline)
            .with_angle(angle)
            .with_fill(fill.clone())
            .with_z_index(z_index)
            .mark()
    }
}
