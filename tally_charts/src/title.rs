// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Image titles.
//!
//! Titles reserve space in [`crate::ChartLayout`] and in table grids, and render as one or two
//! text marks (title plus an optional subtitle line).

use kurbo::Rect;
use peniko::Brush;
use tally_core::{Mark, MarkId, TextAnchor, TextBaseline, TextMark};
use tally_text::{FontWeight, TextMeasurer, TextStyle};

use crate::z_order;

/// A chart- or table-level title.
#[derive(Clone, Debug)]
pub struct TitleSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Title text (unshaped).
    pub text: String,
    /// Optional subtitle text (unshaped), drawn below the title.
    pub subtitle: Option<String>,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Font weight of the title line.
    pub font_weight: FontWeight,
    /// Subtitle font size in scene coordinates.
    pub subtitle_font_size: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Subtitle fill paint.
    pub subtitle_fill: Brush,
    /// Extra vertical padding around the title text, applied above and below.
    pub padding: f64,
    /// Additional vertical gap between the title and subtitle.
    pub subtitle_gap: f64,
    /// Horizontal anchor within the title rectangle.
    pub anchor: TextAnchor,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl TitleSpec {
    /// Creates a title spec with default styling.
    pub fn new(id: MarkId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            subtitle: None,
            font_size: 12.0,
            font_weight: FontWeight::NORMAL,
            subtitle_font_size: 11.0,
            fill: Brush::default(),
            subtitle_fill: Brush::default(),
            padding: 6.0,
            subtitle_gap: 2.0,
            anchor: TextAnchor::Middle,
            z_index: z_order::TITLES,
        }
    }

    fn title_style(&self) -> TextStyle {
        TextStyle::new(self.font_size).with_weight(self.font_weight)
    }

    /// Returns the thickness (height) reserved by this title in layout.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> f64 {
        let pad = self.padding.max(0.0);
        let title_metrics = measurer.measure(&self.text, &self.title_style());
        let mut total = 2.0 * pad + title_metrics.line_height();
        if let Some(sub) = &self.subtitle {
            let sub_metrics = measurer.measure(sub, &TextStyle::new(self.subtitle_font_size));
            total += self.subtitle_gap.max(0.0) + sub_metrics.line_height();
        }
        total.max(0.0)
    }

    /// Widest line of the title block.
    pub fn measure_width(&self, measurer: &dyn TextMeasurer) -> f64 {
        let title = measurer.measure(&self.text, &self.title_style()).advance_width;
        let sub = self.subtitle.as_ref().map_or(0.0, |s| {
            measurer
                .measure(s, &TextStyle::new(self.subtitle_font_size))
                .advance_width
        });
        title.max(sub)
    }

    /// Sets the subtitle text.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the title font weight.
    pub fn with_font_weight(mut self, font_weight: FontWeight) -> Self {
        self.font_weight = font_weight;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the subtitle fill paint.
    pub fn with_subtitle_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.subtitle_fill = fill.into();
        self
    }

    /// Sets the subtitle font size.
    pub fn with_subtitle_font_size(mut self, font_size: f64) -> Self {
        self.subtitle_font_size = font_size;
        self
    }

    /// Sets the vertical padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the horizontal anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Emits the title marks placed within the provided title rectangle.
    pub fn marks(&self, measurer: &dyn TextMeasurer, title_rect: Rect) -> Vec<Mark> {
        let x = match self.anchor {
            TextAnchor::Start => title_rect.x0,
            TextAnchor::Middle => 0.5 * (title_rect.x0 + title_rect.x1),
            TextAnchor::End => title_rect.x1,
        };

        let pad = self.padding.max(0.0);
        let th = measurer.measure(&self.text, &self.title_style()).line_height();
        let y_title = title_rect.y0 + pad + 0.5 * th;

        let mut out = vec![Mark::new(
            self.id,
            self.z_index,
            TextMark {
                pos: (x, y_title).into(),
                text: self.text.clone(),
                font_size: self.font_size,
                font_weight: self.font_weight,
                anchor: self.anchor,
                baseline: TextBaseline::Middle,
                angle: 0.0,
                fill: self.fill.clone(),
            },
        )];

        if let Some(subtitle) = &self.subtitle {
            let sh = measurer
                .measure(subtitle, &TextStyle::new(self.subtitle_font_size))
                .line_height();
            let y_sub = y_title + 0.5 * th + self.subtitle_gap.max(0.0) + 0.5 * sh;
            out.push(Mark::new(
                self.id.child(1),
                self.z_index,
                TextMark {
                    pos: (x, y_sub).into(),
                    text: subtitle.clone(),
                    font_size: self.subtitle_font_size,
                    font_weight: FontWeight::NORMAL,
                    anchor: self.anchor,
                    baseline: TextBaseline::Middle,
                    angle: 0.0,
                    fill: self.subtitle_fill.clone(),
                },
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use tally_text::HeuristicTextMeasurer;

    use super::*;

    #[test]
    fn subtitle_increases_measured_height_and_emits_two_marks() {
        let measurer = HeuristicTextMeasurer;
        let plain = TitleSpec::new(MarkId::from_raw(10), "Title").with_font_size(12.0);
        let title = plain
            .clone()
            .with_subtitle("Subtitle")
            .with_subtitle_font_size(10.0);

        let h = title.measure(&measurer);
        assert!(h > plain.measure(&measurer), "subtitle adds height");

        let rect = Rect::new(0.0, 0.0, 200.0, h);
        let marks = title.marks(&measurer, rect);
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[1].as_text().unwrap().text, "Subtitle");
        assert_eq!(marks[1].id, MarkId::from_raw(11));
    }

    #[test]
    fn bold_titles_measure_wider() {
        let measurer = HeuristicTextMeasurer;
        let t = TitleSpec::new(MarkId::from_raw(1), "Sales");
        let bold = t.clone().with_font_weight(FontWeight::BOLD);
        assert!(bold.measure_width(&measurer) > t.measure_width(&measurer), "bold is wider");
    }
}
