// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Styled table grids.
//!
//! A [`TableGridSpec`] lays a [`Table`] out as a bordered grid: a bold header row, alternating
//! body shading, and a title block above the grid. Tables longer than `max_rows` show their
//! head plus a truncation note.

use kurbo::{Point, Rect};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use tally_core::{Mark, MarkId, Scene, Stroke, Table, TextAnchor, TextBaseline};
use tally_text::{FontWeight, TextMeasurer, TextStyle};

use crate::rect_mark::RectMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::title::TitleSpec;
use crate::z_order;

/// Title blue (`#2563eb`).
pub const TITLE_BLUE: Color = Color::from_rgb8(0x25, 0x63, 0xeb);
/// Header background (`#dbeafe`).
pub const HEADER_FILL: Color = Color::from_rgb8(0xdb, 0xea, 0xfe);
/// Header text (`#1e293b`).
pub const HEADER_TEXT: Color = Color::from_rgb8(0x1e, 0x29, 0x3b);
/// Shaded body row (`#f3f4f6`).
pub const ROW_SHADE: Color = Color::from_rgb8(0xf3, 0xf4, 0xf6);

/// Layout and styling for a table image.
#[derive(Clone, Debug)]
pub struct TableGridSpec {
    /// Stable-id base for generated marks.
    pub id_base: u64,
    /// Title drawn above the grid.
    pub title: String,
    /// Maximum number of body rows drawn.
    pub max_rows: usize,
    /// Fraction digits for float cells.
    pub decimals: usize,
    /// Cell font size.
    pub font_size: f64,
    /// Horizontal cell padding (each side).
    pub cell_padding_x: f64,
    /// Vertical cell padding (each side).
    pub cell_padding_y: f64,
    /// Blank space around the whole image.
    pub margin: f64,
    /// Gap between the title block and the grid.
    pub title_gap: f64,
    /// Header row background.
    pub header_fill: Brush,
    /// Header text paint.
    pub header_text: Brush,
    /// Body row backgrounds, alternating starting with the first body row.
    pub row_fills: [Brush; 2],
    /// Body text paint.
    pub text_fill: Brush,
    /// Cell border.
    pub border: Stroke,
    /// Image background.
    pub background: Brush,
}

impl TableGridSpec {
    /// Creates a grid spec with the report styling.
    pub fn new(id_base: u64, title: impl Into<String>) -> Self {
        Self {
            id_base,
            title: title.into(),
            max_rows: 30,
            decimals: 2,
            font_size: 13.0,
            cell_padding_x: 12.0,
            cell_padding_y: 7.0,
            margin: 16.0,
            title_gap: 8.0,
            header_fill: HEADER_FILL.into(),
            header_text: HEADER_TEXT.into(),
            row_fills: [ROW_SHADE.into(), css::WHITE.into()],
            text_fill: css::BLACK.into(),
            border: Stroke::solid(css::BLACK, 1.0),
            background: css::WHITE.into(),
        }
    }

    /// Sets the maximum number of body rows drawn.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Sets the cell font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// The note shown when `total_rows` exceeds `max_rows`.
    pub fn truncation_note(&self, total_rows: usize) -> Option<String> {
        (total_rows > self.max_rows).then(|| {
            format!("Display limited to {} rows of {total_rows}.", self.max_rows)
        })
    }

    fn title_spec(&self, total_rows: usize) -> TitleSpec {
        let mut title = TitleSpec::new(MarkId::from_raw(self.id_base).child(1), &self.title)
            .with_font_size(17.0)
            .with_font_weight(FontWeight::BOLD)
            .with_fill(TITLE_BLUE)
            .with_subtitle_font_size(11.0)
            .with_subtitle_fill(css::GRAY)
            .with_padding(4.0);
        if let Some(note) = self.truncation_note(total_rows) {
            title = title.with_subtitle(note);
        }
        title
    }

    /// Lays out `table` and returns the scene, sized to fit its content.
    pub fn scene(&self, table: &Table, measurer: &dyn TextMeasurer) -> Scene {
        let shown = table.head(self.max_rows);
        let header: Vec<&str> = shown.column_names().collect();
        let body: Vec<Vec<String>> = (0..shown.row_count())
            .map(|r| {
                shown
                    .columns()
                    .iter()
                    .map(|c| {
                        c.get(r)
                            .map(|v| v.to_cell_string(self.decimals))
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect();

        let header_style = TextStyle::new(self.font_size).bold();
        let body_style = TextStyle::new(self.font_size);
        let widths: Vec<f64> = header
            .iter()
            .enumerate()
            .map(|(c, name)| {
                let head = measurer.measure(name, &header_style).advance_width;
                body.iter()
                    .map(|row| measurer.measure(&row[c], &body_style).advance_width)
                    .fold(head, f64::max)
                    + 2.0 * self.cell_padding_x
            })
            .collect();
        let row_h =
            measurer.measure("Mg", &header_style).line_height() + 2.0 * self.cell_padding_y;
        let grid_w: f64 = widths.iter().sum();
        let grid_h = row_h * (body.len() + 1) as f64;

        let title = self.title_spec(table.row_count());
        let title_h = title.measure(measurer);
        let content_w = grid_w.max(title.measure_width(measurer));
        let view = Rect::new(
            0.0,
            0.0,
            content_w + 2.0 * self.margin,
            title_h + self.title_gap + grid_h + 2.0 * self.margin,
        );

        let mut scene = Scene::new(view);
        scene.push(
            RectMarkSpec::new(MarkId::from_raw(self.id_base), view)
                .with_fill(self.background.clone())
                .with_z_index(z_order::PLOT_BACKGROUND)
                .mark(),
        );
        scene.extend(title.marks(
            measurer,
            Rect::new(self.margin, self.margin, view.x1 - self.margin, self.margin + title_h),
        ));

        let x0 = self.margin + 0.5 * (content_w - grid_w);
        let y0 = self.margin + title_h + self.title_gap;
        let mut next_id = self.id_base + 10;
        let mut cell = |scene: &mut Scene, rect: Rect, fill: &Brush, text: &str, header: bool| {
            scene.push(
                RectMarkSpec::new(MarkId::from_raw(next_id), rect)
                    .with_fill(fill.clone())
                    .with_stroke(self.border.clone())
                    .with_z_index(z_order::CELL_FILL)
                    .mark(),
            );
            let (weight, paint) = if header {
                (FontWeight::BOLD, &self.header_text)
            } else {
                (FontWeight::NORMAL, &self.text_fill)
            };
            scene.push(self.cell_text(next_id + 1, rect.center(), text, weight, paint));
            next_id += 2;
        };

        let mut x = x0;
        for (c, name) in header.iter().enumerate() {
            let rect = Rect::new(x, y0, x + widths[c], y0 + row_h);
            cell(&mut scene, rect, &self.header_fill, name, true);
            x += widths[c];
        }
        for (r, row) in body.iter().enumerate() {
            let y = y0 + row_h * (r + 1) as f64;
            let fill = &self.row_fills[r % 2];
            let mut x = x0;
            for (c, text) in row.iter().enumerate() {
                let rect = Rect::new(x, y, x + widths[c], y + row_h);
                cell(&mut scene, rect, fill, text, false);
                x += widths[c];
            }
        }

        tracing::debug!(
            rows = body.len(),
            of = table.row_count(),
            cols = header.len(),
            width = view.width(),
            height = view.height(),
            "table grid laid out"
        );
        scene
    }

    fn cell_text(
        &self,
        id: u64,
        center: Point,
        text: &str,
        weight: FontWeight,
        fill: &Brush,
    ) -> Mark {
        TextMarkSpec::new(MarkId::from_raw(id), center, text)
            .with_font_size(self.font_size)
            .with_font_weight(weight)
            .with_anchor(TextAnchor::Middle)
            .with_baseline(TextBaseline::Middle)
            .with_fill(fill.clone())
            .with_z_index(z_order::CELL_TEXT)
            .mark()
    }
}
