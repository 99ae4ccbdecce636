// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderable marks.
//!
//! Marks are fully resolved: positions, sizes and paints are concrete values in scene
//! coordinates. Chart and table layout code produces them; renderers only read them.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Brush;
use tally_text::FontWeight;

/// Stable identity of a mark within a scene.
///
/// Renderers break `z_index` ties by id, so ids double as a deterministic paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Creates an id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives the `index`-th child id of this base id.
    pub const fn child(self, index: u64) -> Self {
        Self(self.0.wrapping_add(index))
    }
}

/// Horizontal text anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `pos.x` is the left edge.
    Start,
    /// `pos.x` is the center.
    Middle,
    /// `pos.x` is the right edge.
    End,
}

/// Vertical text baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `pos.y` is the alphabetic baseline.
    Alphabetic,
    /// `pos.y` is the vertical middle.
    Middle,
    /// `pos.y` is the top (hanging) baseline.
    Hanging,
    /// `pos.y` is the ideographic (bottom) baseline.
    Ideographic,
}

/// A stroke paint with width and optional dash pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub width: f64,
    /// Optional `(dash, gap)` lengths.
    pub dash: Option<(f64, f64)>,
}

impl Stroke {
    /// A solid stroke.
    pub fn solid(brush: impl Into<Brush>, width: f64) -> Self {
        Self {
            brush: brush.into(),
            width,
            dash: None,
        }
    }

    /// Returns the same stroke with a dash pattern.
    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash = Some((dash, gap));
        self
    }
}

/// A filled, optionally outlined rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Geometry.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<Stroke>,
}

/// A single line of unshaped text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size.
    pub font_size: f64,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Fill paint.
    pub fill: Brush,
}

/// An arbitrary path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry.
    pub path: BezPath,
    /// Optional fill.
    pub fill: Option<Brush>,
    /// Optional stroke.
    pub stroke: Option<Stroke>,
}

/// Geometry and paint of a mark.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// A rectangle.
    Rect(RectMark),
    /// A text run.
    Text(TextMark),
    /// A path.
    Path(PathMark),
}

impl MarkPayload {
    /// Geometric bounds, ignoring stroke width.
    ///
    /// Text has no exact bounds without shaping, so it returns `None`.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => Some(p.path.bounding_box()),
            Self::Text(_) => None,
        }
    }
}

impl From<RectMark> for MarkPayload {
    fn from(value: RectMark) -> Self {
        Self::Rect(value)
    }
}

impl From<TextMark> for MarkPayload {
    fn from(value: TextMark) -> Self {
        Self::Text(value)
    }
}

impl From<PathMark> for MarkPayload {
    fn from(value: PathMark) -> Self {
        Self::Path(value)
    }
}

/// A positioned, painted element of a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable id.
    pub id: MarkId,
    /// Paint order; higher draws later.
    pub z_index: i32,
    /// Geometry and paint.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a mark.
    pub fn new(id: MarkId, z_index: i32, payload: impl Into<MarkPayload>) -> Self {
        Self {
            id,
            z_index,
            payload: payload.into(),
        }
    }

    /// Returns the text payload, if this is a text mark.
    pub fn as_text(&self) -> Option<&TextMark> {
        match &self.payload {
            MarkPayload::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns the rect payload, if this is a rect mark.
    pub fn as_rect(&self) -> Option<&RectMark> {
        match &self.payload {
            MarkPayload::Rect(r) => Some(r),
            _ => None,
        }
    }
}
