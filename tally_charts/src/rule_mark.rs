// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A "rule" is a straight line segment, used for baselines, gridlines, cell borders and axis
//! domain lines.

use kurbo::BezPath;
use peniko::Brush;
use tally_core::{Mark, MarkId, PathMark, Stroke};

use crate::z_order;

/// A rule mark spec (a stroked line segment).
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point x in scene coordinates.
    pub x0: f64,
    /// Start point y in scene coordinates.
    pub y0: f64,
    /// End point x in scene coordinates.
    pub x1: f64,
    /// End point y in scene coordinates.
    pub y1: f64,
    /// Stroke paint, width and dash pattern.
    pub stroke: Stroke,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            id,
            x0,
            y0,
            x1,
            y1,
            stroke: Stroke::solid(Brush::default(), 1.0),
            z_index: z_order::SERIES_STROKE,
        }
    }

    /// Creates a horizontal rule.
    pub fn horizontal(id: MarkId, y: f64, x0: f64, x1: f64) -> Self {
        Self::new(id, x0, y, x1, y)
    }

    /// Creates a vertical rule.
    pub fn vertical(id: MarkId, x: f64, y0: f64, y1: f64) -> Self {
        Self::new(id, x, y0, x, y1)
    }

    /// Sets the stroke.
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the rule mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        p.move_to((self.x0, self.y0));
        p.line_to((self.x1, self.y1));
        Mark::new(
            self.id,
            self.z_index,
            PathMark {
                path: p,
                fill: None,
                stroke: Some(self.stroke.clone()),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Shape;
    use peniko::color::palette::css;
    use tally_core::MarkPayload;

    use super::*;

    #[test]
    fn rules_become_open_stroked_paths() {
        let mark = RuleMarkSpec::horizontal(MarkId::from_raw(3), 10.0, 0.0, 50.0)
            .with_stroke(Stroke::solid(css::BLACK, 0.8).dashed(4.0, 3.0))
            .with_z_index(z_order::GRID_LINES)
            .mark();
        assert_eq!(mark.z_index, z_order::GRID_LINES);
        let MarkPayload::Path(path) = &mark.payload else {
            panic!("expected a path mark");
        };
        assert!(path.fill.is_none());
        assert_eq!(path.stroke.as_ref().and_then(|s| s.dash), Some((4.0, 3.0)));
        let bounds = path.path.bounding_box();
        assert_eq!((bounds.x0, bounds.x1, bounds.y0, bounds.y1), (0.0, 50.0, 10.0, 10.0));
    }
}
