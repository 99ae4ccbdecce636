// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A flat collection of marks with a view rectangle.

use kurbo::Rect;

use crate::mark::{Mark, TextMark};

/// Everything needed to paint one image or one document page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    view: Rect,
    marks: Vec<Mark>,
}

impl Scene {
    /// Creates an empty scene covering `view`.
    pub fn new(view: Rect) -> Self {
        Self {
            view,
            marks: Vec::new(),
        }
    }

    /// The view rectangle in scene coordinates.
    pub fn view(&self) -> Rect {
        self.view
    }

    /// Adds a mark.
    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    /// Marks in insertion order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Marks in paint order: by `(z_index, id)`.
    pub fn paint_order(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.iter().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// All text marks, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &TextMark> {
        self.marks.iter().filter_map(Mark::as_text)
    }
}

impl Extend<Mark> for Scene {
    fn extend<T: IntoIterator<Item = Mark>>(&mut self, iter: T) {
        self.marks.extend(iter);
    }
}
