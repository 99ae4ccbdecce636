// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Suggested z-order conventions for generated marks.
//!
//! Marks carry an explicit `z_index` for render ordering. Renderers sort by
//! `(z_index, MarkId)` for a deterministic tie-break.

/// Plot and page background fills.
pub const PLOT_BACKGROUND: i32 = -100;
/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;

/// Filled series marks (histogram bars).
pub const SERIES_FILL: i32 = 0;
/// Stroked series marks.
pub const SERIES_STROKE: i32 = 10;

/// Table cell backgrounds.
pub const CELL_FILL: i32 = 0;
/// Table cell borders.
pub const CELL_BORDERS: i32 = 15;
/// Table cell text.
pub const CELL_TEXT: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Chart-level titles and annotations.
pub const TITLES: i32 = 80;
