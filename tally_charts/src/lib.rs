// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table-image and histogram building blocks for tally.
//!
//! This crate is a small layer above `tally_core`:
//! - **Scales** map data values into scene coordinates.
//! - **Guides** (titles, axes) are measured for layout, then emitted as [`tally_core::Mark`]s.
//! - **Composed specs** ([`TableGridSpec`], [`HistogramSpec`]) turn a table or a set of bins
//!   into a complete [`tally_core::Scene`].
//!
//! Text is measured through [`tally_text::TextMeasurer`]; marks store unshaped strings.

mod axis;
mod bar_mark;
mod format;
mod histogram;
mod layout;
mod rect_mark;
mod rule_mark;
mod scale;
mod table_grid;
mod text_mark;
mod title;
mod z_order;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, GridStyle};
pub use bar_mark::BarMarkSpec;
pub use format::format_tick_with_step;
pub use histogram::{HistogramSpec, LABEL_SLATE};
pub use layout::{ChartLayout, ChartLayoutSpec, Size};
pub use rect_mark::RectMarkSpec;
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleLinear, ScaleLinearSpec, nice_step, nice_ticks, tick_step};
pub use table_grid::{HEADER_FILL, HEADER_TEXT, ROW_SHADE, TITLE_BLUE, TableGridSpec};
pub use text_mark::TextMarkSpec;
pub use title::TitleSpec;
pub use z_order::*;
