// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core data model for tally.
//!
//! This crate holds the two kinds of values that flow through a report run:
//! - **Tables**: ordered, named, equal-length columns of scalar [`Value`]s. Tables are
//!   immutable once built; every transform returns a new one.
//! - **Marks**: positioned rectangles, text runs and paths collected into a [`Scene`], which
//!   renderers serialise to SVG, PNG or PDF pages.
//!
//! Column lookups go through [`Table::column`], which reports a typed
//! [`TableError::ColumnNotFound`] instead of panicking deep inside a transform.

mod display;
mod error;
mod mark;
mod scene;
mod table;
mod value;

pub use error::{Result, TableError};
pub use mark::{
    Mark, MarkId, MarkPayload, PathMark, RectMark, Stroke, TextAnchor, TextBaseline, TextMark,
};
pub use scene::Scene;
pub use table::{Column, Table};
pub use value::{Value, ValueKind};
