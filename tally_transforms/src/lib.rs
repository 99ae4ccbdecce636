// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Table transforms for tally.
//!
//! This crate provides:
//! - free functions for each operator ([`enrich_dates`], [`filter`], [`filter_equal`],
//!   [`aggregate`], [`aggregate_multi`], [`count`], [`sort`], [`histogram`], [`describe`]),
//!   each taking a `&Table` and returning a new `Table`, and
//! - a small transform IR ([`Transform`], [`Program`]) so a report query can be described as
//!   data and executed as one straight-line pipeline.
//!
//! Grouping keeps groups in first-seen order. Aggregates skip missing cells (`Null`, `NaN`).

mod aggregate;
mod bin;
mod describe;
mod enrich;
mod filter;
mod program;
mod sort;
mod transform;

pub use aggregate::{aggregate, aggregate_multi, aggregate_single, count, reduce};
pub use bin::{Bins, bin, histogram};
pub use describe::{describe, quantile};
pub use enrich::{enrich_dates, parse_date, quarter_label};
pub use filter::{filter, filter_equal};
pub use program::Program;
pub use sort::sort;
pub use transform::{
    AggregateField, AggregateOp, Aggregation, CompareOp, ParseAggregateOpError, Predicate,
    SortOrder, Transform,
};
