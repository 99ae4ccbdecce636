// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-line transform programs.

use tally_core::{Result, Table};

use crate::transform::Transform;
use crate::{aggregate, enrich_dates, filter, sort};

/// An ordered list of transforms, executed front to back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Program {
    transforms: Vec<Transform>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transform.
    pub fn push(&mut self, t: Transform) {
        self.transforms.push(t);
    }

    /// Builder-style [`Program::push`].
    #[must_use]
    pub fn with(mut self, t: Transform) -> Self {
        self.push(t);
        self
    }

    /// The transforms, in execution order.
    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Runs every transform in order, feeding each output into the next.
    pub fn execute(&self, input: &Table) -> Result<Table> {
        let mut table = input.clone();
        for (step, t) in self.transforms.iter().enumerate() {
            table = apply(&table, t)?;
            tracing::trace!(step, rows = table.row_count(), "transform applied");
        }
        Ok(table)
    }
}

impl FromIterator<Transform> for Program {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

/// Applies a single transform.
pub(crate) fn apply(table: &Table, t: &Transform) -> Result<Table> {
    match t {
        Transform::EnrichDates {
            date,
            year,
            quarter,
        } => enrich_dates(table, date, year, quarter),
        Transform::Filter { predicate } => filter(table, predicate),
        Transform::Aggregate {
            group_by,
            aggregation,
        } => aggregate(table, group_by, aggregation),
        Transform::Sort { by, order } => sort(table, by, *order),
    }
}
