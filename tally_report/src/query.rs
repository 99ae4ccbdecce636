// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Report queries.

use tally_core::Value;
use tally_transforms::{AggregateOp, Aggregation, Predicate, Program, SortOrder, Transform};

use crate::settings::ColumnNames;

/// How a query result is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// A styled table image under `tables/`.
    Table,
    /// A histogram of the aggregated values under `charts/`.
    Histogram,
}

/// One grouped question asked of the sales data.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Short identifier; also the image file stem.
    pub name: String,
    /// Human-readable title drawn on the image.
    pub title: String,
    /// Group-by key columns.
    pub group_by: Vec<String>,
    /// What to compute per group.
    pub aggregation: Aggregation,
    /// Keep only rows of this calendar year.
    pub year: Option<i64>,
    /// Sort groups by the aggregate, largest first.
    pub ranking: bool,
    /// Output form.
    pub presentation: Presentation,
}

impl QuerySpec {
    /// A table query over all years, in first-seen group order.
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        title: impl Into<String>,
        group_by: &[S],
        aggregation: Aggregation,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            group_by: group_by.iter().map(|s| s.as_ref().to_string()).collect(),
            aggregation,
            year: None,
            ranking: false,
            presentation: Presentation::Table,
        }
    }

    /// Restricts the query to one year.
    #[must_use]
    pub fn in_year(mut self, year: i64) -> Self {
        self.year = Some(year);
        self
    }

    /// Orders groups by the aggregate, descending.
    #[must_use]
    pub fn ranked(mut self) -> Self {
        self.ranking = true;
        self
    }

    /// Presents the result as a histogram.
    #[must_use]
    pub fn as_histogram(mut self) -> Self {
        self.presentation = Presentation::Histogram;
        self
    }

    /// Column holding the aggregate: the ranking key and the histogram input.
    pub fn value_column(&self) -> Option<String> {
        self.aggregation.primary_output()
    }

    /// Lowers the query to a transform program over an enriched table.
    pub fn program(&self, year_column: &str) -> Program {
        let mut program = Program::new();
        if let Some(year) = self.year {
            program.push(Transform::Filter {
                predicate: Predicate::equal(year_column, Value::Int(year)),
            });
        }
        program.push(Transform::Aggregate {
            group_by: self.group_by.clone(),
            aggregation: self.aggregation.clone(),
        });
        if self.ranking
            && let Some(by) = self.value_column()
        {
            program.push(Transform::Sort {
                by,
                order: SortOrder::Desc,
            });
        }
        program
    }

    /// The standard eight sales questions.
    pub fn defaults(columns: &ColumnNames) -> Vec<Self> {
        let c = columns;
        vec![
            Self::new(
                "Q1",
                "Total revenue per seller and year",
                &[&c.seller, &c.year],
                Aggregation::single(&c.total, AggregateOp::Sum),
            ),
            Self::new(
                "Q2",
                "Average revenue per seller and quarter",
                &[&c.seller, &c.quarter],
                Aggregation::single(&c.total, AggregateOp::Mean),
            ),
            Self::new(
                "Q3",
                "Average quantity sold per transaction and seller",
                &[&c.seller],
                Aggregation::single(&c.quantity, AggregateOp::Mean),
            ),
            Self::new(
                "Q4",
                "Unit price dispersion per seller in 2023",
                &[&c.seller],
                Aggregation::single(&c.unit_price, AggregateOp::Std),
            )
            .in_year(2023)
            .as_histogram(),
            Self::new(
                "Q5",
                "Ranking by average revenue per transaction in 2025",
                &[&c.seller],
                Aggregation::single(&c.total, AggregateOp::Mean),
            )
            .in_year(2025)
            .ranked(),
            Self::new(
                "Q6",
                "Min, max and mean revenue per seller",
                &[&c.seller],
                Aggregation::Multi {
                    fields: vec![(
                        c.total.clone(),
                        vec![AggregateOp::Min, AggregateOp::Max, AggregateOp::Mean],
                    )],
                },
            ),
            Self::new(
                "Q7",
                "Median revenue per seller in 2023",
                &[&c.seller],
                Aggregation::single(&c.total, AggregateOp::Median),
            )
            .in_year(2023)
            .ranked(),
            Self::new(
                "Q8",
                "Total transactions per seller and year",
                &[&c.seller, &c.year],
                Aggregation::count("TRANSACTIONS"),
            )
            .as_histogram(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use tally_core::{Column, Table};

    use super::*;

    fn enriched() -> Table {
        Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob", "Alice", "Bob", "Bob"]),
            Column::from_values("YEAR", [2023_i64, 2023, 2025, 2025, 2025]),
            Column::from_values("TOTAL", [1000_i64, 4000, 720, 1500, 2500]),
        ])
        .unwrap()
    }

    #[test]
    fn defaults_cover_eight_questions() {
        let queries = QuerySpec::defaults(&ColumnNames::default());
        let names: Vec<&str> = queries.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, ["Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7", "Q8"]);
        let histograms: Vec<&str> = queries
            .iter()
            .filter(|q| q.presentation == Presentation::Histogram)
            .map(|q| q.name.as_str())
            .collect();
        assert_eq!(histograms, ["Q4", "Q8"]);
        assert_eq!(queries[3].value_column().as_deref(), Some("UNIT_PRICE"));
        assert_eq!(queries[7].value_column().as_deref(), Some("TRANSACTIONS"));
        assert_eq!(queries[5].value_column().as_deref(), Some("TOTAL_min"));
    }

    #[test]
    fn program_filters_aggregates_then_ranks() {
        let query = QuerySpec::new(
            "Q",
            "t",
            &["SELLER"],
            Aggregation::single("TOTAL", AggregateOp::Sum),
        )
        .in_year(2025)
        .ranked();
        let program = query.program("YEAR");
        assert_eq!(program.transforms().len(), 3);
        let result = program.execute(&enriched()).unwrap();
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.value(0, 0), Some(&Value::text("Bob")));
        assert_eq!(result.value(0, 1), Some(&Value::Int(4000)));
        assert_eq!(result.value(1, 1), Some(&Value::Int(720)));
    }

    #[test]
    fn unfiltered_program_keeps_first_seen_order() {
        let query = QuerySpec::new("Q", "t", &["SELLER"], Aggregation::count("N"));
        assert_eq!(query.program("YEAR").transforms().len(), 1);
        let result = query.program("YEAR").execute(&enriched()).unwrap();
        assert_eq!(result.value(0, 0), Some(&Value::text("Alice")));
        assert_eq!(result.value(0, 1), Some(&Value::Int(2)));
        assert_eq!(result.value(1, 1), Some(&Value::Int(3)));
    }
}
