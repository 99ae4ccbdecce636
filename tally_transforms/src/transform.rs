// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transform IR types.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use tally_core::Value;

/// Aggregation function applied to the numeric cells of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateOp {
    /// Sum. An empty group sums to `0`.
    Sum,
    /// Arithmetic mean.
    Mean,
    /// Sample standard deviation (`n - 1` denominator); `NaN` below two samples.
    Std,
    /// Median (mean of the two middle values for even counts).
    Median,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
}

impl AggregateOp {
    /// All operations, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Sum,
        Self::Mean,
        Self::Std,
        Self::Median,
        Self::Min,
        Self::Max,
    ];

    /// The lowercase name used in configuration and column labels.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Std => "std",
            Self::Median => "median",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown aggregation name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAggregateOpError(pub String);

impl fmt::Display for ParseAggregateOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown aggregation `{}` (expected sum, mean, std, median, min or max)",
            self.0
        )
    }
}

impl core::error::Error for ParseAggregateOpError {}

impl FromStr for AggregateOp {
    type Err = ParseAggregateOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAggregateOpError(s.to_owned()))
    }
}

/// A single aggregated output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateField {
    /// Operation to apply.
    pub op: AggregateOp,
    /// Input column.
    pub input: String,
    /// Output column name.
    pub output: String,
}

/// What a grouped query computes per group. Exactly one mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    /// One function over one column; the output keeps the column's name.
    Single {
        /// Input column.
        column: String,
        /// Function.
        op: AggregateOp,
    },
    /// Several functions over one or more columns.
    ///
    /// A column with a single function keeps its name; a column with several functions yields
    /// one `<column>_<function>` output per function.
    Multi {
        /// `(column, functions)` pairs, in output order.
        fields: Vec<(String, Vec<AggregateOp>)>,
    },
    /// Row count per group, written to a column called `name`.
    Count {
        /// Output column name.
        name: String,
    },
}

impl Aggregation {
    /// Single-function aggregation.
    pub fn single(column: impl Into<String>, op: AggregateOp) -> Self {
        Self::Single {
            column: column.into(),
            op,
        }
    }

    /// Row-count aggregation.
    pub fn count(name: impl Into<String>) -> Self {
        Self::Count { name: name.into() }
    }

    /// The input columns this aggregation reads.
    pub fn input_columns(&self) -> Vec<&str> {
        match self {
            Self::Single { column, .. } => vec![column.as_str()],
            Self::Multi { fields } => fields.iter().map(|(c, _)| c.as_str()).collect(),
            Self::Count { .. } => Vec::new(),
        }
    }

    /// Expands to concrete output fields. `Count` has none.
    pub fn fields(&self) -> Vec<AggregateField> {
        match self {
            Self::Single { column, op } => vec![AggregateField {
                op: *op,
                input: column.clone(),
                output: column.clone(),
            }],
            Self::Multi { fields } => fields
                .iter()
                .flat_map(|(column, ops)| {
                    let label = ops.len() > 1;
                    ops.iter().map(move |op| AggregateField {
                        op: *op,
                        input: column.clone(),
                        output: if label {
                            format!("{column}_{op}")
                        } else {
                            column.clone()
                        },
                    })
                })
                .collect(),
            Self::Count { .. } => Vec::new(),
        }
    }

    /// Name of the first output column; the natural key for ranking sorts.
    pub fn primary_output(&self) -> Option<String> {
        match self {
            Self::Count { name } => Some(name.clone()),
            _ => self.fields().into_iter().next().map(|f| f.output),
        }
    }
}

/// Sorting order for [`Transform::Sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Comparison operators for predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `==` (exact, no coercion between kinds)
    Eq,
    /// `!=` (negation of `==`)
    Ne,
}

/// A row predicate used by [`Transform::Filter`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// Column to read.
    pub column: String,
    /// Comparison operator.
    pub op: CompareOp,
    /// Right-hand constant.
    pub value: Value,
}

impl Predicate {
    /// `column == value`.
    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op: CompareOp::Eq,
            value: value.into(),
        }
    }

    /// Creates a predicate with an arbitrary operator.
    pub fn new(column: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// Evaluate the predicate against one cell.
    ///
    /// Ordering operators only match values of comparable kinds (see [`Value::compare`]).
    pub fn eval(&self, v: &Value) -> bool {
        match self.op {
            CompareOp::Eq => v.strict_eq(&self.value),
            CompareOp::Ne => !v.strict_eq(&self.value),
            CompareOp::Lt => v.compare(&self.value) == Some(Ordering::Less),
            CompareOp::Le => matches!(
                v.compare(&self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            CompareOp::Gt => v.compare(&self.value) == Some(Ordering::Greater),
            CompareOp::Ge => matches!(
                v.compare(&self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
        }
    }
}

/// A table-to-table transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Derive year and quarter columns from a date column.
    EnrichDates {
        /// Source date column.
        date: String,
        /// Output year column.
        year: String,
        /// Output quarter-label column.
        quarter: String,
    },
    /// Keep only rows that satisfy a predicate.
    Filter {
        /// Predicate to apply per row.
        predicate: Predicate,
    },
    /// Group rows by key columns and aggregate.
    ///
    /// Output columns are `group_by` (in order) followed by the aggregation outputs.
    Aggregate {
        /// Group-by key columns.
        group_by: Vec<String>,
        /// What to compute per group.
        aggregation: Aggregation,
    },
    /// Stable reorder of rows by one column.
    Sort {
        /// Sort key column.
        by: String,
        /// Sort order.
        order: SortOrder,
    },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("sum", AggregateOp::Sum)]
    #[case("MEAN", AggregateOp::Mean)]
    #[case(" std ", AggregateOp::Std)]
    #[case("median", AggregateOp::Median)]
    fn parses_op_names(#[case] name: &str, #[case] op: AggregateOp) {
        assert_eq!(name.parse::<AggregateOp>(), Ok(op));
    }

    #[test]
    fn rejects_unknown_op() {
        let err = "average".parse::<AggregateOp>().unwrap_err();
        assert!(err.to_string().contains("average"), "{err}");
    }

    #[test]
    fn multi_labels_only_columns_with_several_functions() {
        let agg = Aggregation::Multi {
            fields: vec![
                (
                    "TOTAL".into(),
                    vec![AggregateOp::Min, AggregateOp::Max, AggregateOp::Mean],
                ),
                ("QUANTITY".into(), vec![AggregateOp::Sum]),
            ],
        };
        let outputs: Vec<String> = agg.fields().into_iter().map(|f| f.output).collect();
        assert_eq!(outputs, ["TOTAL_min", "TOTAL_max", "TOTAL_mean", "QUANTITY"]);
        assert_eq!(agg.primary_output().as_deref(), Some("TOTAL_min"));
    }

    #[test]
    fn predicate_ordering_needs_comparable_kinds() {
        let p = Predicate::new("SCORE", CompareOp::Gt, 70_i64);
        assert!(p.eval(&Value::Int(85)));
        assert!(p.eval(&Value::Float(72.5)));
        assert!(!p.eval(&Value::Int(55)));
        assert!(!p.eval(&Value::text("99")), "text never orders against numbers");
        assert!(!p.eval(&Value::Null));
    }
}
