// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group-by aggregation.

use core::hash::{Hash, Hasher};

use hashbrown::HashMap;
use smallvec::SmallVec;
use tally_core::{Column, Result, Table, Value};

use crate::transform::{AggregateOp, Aggregation};

/// Hashable view of one key cell. Floats hash by bit pattern; kinds never compare equal.
#[derive(Debug, Clone, Copy)]
struct KeyCell<'a>(&'a Value);

impl PartialEq for KeyCell<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (a, b) => a.strict_eq(b),
        }
    }
}

impl Eq for KeyCell<'_> {}

impl Hash for KeyCell<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self.0).hash(state);
        match self.0 {
            Value::Null => {}
            Value::Bool(v) => v.hash(state),
            Value::Int(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Date(d) => d.hash(state),
        }
    }
}

type GroupKey<'a> = SmallVec<[KeyCell<'a>; 4]>;

/// Row indices of each group, in first-seen order.
fn group_rows(table: &Table, group_by: &[String]) -> Result<Vec<Vec<usize>>> {
    let keys = group_by
        .iter()
        .map(|name| table.column(name))
        .collect::<Result<Vec<_>>>()?;

    let mut index: HashMap<GroupKey<'_>, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for row in 0..table.row_count() {
        let key: GroupKey<'_> = keys
            .iter()
            .map(|c| KeyCell(&c.values()[row]))
            .collect();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(row);
    }
    Ok(groups)
}

/// Key columns of the grouped output: each group's key, taken from its first row.
fn key_columns(table: &Table, group_by: &[String], groups: &[Vec<usize>]) -> Result<Vec<Column>> {
    let firsts: Vec<usize> = groups.iter().map(|rows| rows[0]).collect();
    group_by
        .iter()
        .map(|name| {
            let col = table.column(name)?;
            Ok(Column::new(
                name.clone(),
                firsts.iter().map(|&r| col.values()[r].clone()).collect(),
            ))
        })
        .collect()
}

/// Reduces the numeric cells of `column` at `rows` with `op`.
///
/// Missing cells are skipped. `Sum`, `Min` and `Max` stay `Int` when every present cell is an
/// `Int`; everything else is a `Float`. An empty selection sums to `0` and yields `NaN` for the
/// other operations.
pub fn reduce(op: AggregateOp, column: &Column, rows: &[usize]) -> Result<Value> {
    let mut floats: Vec<f64> = Vec::with_capacity(rows.len());
    let mut ints: Vec<i64> = Vec::with_capacity(rows.len());
    let mut all_int = true;
    for &row in rows {
        let Some(v) = column.f64_at(row)?.filter(|v| !v.is_nan()) else {
            continue;
        };
        floats.push(v);
        match column.values()[row] {
            Value::Int(i) if all_int => ints.push(i),
            _ => all_int = false,
        }
    }

    let n = floats.len();
    Ok(match op {
        AggregateOp::Sum if all_int => ints
            .iter()
            .try_fold(0_i64, |acc, &v| acc.checked_add(v))
            .map_or_else(|| Value::Float(floats.iter().sum()), Value::Int),
        AggregateOp::Sum => Value::Float(floats.iter().sum()),
        _ if n == 0 => Value::Float(f64::NAN),
        AggregateOp::Min if all_int => Value::Int(ints.iter().copied().min().unwrap_or_default()),
        AggregateOp::Max if all_int => Value::Int(ints.iter().copied().max().unwrap_or_default()),
        AggregateOp::Min => Value::Float(floats.iter().copied().fold(f64::INFINITY, f64::min)),
        AggregateOp::Max => {
            Value::Float(floats.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }
        AggregateOp::Mean => Value::Float(mean(&floats)),
        AggregateOp::Std => Value::Float(std_dev(&floats)),
        AggregateOp::Median => {
            floats.sort_by(f64::total_cmp);
            Value::Float(crate::describe::quantile(&floats, 0.5))
        }
    })
}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation; `NaN` with fewer than two values.
pub(crate) fn std_dev(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

/// Groups `table` by `group_by` and computes `aggregation` per group.
///
/// The output has one row per distinct key combination, in first-seen order: the key columns
/// (in `group_by` order) followed by the aggregation outputs. Rows with a `Null` key form
/// their own group.
pub fn aggregate(table: &Table, group_by: &[String], aggregation: &Aggregation) -> Result<Table> {
    table.require_columns(group_by)?;
    table.require_columns(&aggregation.input_columns())?;

    let groups = group_rows(table, group_by)?;
    let mut columns = key_columns(table, group_by, &groups)?;
    match aggregation {
        Aggregation::Count { name } => {
            let counts = groups
                .iter()
                .map(|rows| i64::try_from(rows.len()).unwrap_or(i64::MAX));
            columns.push(Column::from_values(name.clone(), counts));
        }
        _ => {
            for field in aggregation.fields() {
                let input = table.column(&field.input)?;
                let values = groups
                    .iter()
                    .map(|rows| reduce(field.op, input, rows))
                    .collect::<Result<Vec<_>>>()?;
                columns.push(Column::new(field.output, values));
            }
        }
    }
    tracing::debug!(groups = groups.len(), keys = ?group_by, "aggregated");
    Table::new(columns)
}

/// Single-function aggregation; the output column keeps `column`'s name.
pub fn aggregate_single(
    table: &Table,
    group_by: &[String],
    column: &str,
    op: AggregateOp,
) -> Result<Table> {
    aggregate(table, group_by, &Aggregation::single(column, op))
}

/// Multi-function aggregation over `(column, functions)` pairs.
pub fn aggregate_multi(
    table: &Table,
    group_by: &[String],
    fields: &[(String, Vec<AggregateOp>)],
) -> Result<Table> {
    aggregate(
        table,
        group_by,
        &Aggregation::Multi {
            fields: fields.to_vec(),
        },
    )
}

/// Counts rows per group into an `Int` column called `name`.
pub fn count(table: &Table, group_by: &[String], name: &str) -> Result<Table> {
    aggregate(table, group_by, &Aggregation::count(name))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;
    use tally_core::TableError;

    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn sales() -> Table {
        Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob", "Alice", "Bob", "Alice"]),
            Column::from_values("YEAR", [2023_i64, 2023, 2024, 2024, 2023]),
            Column::from_values("QUANTITY", [10_i64, 20, 15, 5, 8]),
            Column::from_values("UNIT_PRICE", [100.0, 200.0, 150.0, 300.0, 90.0]),
            Column::from_values("TOTAL", [1000_i64, 4000, 2250, 1500, 720]),
        ])
        .unwrap()
    }

    #[test]
    fn sum_by_seller_in_first_seen_order() {
        let out =
            aggregate_single(&sales(), &keys(&["SELLER"]), "TOTAL", AggregateOp::Sum).unwrap();
        assert_eq!(out.column_names().collect::<Vec<_>>(), ["SELLER", "TOTAL"]);
        assert_eq!(
            out.column("SELLER").unwrap().values(),
            [Value::text("Alice"), Value::text("Bob")]
        );
        assert_eq!(
            out.column("TOTAL").unwrap().values(),
            [Value::Int(3970), Value::Int(5500)]
        );
    }

    #[test]
    fn two_keys() {
        let out = aggregate_single(
            &sales(),
            &keys(&["SELLER", "YEAR"]),
            "TOTAL",
            AggregateOp::Sum,
        )
        .unwrap();
        assert_eq!(out.row_count(), 4);
        assert_eq!(out.value(0, 2), Some(&Value::Int(1720)));
        assert_eq!(out.value(1, 0), Some(&Value::text("Bob")));
        assert_eq!(out.value(1, 1), Some(&Value::Int(2023)));
    }

    #[test]
    fn std_of_single_row_is_nan() {
        let out = aggregate_single(
            &sales(),
            &keys(&["SELLER", "YEAR"]),
            "UNIT_PRICE",
            AggregateOp::Std,
        )
        .unwrap();
        // Bob has one row per year.
        let Value::Float(bob_2023) = out.value(1, 2).unwrap() else {
            panic!("expected a float");
        };
        assert!(bob_2023.is_nan());
        // Alice 2023: 100 and 90.
        let Value::Float(alice_2023) = out.value(0, 2).unwrap() else {
            panic!("expected a float");
        };
        assert!((alice_2023 - 7.071_067_811_865_476).abs() < 1e-9);
    }

    #[rstest]
    #[case(AggregateOp::Sum, Value::Int(3970))]
    #[case(AggregateOp::Min, Value::Int(720))]
    #[case(AggregateOp::Max, Value::Int(2250))]
    #[case(AggregateOp::Median, Value::Float(1000.0))]
    fn alice_totals(#[case] op: AggregateOp, #[case] expected: Value) {
        let out = aggregate_single(&sales(), &keys(&["SELLER"]), "TOTAL", op).unwrap();
        assert_eq!(out.value(0, 1), Some(&expected));
    }

    #[test]
    fn mean_is_float() {
        let out =
            aggregate_single(&sales(), &keys(&["SELLER"]), "TOTAL", AggregateOp::Mean).unwrap();
        assert_eq!(out.value(1, 1), Some(&Value::Float(2750.0)));
    }

    #[test]
    fn multi_labels_and_order() {
        let out = aggregate_multi(
            &sales(),
            &keys(&["SELLER"]),
            &[
                (
                    "TOTAL".to_owned(),
                    vec![AggregateOp::Min, AggregateOp::Max, AggregateOp::Mean],
                ),
                ("QUANTITY".to_owned(), vec![AggregateOp::Sum]),
            ],
        )
        .unwrap();
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            ["SELLER", "TOTAL_min", "TOTAL_max", "TOTAL_mean", "QUANTITY"]
        );
        assert_eq!(out.value(1, 4), Some(&Value::Int(25)));
    }

    #[test]
    fn count_per_group() {
        let out = count(&sales(), &keys(&["SELLER"]), "TRANSACTIONS").unwrap();
        assert_eq!(
            out.column("TRANSACTIONS").unwrap().values(),
            [Value::Int(3), Value::Int(2)]
        );
    }

    #[test]
    fn empty_input_yields_empty_output_with_columns() {
        let empty = sales().head(0);
        let out = aggregate_single(&empty, &keys(&["SELLER"]), "TOTAL", AggregateOp::Sum).unwrap();
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.column_names().collect::<Vec<_>>(), ["SELLER", "TOTAL"]);
    }

    #[test]
    fn null_cells_are_skipped_and_null_keys_group() {
        let table = Table::new(vec![
            Column::from_values("K", [Value::text("a"), Value::Null, Value::text("a")]),
            Column::from_values("V", [Value::Int(1), Value::Int(5), Value::Null]),
        ])
        .unwrap();
        let out = aggregate_single(&table, &keys(&["K"]), "V", AggregateOp::Sum).unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.value(0, 1), Some(&Value::Int(1)));
        assert_eq!(out.value(1, 0), Some(&Value::Null));
    }

    #[test]
    fn missing_columns_and_non_numeric_input() {
        let err = count(&sales(), &keys(&["REGION"]), "N").unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { .. }));
        let err = aggregate_single(&sales(), &keys(&["YEAR"]), "SELLER", AggregateOp::Sum)
            .unwrap_err();
        assert!(matches!(err, TableError::ParseError { .. }));
    }

    #[test]
    fn int_and_float_keys_stay_distinct() {
        let table = Table::new(vec![Column::from_values(
            "K",
            [Value::Int(1), Value::Float(1.0), Value::Int(1)],
        )])
        .unwrap();
        let out = count(&table, &keys(&["K"]), "N").unwrap();
        assert_eq!(out.column("N").unwrap().values(), [Value::Int(2), Value::Int(1)]);
    }

    proptest! {
        #[test]
        fn counts_sum_to_row_count(ks in prop::collection::vec(0_u8..6, 0..60)) {
            let table = Table::new(vec![Column::from_values(
                "K",
                ks.iter().map(|k| i64::from(*k)),
            )])
            .unwrap();
            let out = count(&table, &keys(&["K"]), "N").unwrap();
            let total: i64 = out
                .column("N")
                .unwrap()
                .values()
                .iter()
                .filter_map(Value::as_i64)
                .sum();
            prop_assert_eq!(usize::try_from(total).unwrap(), ks.len());
        }

        #[test]
        fn reaggregating_on_the_same_keys_is_stable(
            rows in prop::collection::vec((0_u8..6, -1000_i64..1000), 0..60),
        ) {
            let table = Table::new(vec![
                Column::from_values("K", rows.iter().map(|(k, _)| i64::from(*k))),
                Column::from_values("V", rows.iter().map(|(_, v)| *v)),
            ])
            .unwrap();
            let by = keys(&["K"]);
            for op in [AggregateOp::Sum, AggregateOp::Min, AggregateOp::Max, AggregateOp::Mean] {
                let once = aggregate_single(&table, &by, "V", op).unwrap();
                let twice = aggregate_single(&once, &by, "V", op).unwrap();
                prop_assert_eq!(&once, &twice);
            }
        }

        #[test]
        fn group_rows_are_distinct(ks in prop::collection::vec(0_u8..6, 1..60)) {
            let table = Table::new(vec![Column::from_values(
                "K",
                ks.iter().map(|k| i64::from(*k)),
            )])
            .unwrap();
            let out = count(&table, &keys(&["K"]), "N").unwrap();
            let mut seen: Vec<i64> = out
                .column("K")
                .unwrap()
                .values()
                .iter()
                .filter_map(Value::as_i64)
                .collect();
            let n = seen.len();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), n);
        }
    }
}
