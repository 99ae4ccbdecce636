// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tally_core::{Result, Table, Value};

use crate::transform::Predicate;

/// Keeps the rows whose `predicate.column` cell satisfies the predicate, in input order.
pub fn filter(table: &Table, predicate: &Predicate) -> Result<Table> {
    let column = table.column(&predicate.column)?;
    let rows: Vec<usize> = column
        .values()
        .iter()
        .enumerate()
        .filter_map(|(i, v)| predicate.eval(v).then_some(i))
        .collect();
    tracing::debug!(
        column = %predicate.column,
        kept = rows.len(),
        of = table.row_count(),
        "filtered"
    );
    Ok(table.take_rows(&rows))
}

/// Keeps the rows where `column` equals `value` exactly (no coercion between kinds).
pub fn filter_equal(table: &Table, column: &str, value: &Value) -> Result<Table> {
    filter(table, &Predicate::equal(column, value.clone()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tally_core::{Column, TableError};

    use super::*;
    use crate::transform::CompareOp;

    fn years() -> Table {
        Table::new(vec![
            Column::from_values("YEAR", [2023_i64, 2024, 2023, 2024, 2023]),
            Column::from_values("TOTAL", [1000_i64, 4000, 2250, 1500, 720]),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_matching_rows_in_order() {
        let out = filter_equal(&years(), "YEAR", &Value::Int(2023)).unwrap();
        assert_eq!(
            out.column("TOTAL").unwrap().values(),
            [Value::Int(1000), Value::Int(2250), Value::Int(720)]
        );
    }

    #[test]
    fn no_coercion_between_kinds() {
        let out = filter_equal(&years(), "YEAR", &Value::text("2023")).unwrap();
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.column_count(), 2);
        let out = filter_equal(&years(), "YEAR", &Value::Float(2023.0)).unwrap();
        assert_eq!(out.row_count(), 0);
    }

    #[test]
    fn unknown_column() {
        let err = filter_equal(&years(), "REGION", &Value::Int(1)).unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { .. }));
    }

    #[test]
    fn ordering_predicate() {
        let out = filter(&years(), &Predicate::new("TOTAL", CompareOp::Ge, 2000_i64)).unwrap();
        assert_eq!(out.row_count(), 2);
    }

    proptest! {
        #[test]
        fn filter_partitions_rows(xs in prop::collection::vec(0_i64..5, 0..40), probe in 0_i64..5) {
            let table = Table::new(vec![Column::from_values("K", xs.clone())]).unwrap();
            let eq = filter(&table, &Predicate::new("K", CompareOp::Eq, probe)).unwrap();
            let ne = filter(&table, &Predicate::new("K", CompareOp::Ne, probe)).unwrap();
            prop_assert_eq!(eq.row_count() + ne.row_count(), xs.len());
            prop_assert!(eq.column("K").unwrap().values().iter().all(|v| *v == Value::Int(probe)));
        }
    }
}
