// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Summary statistics.

use tally_core::{Column, Result, Table, Value};

use crate::aggregate::std_dev;

const STATS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Linear-interpolated quantile of an ascending slice; `NaN` when empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "pos lies in [0, n - 1]"
            )]
            let i = pos.floor() as usize;
            let j = (i + 1).min(n - 1);
            let frac = pos - i as f64;
            sorted[i] + (sorted[j] - sorted[i]) * frac
        }
    }
}

/// Summary of every numeric column: count, mean, std, min, quartiles and max.
///
/// The output has a leading `stat` column naming each statistic, then one `Float` column per
/// numeric input column, in input order.
pub fn describe(table: &Table) -> Result<Table> {
    let mut columns = vec![Column::from_values("stat", STATS)];
    for col in table.columns().iter().filter(|c| c.is_numeric()) {
        let mut xs = Vec::with_capacity(col.len());
        for row in 0..col.len() {
            if let Some(v) = col.f64_at(row)?.filter(|v| !v.is_nan()) {
                xs.push(v);
            }
        }
        xs.sort_by(f64::total_cmp);
        let n = xs.len() as f64;
        let mean = if xs.is_empty() {
            f64::NAN
        } else {
            xs.iter().sum::<f64>() / n
        };
        let stats = [
            n,
            mean,
            std_dev(&xs),
            quantile(&xs, 0.0),
            quantile(&xs, 0.25),
            quantile(&xs, 0.5),
            quantile(&xs, 0.75),
            quantile(&xs, 1.0),
        ];
        columns.push(Column::new(
            col.name(),
            stats.into_iter().map(Value::Float).collect(),
        ));
    }
    Table::new(columns)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.25, 1.75)]
    #[case(0.5, 2.5)]
    #[case(1.0, 4.0)]
    fn quantiles(#[case] q: f64, #[case] expected: f64) {
        assert!((quantile(&[1.0, 2.0, 3.0, 4.0], q) - expected).abs() < 1e-12);
    }

    #[test]
    fn describes_numeric_columns_only() {
        let table = Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob", "Alice"]),
            Column::from_values("TOTAL", [1000_i64, 4000, 2250]),
        ])
        .unwrap();
        let out = describe(&table).unwrap();
        assert_eq!(out.column_names().collect::<Vec<_>>(), ["stat", "TOTAL"]);
        assert_eq!(out.row_count(), 8);
        let total = out.column("TOTAL").unwrap();
        assert_eq!(total.get(0), Some(&Value::Float(3.0)));
        assert_eq!(total.get(3), Some(&Value::Float(1000.0)));
        assert_eq!(total.get(5), Some(&Value::Float(2250.0)));
        assert_eq!(total.get(7), Some(&Value::Float(4000.0)));
    }
}
