// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;

use tally_core::{Result, Table, Value};

use crate::transform::SortOrder;

/// Stable sort of `table`'s rows by column `by`.
///
/// Missing cells (`Null`, `NaN`) go last in either order. Mixed kinds order as
/// booleans, numbers, dates, then text.
pub fn sort(table: &Table, by: &str, order: SortOrder) -> Result<Table> {
    let column = table.column(by)?;
    let values = column.values();
    let mut rows: Vec<usize> = (0..table.row_count()).collect();
    rows.sort_by(|&a, &b| compare_cells(&values[a], &values[b], order));
    Ok(table.take_rows(&rows))
}

fn compare_cells(a: &Value, b: &Value, order: SortOrder) -> Ordering {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a
                .compare(b)
                .unwrap_or_else(|| kind_rank(a).cmp(&kind_rank(b)));
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        }
    }
}

fn kind_rank(v: &Value) -> u8 {
    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Int(_) | Value::Float(_) => 2,
        Value::Date(_) => 3,
        Value::Text(_) => 4,
    }
}

#[cfg(test)]
mod tests {
    use tally_core::Column;

    use super::*;

    fn totals() -> Table {
        Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob", "Carol", "Dan"]),
            Column::from_values(
                "TOTAL",
                [Value::Int(3970), Value::Null, Value::Float(5500.5), Value::Int(3970)],
            ),
        ])
        .unwrap()
    }

    fn sellers(t: &Table) -> Vec<String> {
        t.column("SELLER")
            .unwrap()
            .values()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn descending_is_stable_with_missing_last() {
        let out = sort(&totals(), "TOTAL", SortOrder::Desc).unwrap();
        assert_eq!(sellers(&out), ["Carol", "Alice", "Dan", "Bob"]);
    }

    #[test]
    fn ascending() {
        let out = sort(&totals(), "TOTAL", SortOrder::Asc).unwrap();
        assert_eq!(sellers(&out), ["Alice", "Dan", "Carol", "Bob"]);
    }

    #[test]
    fn unknown_column() {
        assert!(sort(&totals(), "REGION", SortOrder::Asc).is_err());
    }
}
