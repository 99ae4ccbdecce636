// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar enrichment.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tally_core::{Column, Result, Table, TableError, Value};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Interprets a cell as a calendar date.
///
/// `Date` cells pass through. `Text` cells are parsed as an ISO date, an ISO date-time
/// (time discarded), an RFC 3339 timestamp, or one of a few common day-first layouts.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Text(s) => {
            let s = s.trim();
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
                .or_else(|| {
                    DATETIME_FORMATS
                        .iter()
                        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                        .map(|dt| dt.date())
                })
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        }
        _ => None,
    }
}

/// Quarter label such as `"2023Q2"`.
pub fn quarter_label(date: NaiveDate) -> String {
    format!("{}Q{}", date.year(), date.month0() / 3 + 1)
}

/// Adds `year_col` (`Int`) and `quarter_col` (`Text`, `<year>Q<q>`) derived from `date_col`.
///
/// The date column itself is normalized to `Date` cells. Existing year/quarter columns are
/// replaced in place; otherwise they are appended. Every other column is unchanged.
///
/// Fails with [`TableError::ColumnNotFound`] if `date_col` is missing and with
/// [`TableError::ParseError`] on the first cell that is not a date.
pub fn enrich_dates(
    table: &Table,
    date_col: &str,
    year_col: &str,
    quarter_col: &str,
) -> Result<Table> {
    let column = table.column(date_col)?;
    let dates = column
        .values()
        .iter()
        .enumerate()
        .map(|(row, v)| {
            parse_date(v).ok_or_else(|| TableError::ParseError {
                column: date_col.to_owned(),
                row,
                value: v.to_string(),
                expected: "a date",
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let years = dates.iter().map(|d| i64::from(d.year()));
    let quarters = dates.iter().map(|d| quarter_label(*d));

    tracing::debug!(rows = dates.len(), date_col, "enriched dates");
    table
        .with_column(Column::from_values(date_col, dates.iter().copied()))?
        .with_column(Column::from_values(year_col, years))?
        .with_column(Column::from_values(quarter_col, quarters))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(1, "2023Q1")]
    #[case(3, "2023Q1")]
    #[case(4, "2023Q2")]
    #[case(9, "2023Q3")]
    #[case(10, "2023Q4")]
    #[case(12, "2023Q4")]
    fn quarter_from_month(#[case] month: u32, #[case] label: &str) {
        assert_eq!(quarter_label(ymd(2023, month, 1)), label);
    }

    #[rstest]
    #[case("2023-04-12")]
    #[case("2023/04/12")]
    #[case("12/04/2023")]
    #[case("2023-04-12 08:30:00")]
    #[case("2023-04-12T08:30:00")]
    #[case("2023-04-12T08:30:00+02:00")]
    fn parses_text_dates(#[case] text: &str) {
        assert_eq!(parse_date(&Value::text(text)), Some(ymd(2023, 4, 12)));
    }

    #[test]
    fn adds_year_and_quarter() {
        let table = Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob"]),
            Column::from_values("DATE", [ymd(2023, 4, 12), ymd(2024, 12, 31)]),
        ])
        .unwrap();
        let out = enrich_dates(&table, "DATE", "YEAR", "QUARTER").unwrap();
        assert_eq!(out.row_count(), 2);
        assert_eq!(
            out.column_names().collect::<Vec<_>>(),
            ["SELLER", "DATE", "YEAR", "QUARTER"]
        );
        assert_eq!(out.column("YEAR").unwrap().values(), [Value::Int(2023), Value::Int(2024)]);
        assert_eq!(
            out.column("QUARTER").unwrap().values(),
            [Value::text("2023Q2"), Value::text("2024Q4")]
        );
        assert_eq!(out.column("SELLER").unwrap(), table.column("SELLER").unwrap());
    }

    #[test]
    fn normalizes_text_dates_and_replaces_existing_columns() {
        let table = Table::new(vec![
            Column::from_values("DATE", ["2023-01-10"]),
            Column::from_values("YEAR", ["stale"]),
        ])
        .unwrap();
        let out = enrich_dates(&table, "DATE", "YEAR", "QUARTER").unwrap();
        assert_eq!(out.column_names().collect::<Vec<_>>(), ["DATE", "YEAR", "QUARTER"]);
        assert_eq!(out.value(0, 0), Some(&Value::Date(ymd(2023, 1, 10))));
        assert_eq!(out.value(0, 1), Some(&Value::Int(2023)));
    }

    #[test]
    fn rejects_unparseable_cells() {
        let table = Table::new(vec![Column::from_values(
            "DATE",
            [Value::text("2023-01-10"), Value::text("soon")],
        )])
        .unwrap();
        let err = enrich_dates(&table, "DATE", "YEAR", "QUARTER").unwrap_err();
        assert!(
            matches!(err, TableError::ParseError { row: 1, ref value, .. } if value == "soon"),
            "{err:?}"
        );
    }

    #[test]
    fn missing_date_column() {
        let table = Table::new(vec![Column::from_values("SELLER", ["Alice"])]).unwrap();
        let err = enrich_dates(&table, "DATE", "YEAR", "QUARTER").unwrap_err();
        assert!(matches!(err, TableError::ColumnNotFound { ref column, .. } if column == "DATE"));
    }

    #[test]
    fn empty_table_gains_empty_columns() {
        let table = Table::new(vec![Column::new("DATE", Vec::new())]).unwrap();
        let out = enrich_dates(&table, "DATE", "YEAR", "QUARTER").unwrap();
        assert_eq!(out.row_count(), 0);
        assert!(out.has_column("QUARTER"));
    }
}
