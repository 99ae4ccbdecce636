// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Equal-width binning for histograms.

use tally_core::{Result, Table};

/// Equal-width bins over a closed range.
///
/// `edges` has `counts.len() + 1` entries. Every bin is half-open `[lo, hi)` except the last,
/// which also includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// Bin boundaries, ascending.
    pub edges: Vec<f64>,
    /// Number of values per bin.
    pub counts: Vec<u64>,
}

impl Bins {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if there are no bins.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of binned values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Largest bin count.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Iterates `(lo, hi, count)` per bin.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Bins `values` into `bin_count` equal-width bins spanning their range.
///
/// `NaN` values are ignored. A degenerate range (all values equal) is widened by `0.5` on each
/// side; an empty input bins over `[0, 1]`. A `bin_count` of zero is treated as one.
pub fn bin(values: impl IntoIterator<Item = f64>, bin_count: usize) -> Bins {
    let values: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
    let n = bin_count.max(1);

    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        (lo, hi) = (0.0, 1.0);
    } else if lo == hi {
        (lo, hi) = (lo - 0.5, hi + 0.5);
    }

    let width = (hi - lo) / n as f64;
    let mut edges: Vec<f64> = (0..=n).map(|i| lo + width * i as f64).collect();
    edges[n] = hi;

    let mut counts = vec![0_u64; n];
    for v in values {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "v lies in [lo, hi], so the ratio is in [0, n]"
        )]
        let idx = (((v - lo) / width) as usize).min(n - 1);
        counts[idx] += 1;
    }
    tracing::debug!(bins = n, lo, hi, "binned");
    Bins { edges, counts }
}

/// Bins the numeric cells of `column`, skipping missing cells.
pub fn histogram(table: &Table, column: &str, bin_count: usize) -> Result<Bins> {
    let col = table.column(column)?;
    let mut values = Vec::with_capacity(col.len());
    for row in 0..col.len() {
        if let Some(v) = col.f64_at(row)? {
            values.push(v);
        }
    }
    Ok(bin(values, bin_count))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tally_core::{Column, TableError, Value};

    use super::*;

    #[test]
    fn counts_with_inclusive_last_bin() {
        let bins = bin([0.0, 1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.edges, [0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(bins.counts, [1, 1, 1, 2]);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let bins = bin([5.0, 5.0], 2);
        assert_eq!(bins.edges, [4.5, 5.0, 5.5]);
        assert_eq!(bins.counts, [0, 2]);
    }

    #[test]
    fn empty_input_has_zero_counts() {
        let bins = bin(core::iter::empty(), 10);
        assert_eq!(bins.len(), 10);
        assert_eq!(bins.total(), 0);
        assert_eq!(bins.edges.first(), Some(&0.0));
        assert_eq!(bins.edges.last(), Some(&1.0));
    }

    #[test]
    fn nan_is_ignored() {
        let bins = bin([1.0, f64::NAN, 2.0], 1);
        assert_eq!(bins.counts, [2]);
    }

    #[test]
    fn histogram_reads_column() {
        let table = Table::new(vec![Column::from_values(
            "UNIT_PRICE",
            [Value::Float(100.0), Value::Null, Value::Int(300)],
        )])
        .unwrap();
        let bins = histogram(&table, "UNIT_PRICE", 2).unwrap();
        assert_eq!(bins.counts, [1, 1]);
        assert!(matches!(
            histogram(&table, "PRICE", 2),
            Err(TableError::ColumnNotFound { .. })
        ));
    }

    proptest! {
        #[test]
        fn counts_cover_every_value(
            xs in prop::collection::vec(-1e6_f64..1e6, 0..200),
            n in 1_usize..20,
        ) {
            let bins = bin(xs.iter().copied(), n);
            prop_assert_eq!(bins.len(), n);
            prop_assert_eq!(bins.edges.len(), n + 1);
            prop_assert_eq!(bins.total(), xs.len() as u64);
        }
    }
}
