// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plain-text rendering of tables for console output.

use core::fmt;

use crate::table::Table;

impl fmt::Display for Table {
    /// Right-aligned grid with a leading row index, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index: Vec<String> = (0..self.row_count()).map(|r| r.to_string()).collect();
        let index_w = index.iter().map(|s| s.chars().count()).max().unwrap_or(0);

        let cells: Vec<Vec<String>> = self
            .columns()
            .iter()
            .map(|c| c.values().iter().map(ToString::to_string).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns()
            .iter()
            .zip(&cells)
            .map(|(c, vals)| {
                vals.iter()
                    .map(|s| s.chars().count())
                    .chain([c.name().chars().count()])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:index_w$}", "")?;
        for (c, w) in self.columns().iter().zip(&widths) {
            write!(f, "  {:>w$}", c.name())?;
        }
        for (row, idx) in index.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{idx:<index_w$}")?;
            for (vals, w) in cells.iter().zip(&widths) {
                write!(f, "  {:>w$}", vals[row])?;
            }
        }
        if self.is_empty() {
            write!(f, "\n[0 rows]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Column, Table};

    #[test]
    fn renders_header_index_and_aligned_cells() {
        let t = Table::new(vec![
            Column::from_values("SELLER", ["Alice", "Bob"]),
            Column::from_values("TOTAL", [3970_i64, 5500]),
        ])
        .expect("valid table");
        let text = t.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            ["   SELLER  TOTAL", "0   Alice   3970", "1     Bob   5500"]
        );
    }

    #[test]
    fn empty_table_says_so() {
        let t = Table::new(vec![Column::from_values::<i64>("X", [])]).expect("valid table");
        assert!(t.to_string().ends_with("[0 rows]"), "{t}");
    }
}
