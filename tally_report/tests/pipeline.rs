// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end report runs on a small sales file.

use std::fs;
use std::path::Path;

use tally_load::LoadError;
use tally_report::{ReportConfig, ReportDriver, ReportError};
use tempfile::TempDir;

const SALES: &str = "\
SELLER,DATE,QUANTITY,UNIT_PRICE,TOTAL
Alice,2023-01-15,10,100.0,1000
Alice,2023-04-12,15,150.0,2250
Bob,2023-07-01,20,200.0,4000
Alice,2025-02-10,8,90.0,720
Bob,2025-11-30,10,150.0,1500
";

fn setup(contents: &str) -> (TempDir, ReportConfig) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    fs::write(&input, contents).unwrap();
    let config = ReportConfig {
        input,
        output_root: dir.path().join("out"),
        ..ReportConfig::default()
    };
    (dir, config)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn fixture_produces_eight_images_and_one_report() {
    let (_dir, config) = setup(SALES);
    let mut out = Vec::new();
    let outcome = ReportDriver::new(&config).run(&mut out).unwrap();

    assert_eq!(outcome.artifacts.len(), 8);
    assert!(outcome.artifacts.iter().all(|p| p.exists()));
    assert_eq!(
        file_names(&config.tables_dir()),
        ["Q1.png", "Q2.png", "Q3.png", "Q5.png", "Q6.png", "Q7.png"]
    );
    assert_eq!(file_names(&config.charts_dir()), ["Q4.png", "Q8.png"]);
    assert_eq!(file_names(&config.reports_dir()), ["sales_report.pdf"]);
    assert_eq!(outcome.document, config.report_path());

    let pdf = fs::read(&outcome.document).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&pdf).contains("/Count 8"));

    // Only the three output directories remain; staging is gone.
    assert_eq!(file_names(&config.output_root), ["charts", "reports", "tables"]);

    let printed = String::from_utf8(out).unwrap();
    for name in ["Q1 :", "Q4 :", "Q8 :"] {
        assert!(printed.contains(name), "missing {name} in output");
    }
    assert!(printed.contains("3250"));
    assert!(printed.contains("TRANSACTIONS"));
}

#[test]
fn missing_input_fails_before_any_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = ReportConfig {
        input: dir.path().join("absent.csv"),
        output_root: dir.path().join("out"),
        ..ReportConfig::default()
    };
    let err = ReportDriver::new(&config).run(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, ReportError::Load(LoadError::NotFound(_))));
    assert!(!config.output_root.exists());
}

#[test]
fn failing_query_leaves_no_artifacts() {
    let (_dir, config) = setup(
        "SELLER,DATE,QUANTITY,TOTAL\n\
         Alice,2023-01-15,10,1000\n\
         Bob,2023-07-01,20,4000\n",
    );
    let err = ReportDriver::new(&config).run(&mut Vec::new()).unwrap_err();
    match err {
        ReportError::Query { query, .. } => assert_eq!(query, "Q4"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(file_names(&config.tables_dir()).is_empty());
    assert!(file_names(&config.charts_dir()).is_empty());
    assert!(file_names(&config.reports_dir()).is_empty());
}

#[test]
fn bad_dates_are_reported() {
    let (_dir, config) = setup("SELLER,DATE,TOTAL\nAlice,someday,10\n");
    let err = ReportDriver::new(&config).run(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, ReportError::Table(_)));
}
