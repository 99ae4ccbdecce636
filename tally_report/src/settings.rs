// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run settings.
//!
//! Values come from an optional TOML file, then from `TALLY__*` environment variables
//! (`TALLY__INPUT`, `TALLY__RENDER__MAX_ROWS`, ...). Every field has a default.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use tally_render::RenderOptions;

use crate::error::Result;

/// Top-level configuration for one report run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportConfig {
    /// Data file to analyse.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Workbook sheet to read; the first sheet when absent.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Directory holding `tables/`, `charts/` and `reports/`.
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// File stem of the PDF report.
    #[serde(default = "default_report_name")]
    pub report_name: String,
    /// Source column names.
    #[serde(default)]
    pub columns: ColumnNames,
    /// Image settings.
    #[serde(default)]
    pub render: RenderSettings,
}

fn default_input() -> PathBuf {
    PathBuf::from("data/Data_Load.xlsx")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("data/output")
}

fn default_report_name() -> String {
    "sales_report".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            sheet: None,
            output_root: default_output_root(),
            report_name: default_report_name(),
            columns: ColumnNames::default(),
            render: RenderSettings::default(),
        }
    }
}

impl ReportConfig {
    /// Loads configuration.
    ///
    /// With `path`, that file must exist. Without it, `tally.toml` in the working directory
    /// is used when present. Environment variables override both.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`](crate::ReportError::Config) if a source cannot be read
    /// or a value has the wrong type.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("tally").required(false),
        };
        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("TALLY").separator("__"))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// `<output_root>/tables`.
    pub fn tables_dir(&self) -> PathBuf {
        self.output_root.join("tables")
    }

    /// `<output_root>/charts`.
    pub fn charts_dir(&self) -> PathBuf {
        self.output_root.join("charts")
    }

    /// `<output_root>/reports`.
    pub fn reports_dir(&self) -> PathBuf {
        self.output_root.join("reports")
    }

    /// Destination of the PDF report.
    pub fn report_path(&self) -> PathBuf {
        self.reports_dir().join(format!("{}.pdf", self.report_name))
    }
}

/// Names of the columns the queries read or derive.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnNames {
    /// Seller identifier.
    #[serde(default = "default_seller")]
    pub seller: String,
    /// Transaction date.
    #[serde(default = "default_date")]
    pub date: String,
    /// Derived calendar year.
    #[serde(default = "default_year")]
    pub year: String,
    /// Derived quarter label.
    #[serde(default = "default_quarter")]
    pub quarter: String,
    /// Transaction revenue.
    #[serde(default = "default_total")]
    pub total: String,
    /// Units sold.
    #[serde(default = "default_quantity")]
    pub quantity: String,
    /// Price per unit.
    #[serde(default = "default_unit_price")]
    pub unit_price: String,
}

fn default_seller() -> String {
    "SELLER".to_string()
}

fn default_date() -> String {
    "DATE".to_string()
}

fn default_year() -> String {
    "YEAR".to_string()
}

fn default_quarter() -> String {
    "QUARTER".to_string()
}

fn default_total() -> String {
    "TOTAL".to_string()
}

fn default_quantity() -> String {
    "QUANTITY".to_string()
}

fn default_unit_price() -> String {
    "UNIT_PRICE".to_string()
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            seller: default_seller(),
            date: default_date(),
            year: default_year(),
            quarter: default_quarter(),
            total: default_total(),
            quantity: default_quantity(),
            unit_price: default_unit_price(),
        }
    }
}

/// Table and histogram image settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RenderSettings {
    /// Body rows drawn per table image.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
    /// Histogram bin count.
    #[serde(default = "default_bin_count")]
    pub bin_count: usize,
    /// Image width cap in pixels.
    #[serde(default = "default_max_side")]
    pub max_width: u32,
    /// Image height cap in pixels.
    #[serde(default = "default_max_side")]
    pub max_height: u32,
    /// Pixels per layout unit.
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_max_rows() -> usize {
    30
}

fn default_bin_count() -> usize {
    10
}

fn default_max_side() -> u32 {
    1800
}

fn default_scale() -> f64 {
    1.0
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_rows: default_max_rows(),
            bin_count: default_bin_count(),
            max_width: default_max_side(),
            max_height: default_max_side(),
            scale: default_scale(),
        }
    }
}

impl RenderSettings {
    /// Renderer sizing options for these settings.
    pub fn options(&self) -> RenderOptions {
        RenderOptions::default()
            .with_scale(self.scale)
            .with_max_size(self.max_width, self.max_height)
    }
}
