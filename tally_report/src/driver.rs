// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The report driver.
//!
//! Output files are first written into a staging directory under the output root. They are
//! moved to `tables/` and `charts/` only once the PDF report has been written, so a failed
//! run leaves no artifacts behind.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tally_core::Table;
use tally_load::Loader;
use tally_render::{RenderTarget, Renderer, ReportDocument};
use tally_transforms::enrich_dates;
use tempfile::TempDir;

use crate::error::{ReportError, Result};
use crate::query::{Presentation, QuerySpec};
use crate::settings::ReportConfig;

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Image files, in query order.
    pub artifacts: Vec<PathBuf>,
    /// The PDF report.
    pub document: PathBuf,
}

/// A computed query result awaiting its report page.
#[derive(Debug)]
struct QueryResult<'q> {
    query: &'q QuerySpec,
    table: Table,
}

/// Runs a list of queries against one data source.
#[derive(Debug)]
pub struct ReportDriver<'a> {
    config: &'a ReportConfig,
    queries: Vec<QuerySpec>,
    renderer: Renderer,
}

impl<'a> ReportDriver<'a> {
    /// A driver running the default eight questions.
    pub fn new(config: &'a ReportConfig) -> Self {
        let queries = QuerySpec::defaults(&config.columns);
        Self::with_queries(config, queries)
    }

    /// A driver running `queries`, in order.
    pub fn with_queries(config: &'a ReportConfig, queries: Vec<QuerySpec>) -> Self {
        Self {
            config,
            queries,
            renderer: Renderer::new(config.render.options()),
        }
    }

    /// The queries, in run order.
    pub fn queries(&self) -> &[QuerySpec] {
        &self.queries
    }

    /// Loads and enriches the configured input.
    pub fn load(&self) -> Result<Table> {
        let config = self.config;
        let loader = Loader::new(&config.input)?;
        let table = loader.load(config.sheet.as_deref())?;
        let c = &config.columns;
        Ok(enrich_dates(&table, &c.date, &c.year, &c.quarter)?)
    }

    /// Runs every query, printing each result to `out`.
    ///
    /// Each result becomes one image and one report page; table pages come first, then
    /// histogram pages, each group in query order. Any error aborts the run.
    pub fn run(&self, out: &mut dyn Write) -> Result<ReportOutcome> {
        let data = self.load()?;
        let config = self.config;
        for dir in [config.tables_dir(), config.charts_dir(), config.reports_dir()] {
            fs::create_dir_all(&dir).map_err(|e| ReportError::io(&dir, e))?;
        }
        let staging = tempfile::Builder::new()
            .prefix(".tally-")
            .tempdir_in(&config.output_root)
            .map_err(|e| ReportError::io(&config.output_root, e))?;

        let mut document = ReportDocument::create(config.report_path())?
            .with_title(config.report_name.clone());
        let mut staged = Vec::with_capacity(self.queries.len());
        let mut tables = Vec::new();
        let mut histograms = Vec::new();

        for query in &self.queries {
            tracing::info!(query = %query.name, title = %query.title, "running query");
            let table = query
                .program(&config.columns.year)
                .execute(&data)
                .map_err(|source| ReportError::Query {
                    query: query.name.clone(),
                    source,
                })?;
            writeln!(out, "{} : {}\n{table}", query.name, query.title)
                .map_err(ReportError::Print)?;

            let (dir, results) = match query.presentation {
                Presentation::Table => (config.tables_dir(), &mut tables),
                Presentation::Histogram => (config.charts_dir(), &mut histograms),
            };
            let file_name = format!("{}.png", query.name);
            let temp = staging.path().join(&file_name);
            self.render(query, &table, RenderTarget::File(&temp))?;
            staged.push((temp, dir.join(file_name)));
            results.push(QueryResult { query, table });
        }

        for result in tables.iter().chain(&histograms) {
            self.render(result.query, &result.table, RenderTarget::Document(&mut document))?;
        }
        let document = document.finish()?;
        let artifacts = publish(&staging, staged)?;
        tracing::info!(
            artifacts = artifacts.len(),
            document = %document.display(),
            "report complete"
        );
        Ok(ReportOutcome {
            artifacts,
            document,
        })
    }

    fn render(&self, query: &QuerySpec, table: &Table, target: RenderTarget<'_>) -> Result<()> {
        let settings = &self.config.render;
        match (query.presentation, query.value_column()) {
            (Presentation::Histogram, Some(column)) => self.renderer.render_histogram(
                table,
                &column,
                &query.title,
                settings.bin_count,
                target,
            )?,
            _ => self
                .renderer
                .render_table(table, &query.title, settings.max_rows, target)?,
        }
        Ok(())
    }
}

/// Moves staged files to their final paths.
fn publish(staging: &TempDir, staged: Vec<(PathBuf, PathBuf)>) -> Result<Vec<PathBuf>> {
    let mut published = Vec::with_capacity(staged.len());
    for (from, to) in staged {
        fs::rename(&from, &to).map_err(|e| ReportError::io(&to, e))?;
        published.push(to);
    }
    tracing::debug!(staging = %staging.path().display(), "published artifacts");
    Ok(published)
}
