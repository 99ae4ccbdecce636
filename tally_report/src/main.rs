// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `tally`: runs the sales report.
//!
//! Usage: `tally [CONFIG.toml]`. Without an argument, `tally.toml` is read when present.
//! Query results go to stdout; logs go to stderr (filter with `RUST_LOG`).

use std::io::{self, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use tally_report::{ReportConfig, ReportDriver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config =
        ReportConfig::load(config_path.as_deref()).context("failed to load configuration")?;
    tracing::info!(input = %config.input.display(), "starting report");

    let driver = ReportDriver::new(&config);
    let mut out = io::stdout().lock();
    let outcome = driver.run(&mut out)?;
    writeln!(out, "Report generated: {}", outcome.document.display())?;
    Ok(())
}
