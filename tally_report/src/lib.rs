// Copyright 2025 the Tally Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sales report generation.
//!
//! [`ReportDriver`] loads the configured source, derives year and quarter columns, runs each
//! [`QuerySpec`] and writes one PNG per query plus a multi-page PDF bundling all of them.
//! Configuration is an explicit [`ReportConfig`] value.

mod driver;
mod error;
mod query;
mod settings;

pub use driver::{ReportDriver, ReportOutcome};
pub use error::{ReportError, Result};
pub use query::{Presentation, QuerySpec};
pub use settings::{ColumnNames, RenderSettings, ReportConfig};
