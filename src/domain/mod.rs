//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the loaded rows (`SalesRecord`, `Dataset`)
//! - the report-type selector values (`ReportType`)
//! - group-by vocabulary and outputs (`KeyColumn`, `ValueColumn`, `AggOp`, `AggregatedSeries`)

pub mod types;

pub use types::*;
