//! junit-summary - merge per-project JUnit summaries into one report.
//!
//! Parallel CI jobs each publish a `project-summary.json` and a
//! `test-report.html`. This crate folds those into a single combined
//! summary and HTML report under `aggregate-report/`.

pub mod aggregator;
pub mod discovery;
pub mod error;
pub mod locator;
pub mod models;
pub mod report;

pub use aggregator::{GeneratedReport, ReportAggregator};
pub use error::AggregateError;
pub use models::{AggregateReport, ProjectReport, TestSummary};
