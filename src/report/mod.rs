//! Rendering of the combined human-readable report.
//!
//! The engine only talks to the [`ReportRenderer`] trait; the default
//! implementation is the [`HtmlRenderer`] in `generator`.

mod generator;

pub use generator::HtmlRenderer;

use crate::error::{AggregateError, Result};
use crate::models::AggregateReport;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt::Write;

/// Default chrono pattern used for start times, e.g. `14:03:27, 5 March, 2024`.
pub const DEFAULT_DATE_PATTERN: &str = "%H:%M:%S, %-d %B, %Y";

/// Presentation options handed to a renderer alongside the report.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// chrono strftime pattern for timestamps.
    pub date_pattern: String,
    /// Turns a duration in seconds into words.
    pub format_duration: fn(f64) -> String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date_pattern: DEFAULT_DATE_PATTERN.to_string(),
            format_duration: format_test_duration,
        }
    }
}

impl RenderOptions {
    /// Format a timestamp with the configured pattern.
    pub fn format_date(&self, date: &DateTime<Utc>) -> Result<String> {
        format_date(date, &self.date_pattern)
    }
}

/// Turns an aggregate report into a document.
pub trait ReportRenderer {
    fn render(&self, report: &AggregateReport, options: &RenderOptions) -> Result<String>;
}

/// Format a timestamp, reporting an invalid pattern as an error.
pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| AggregateError::Render(format!("invalid date pattern: {pattern}")))?;
    Ok(out)
}

/// Humanize a test duration given in seconds.
///
/// Anything under a minute keeps two decimals. Longer durations are split
/// into calendar units as if the interval started at the Unix epoch, e.g.
/// `135.4` becomes `2 minutes, 15 seconds`.
pub fn format_test_duration(seconds: f64) -> String {
    if seconds < 60.0 {
        return format!("{:.2} seconds", seconds);
    }

    let millis = (seconds * 1000.0) as i64;
    let Some(end) = DateTime::<Utc>::from_timestamp_millis(millis) else {
        return format!("{:.2} seconds", seconds);
    };

    let units = [
        (i64::from(end.year()) - 1970, "year"),
        (i64::from(end.month0()), "month"),
        (i64::from(end.day0()), "day"),
        (i64::from(end.hour()), "hour"),
        (i64::from(end.minute()), "minute"),
        (i64::from(end.second()), "second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| {
            if *value == 1 {
                format!("{} {}", value, unit)
            } else {
                format!("{} {}s", value, unit)
            }
        })
        .collect();

    if parts.is_empty() {
        "0 seconds".to_string()
    } else {
        parts.join(", ")
    }
}
