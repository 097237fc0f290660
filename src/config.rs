//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.junit-summary.toml` files.

use anyhow::{Context, Result};
use junit_summary::aggregator::DEFAULT_REPORT_PREFIX;
use junit_summary::report::DEFAULT_DATE_PATTERN;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILENAME: &str = ".junit-summary.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Aggregation settings.
    #[serde(default)]
    pub aggregate: AggregateConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// How project reports are found and merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Prefix of project report directories.
    #[serde(default = "default_report_prefix")]
    pub report_prefix: String,

    /// Fail when a discovered project has no summary.
    #[serde(default = "default_true")]
    pub fail_on_missing_report: bool,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            report_prefix: default_report_prefix(),
            fail_on_missing_report: true,
        }
    }
}

fn default_report_prefix() -> String {
    DEFAULT_REPORT_PREFIX.to_string()
}

fn default_true() -> bool {
    true
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// chrono format pattern for timestamps.
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            date_pattern: default_date_pattern(),
        }
    }
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILENAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref prefix) = args.prefix {
            self.aggregate.report_prefix = prefix.clone();
        }

        if args.allow_missing {
            self.aggregate.fail_on_missing_report = false;
        }

        if let Some(ref pattern) = args.date_pattern {
            self.report.date_pattern = pattern.clone();
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
