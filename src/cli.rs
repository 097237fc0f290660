//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// junit-summary - combine per-project JUnit reports into one summary
///
/// Run once per build after every project's report artifact has been
/// downloaded into the working directory, one subdirectory per project.
///
/// Examples:
///   junit-summary --work-dir ./artifacts
///   junit-summary --work-dir ./artifacts --name "nightly" --allow-missing
///   junit-summary --work-dir ./artifacts --print-json
///   junit-summary --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing one subdirectory per project report
    ///
    /// The combined output is written to `aggregate-report/` inside it.
    #[arg(
        short,
        long,
        value_name = "DIR",
        env = "JUNIT_SUMMARY_WORK_DIR",
        required_unless_present = "init_config"
    )]
    pub work_dir: Option<PathBuf>,

    /// Name of the overall run shown in the combined report
    #[arg(short, long, default_value = "tests", env = "GITHUB_WORKFLOW")]
    pub name: String,

    /// Artifact directory prefix identifying project reports
    ///
    /// Also stripped from the project name when naming copied reports.
    /// Default: from config or "test-report-".
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Skip projects without a summary instead of failing
    #[arg(long)]
    pub allow_missing: bool,

    /// chrono format pattern for timestamps in the HTML report
    #[arg(long, value_name = "PATTERN")]
    pub date_pattern: Option<String>,

    /// Print the merged summary JSON to stdout
    #[arg(long)]
    pub print_json: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .junit-summary.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .junit-summary.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        match self.work_dir {
            None => return Err("--work-dir is required".to_string()),
            Some(ref dir) if !dir.exists() => {
                return Err(format!(
                    "Working directory does not exist: {}",
                    dir.display()
                ));
            }
            Some(ref dir) if !dir.is_dir() => {
                return Err(format!(
                    "Working directory is not a directory: {}",
                    dir.display()
                ));
            }
            Some(_) => {}
        }

        if self.name.trim().is_empty() {
            return Err("Run name must not be empty".to_string());
        }

        if let Some(ref pattern) = self.date_pattern {
            if pattern.is_empty() {
                return Err("Date pattern must not be empty".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            work_dir: Some(std::env::temp_dir()),
            name: "tests".to_string(),
            prefix: None,
            allow_missing: false,
            date_pattern: None,
            print_json: false,
            config: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_valid_args() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_work_dir() {
        let mut args = make_args();
        args.work_dir = Some(PathBuf::from("/definitely/not/here"));
        assert!(args.validate().is_err());

        args.work_dir = None;
        assert!(args.validate().is_err());

        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "junit-summary",
            "--work-dir",
            "/tmp",
            "--name",
            "nightly",
            "--allow-missing",
            "--prefix",
            "junit-",
        ])
        .unwrap();

        assert_eq!(args.work_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(args.name, "nightly");
        assert!(args.allow_missing);
        assert_eq!(args.prefix.as_deref(), Some("junit-"));
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
