//! junit-summary - combine per-project JUnit reports into one summary
//!
//! A CLI tool run once per CI build, after every project's test report
//! has been downloaded, that merges them into a single combined report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing or malformed report, I/O failure, etc.)

mod cli;
mod config;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILENAME};
use junit_summary::discovery::discover_projects;
use junit_summary::report::RenderOptions;
use junit_summary::{GeneratedReport, ReportAggregator};
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

/// Step output name holding the merged summary JSON.
const GITHUB_OUTPUT_KEY: &str = "test-results";

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("junit-summary v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Unexpected error while processing JUnit results: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .junit-summary.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILENAME);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILENAME);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILENAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILENAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Discover, merge and publish the project reports.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let work_dir = args
        .work_dir
        .as_deref()
        .context("--work-dir is required")?;
    let work_dir = std::fs::canonicalize(work_dir)
        .with_context(|| format!("Failed to resolve working directory {}", work_dir.display()))?;

    let projects = discover_projects(&work_dir, &config.aggregate.report_prefix)?;
    info!(
        "Found {} project reports in {}",
        projects.len(),
        work_dir.display()
    );

    let options = RenderOptions {
        date_pattern: config.report.date_pattern.clone(),
        ..RenderOptions::default()
    };

    let mut aggregator = ReportAggregator::new(
        &work_dir,
        &args.name,
        config.aggregate.fail_on_missing_report,
    )
    .with_report_prefix(config.aggregate.report_prefix.clone())
    .with_options(options);

    for project in &projects {
        aggregator
            .add_project(project)
            .await
            .with_context(|| format!("Failed to add project {}", project))?;
    }

    let output = aggregator.finalize().await?;
    let json = serde_json::to_string(&output.report).context("Failed to serialize summary")?;

    if let Ok(github_output) = std::env::var("GITHUB_OUTPUT") {
        write_step_output(Path::new(&github_output), GITHUB_OUTPUT_KEY, &json)?;
    }

    if args.print_json {
        println!("{}", json);
    } else if !args.quiet {
        print_summary(&output);
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILENAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Append `key=value` to a GitHub Actions step output file.
fn write_step_output(path: &Path, key: &str, value: &str) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open step output file {}", path.display()))?;

    writeln!(file, "{}={}", key, value)
        .with_context(|| format!("Failed to write step output file {}", path.display()))?;

    debug!("Wrote {} to {}", key, path.display());
    Ok(())
}

fn print_summary(output: &GeneratedReport) {
    let summary = &output.report.summary;

    println!("\n📊 Test Summary: {}", output.report.name);
    println!("   Projects: {}", output.report.projects.len());
    println!(
        "   Tests: {} | ✅ Passed: {} | ❌ Failed: {} | ⏭️  Skipped: {}",
        summary.tests, summary.passed, summary.failed, summary.skipped
    );
    println!(
        "   Duration: {}",
        junit_summary::report::format_test_duration(summary.duration)
    );
    println!("\n📁 Files written to {}:", output.basedir.display());
    for file in &output.files {
        println!("   {}", file.display());
    }
}
