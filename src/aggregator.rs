//! Aggregation of per-project test reports.
//!
//! A [`ReportAggregator`] is bound to a working directory holding one
//! subdirectory per project. Each [`ReportAggregator::add_project`] call
//! folds that project's summary into the running [`AggregateReport`] and
//! stages its HTML report; [`ReportAggregator::finalize`] writes the merged
//! JSON summary and the combined HTML report.

use crate::error::{AggregateError, Result};
use crate::locator::locate_report;
use crate::models::{AggregateReport, ProjectReport};
use crate::report::{HtmlRenderer, RenderOptions, ReportRenderer};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the machine-readable summary, both per project and combined.
pub const SUMMARY_FILENAME: &str = "project-summary.json";
/// Name of the human-readable report, both per project and combined.
pub const HTML_FILENAME: &str = "test-report.html";
/// Directory under the working directory receiving all produced files.
pub const OUTPUT_DIRNAME: &str = "aggregate-report";
/// Artifact name prefix stripped when naming copied project reports.
pub const DEFAULT_REPORT_PREFIX: &str = "test-report-";

const PROJECT_REPORT_SUFFIX: &str = "-report.html";

/// Everything produced by a finished aggregation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// The merged report.
    pub report: AggregateReport,
    /// Directory containing every produced file.
    pub basedir: PathBuf,
    /// Produced files, in the order they were written.
    pub files: Vec<PathBuf>,
}

/// Merges project reports found under a working directory.
pub struct ReportAggregator<R = HtmlRenderer> {
    work_dir: PathBuf,
    fail_on_missing_report: bool,
    report_prefix: String,
    renderer: R,
    options: RenderOptions,
    output: GeneratedReport,
}

impl ReportAggregator<HtmlRenderer> {
    /// Create an aggregator rendering with the default HTML renderer.
    pub fn new(work_dir: impl Into<PathBuf>, name: &str, fail_on_missing_report: bool) -> Self {
        Self::with_renderer(work_dir, name, fail_on_missing_report, HtmlRenderer)
    }
}

impl<R: ReportRenderer> ReportAggregator<R> {
    /// Create an aggregator with a custom renderer.
    pub fn with_renderer(
        work_dir: impl Into<PathBuf>,
        name: &str,
        fail_on_missing_report: bool,
        renderer: R,
    ) -> Self {
        let work_dir = work_dir.into();
        let basedir = work_dir.join(OUTPUT_DIRNAME);

        Self {
            work_dir,
            fail_on_missing_report,
            report_prefix: DEFAULT_REPORT_PREFIX.to_string(),
            renderer,
            options: RenderOptions::default(),
            output: GeneratedReport {
                report: AggregateReport::new(name),
                basedir,
                files: Vec::new(),
            },
        }
    }

    /// Override the presentation options passed to the renderer.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Override the prefix stripped from project names.
    pub fn with_report_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.report_prefix = prefix.into();
        self
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &AggregateReport {
        &self.output.report
    }

    /// Merge one project into the aggregate.
    ///
    /// A missing summary is an error only when `fail_on_missing_report` is
    /// set; otherwise the project is skipped. The aggregate is only touched
    /// once both files are found and the HTML report has been copied.
    pub async fn add_project(&mut self, project: &str) -> Result<()> {
        self.ensure_output_dir().await?;

        let Some(summary_file) = locate_report(&self.work_dir, project, SUMMARY_FILENAME).await
        else {
            if self.fail_on_missing_report {
                return Err(AggregateError::MissingReport {
                    project: project.to_string(),
                });
            }
            warn!("No report found for project {}, skipping", project);
            return Ok(());
        };

        let report = load_project_report(&summary_file).await?;

        let html_file = locate_report(&self.work_dir, project, HTML_FILENAME)
            .await
            .ok_or_else(|| AggregateError::IncompleteReport {
                project: project.to_string(),
                file: HTML_FILENAME.to_string(),
            })?;

        let target_file = self.copy_project_html_report(project, &html_file).await?;

        info!(
            "Added project {} ({} tests, {} failed)",
            report.name, report.summary.tests, report.summary.failed
        );

        self.output.report.add_report(report);
        self.output.files.push(target_file);

        Ok(())
    }

    /// Write the combined summary and HTML report and return the bundle.
    pub async fn finalize(mut self) -> Result<GeneratedReport> {
        self.ensure_output_dir().await?;

        let json_summary = self.generate_summary_json().await?;
        self.output.files.push(json_summary);

        let html_summary = self.generate_summary_report().await?;
        self.output.files.push(html_summary);

        info!(
            "Aggregated {} projects into {}",
            self.output.report.projects.len(),
            self.output.basedir.display()
        );

        Ok(self.output)
    }

    /// Create the output directory, resolving relative paths against the
    /// current directory so every produced path is absolute.
    async fn ensure_output_dir(&mut self) -> Result<()> {
        if !self.output.basedir.is_absolute() {
            self.work_dir = std::path::absolute(&self.work_dir)
                .map_err(|e| AggregateError::io(&self.work_dir, e))?;
            self.output.basedir = self.work_dir.join(OUTPUT_DIRNAME);
        }

        tokio::fs::create_dir_all(&self.output.basedir)
            .await
            .map_err(|e| AggregateError::io(&self.output.basedir, e))
    }

    /// File name for a copied project report, e.g. `test-report-api` -> `api-report.html`.
    fn project_report_name(&self, project: &str) -> String {
        let stem = project.strip_prefix(&self.report_prefix).unwrap_or(project);
        format!("{}{}", stem, PROJECT_REPORT_SUFFIX)
    }

    async fn copy_project_html_report(&self, project: &str, source: &Path) -> Result<PathBuf> {
        let target = self.output.basedir.join(self.project_report_name(project));

        tokio::fs::copy(source, &target)
            .await
            .map_err(|e| AggregateError::io(source, e))?;

        debug!("Copied {} to {}", source.display(), target.display());
        Ok(target)
    }

    async fn generate_summary_json(&self) -> Result<PathBuf> {
        let summary_file = self.output.basedir.join(SUMMARY_FILENAME);
        let content = serde_json::to_string(&self.output.report)?;

        tokio::fs::write(&summary_file, content)
            .await
            .map_err(|e| AggregateError::io(&summary_file, e))?;

        Ok(summary_file)
    }

    async fn generate_summary_report(&self) -> Result<PathBuf> {
        let document = self.renderer.render(&self.output.report, &self.options)?;
        let report_file = self.output.basedir.join(HTML_FILENAME);

        tokio::fs::write(&report_file, document)
            .await
            .map_err(|e| AggregateError::io(&report_file, e))?;

        Ok(report_file)
    }
}

async fn load_project_report(path: &Path) -> Result<ProjectReport> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AggregateError::io(path, e))?;

    serde_json::from_str(&data).map_err(|source| AggregateError::MalformedReport {
        path: path.to_path_buf(),
        source,
    })
}
