//! HTML report generation.
//!
//! This module generates the combined HTML test report from the merged
//! aggregate report.

use super::{RenderOptions, ReportRenderer};
use crate::error::Result;
use crate::models::{AggregateReport, ProjectReport, TestSummary};

/// Renders a self-contained HTML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &AggregateReport, options: &RenderOptions) -> Result<String> {
        let mut output = String::new();

        output.push_str(&generate_head(&report.name));
        output.push_str("<body>\n");

        output.push_str(&generate_header_section(report, options)?);
        output.push_str(&generate_totals_section(&report.summary));
        output.push_str(&generate_projects_section(&report.projects, options)?);

        output.push_str(&generate_footer());
        output.push_str("</body>\n</html>\n");

        Ok(output)
    }
}

/// Generate the doctype and `<head>` element.
fn generate_head(name: &str) -> String {
    let mut head = String::new();

    head.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str(&format!("<title>{} test report</title>\n", escape_html(name)));
    head.push_str("<style>\n");
    head.push_str("body { font-family: sans-serif; margin: 2em; }\n");
    head.push_str("table { border-collapse: collapse; }\n");
    head.push_str("th, td { border: 1px solid #ccc; padding: 0.3em 0.8em; text-align: right; }\n");
    head.push_str("th:first-child, td:first-child { text-align: left; }\n");
    head.push_str(".passed { color: #1a7f37; }\n");
    head.push_str(".failed { color: #cf222e; }\n");
    head.push_str("</style>\n</head>\n");

    head
}

/// Generate the run header.
fn generate_header_section(report: &AggregateReport, options: &RenderOptions) -> Result<String> {
    let mut section = String::new();

    section.push_str(&format!(
        "<h1 class=\"{}\">{}</h1>\n",
        status_class(report.has_failures()),
        escape_html(&report.name)
    ));
    section.push_str("<ul class=\"metadata\">\n");
    section.push_str(&format!(
        "<li><strong>Started:</strong> {}</li>\n",
        escape_html(&options.format_date(&report.summary.start_time)?)
    ));
    section.push_str(&format!(
        "<li><strong>Duration:</strong> {}</li>\n",
        escape_html(&(options.format_duration)(report.summary.duration))
    ));
    section.push_str(&format!(
        "<li><strong>Projects:</strong> {}</li>\n",
        report.projects.len()
    ));
    section.push_str("</ul>\n");

    Ok(section)
}

/// Generate the totals table.
fn generate_totals_section(summary: &TestSummary) -> String {
    let mut section = String::new();

    section.push_str("<h2>Summary</h2>\n");
    section.push_str("<table class=\"totals\">\n");
    section.push_str("<tr><th>Tests</th><th>Passed</th><th>Failed</th><th>Skipped</th></tr>\n");
    section.push_str(&format!(
        "<tr><td>{}</td><td class=\"passed\">{}</td><td class=\"failed\">{}</td><td>{}</td></tr>\n",
        summary.tests, summary.passed, summary.failed, summary.skipped
    ));
    section.push_str("</table>\n");

    section
}

/// Generate the per-project table.
fn generate_projects_section(projects: &[ProjectReport], options: &RenderOptions) -> Result<String> {
    let mut section = String::new();

    section.push_str("<h2>Projects</h2>\n");

    if projects.is_empty() {
        section.push_str("<p>No project reports were found.</p>\n");
        return Ok(section);
    }

    section.push_str("<table class=\"projects\">\n");
    section.push_str(
        "<tr><th>Project</th><th>Tests</th><th>Passed</th><th>Failed</th><th>Skipped</th>\
         <th>Suites</th><th>Duration</th><th>Started</th></tr>\n",
    );

    for project in projects {
        section.push_str(&generate_project_row(project, options)?);
    }

    section.push_str("</table>\n");

    Ok(section)
}

/// Generate a single project row.
fn generate_project_row(project: &ProjectReport, options: &RenderOptions) -> Result<String> {
    let summary = &project.summary;

    Ok(format!(
        "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
         <td>{}</td><td>{}</td><td>{}</td></tr>\n",
        status_class(summary.failed > 0),
        escape_html(&project.name),
        summary.tests,
        summary.passed,
        summary.failed,
        summary.skipped,
        project.suites.len(),
        escape_html(&(options.format_duration)(summary.duration)),
        escape_html(&options.format_date(&summary.start_time)?),
    ))
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "<footer><p>Generated by junit-summary {}</p></footer>\n",
        env!("CARGO_PKG_VERSION")
    )
}

fn status_class(failed: bool) -> &'static str {
    if failed {
        "failed"
    } else {
        "passed"
    }
}

/// Escape text for inclusion in HTML element content and attributes.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
