//! Data models for test summaries.
//!
//! This module contains the shapes shared between the upstream per-project
//! summaries and the combined report: a single run [`TestSummary`], a
//! [`ProjectReport`] loaded from disk, and the [`AggregateReport`]
//! accumulator that folds project reports together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters and timing for one test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    /// When the run started.
    pub start_time: DateTime<Utc>,
    /// Wall-clock duration in seconds.
    pub duration: f64,
    /// Total number of tests.
    pub tests: u64,
    /// Number of passed tests.
    pub passed: u64,
    /// Number of failed tests.
    pub failed: u64,
    /// Number of skipped tests.
    pub skipped: u64,
}

impl TestSummary {
    /// An empty summary starting at `start_time`.
    pub fn empty(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            duration: 0.0,
            tests: 0,
            passed: 0,
            failed: 0,
            skipped: 0,
        }
    }
}

/// Summary produced for a single project build.
///
/// Suite entries are carried through untouched; only the upstream converter
/// knows their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Display name of the project.
    pub name: String,
    /// Totals for the project.
    pub summary: TestSummary,
    /// Per-suite detail records.
    #[serde(default)]
    pub suites: Vec<serde_json::Value>,
}

/// Combined report for a whole build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Overall run identifier.
    pub name: String,
    /// Project reports in the order they were added.
    pub projects: Vec<ProjectReport>,
    /// Running totals across all projects.
    pub summary: TestSummary,
}

impl AggregateReport {
    /// Creates an empty report whose start time is the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self::starting_at(name, Utc::now())
    }

    /// Creates an empty report with an explicit initial start time.
    pub fn starting_at(name: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            projects: Vec::new(),
            summary: TestSummary::empty(start_time),
        }
    }

    /// Appends a project report and folds its summary into the totals.
    ///
    /// The earliest start time wins; durations and counters are summed.
    pub fn add_report(&mut self, report: ProjectReport) {
        let incoming = &report.summary;
        let summary = &mut self.summary;

        if incoming.start_time < summary.start_time {
            summary.start_time = incoming.start_time;
        }

        summary.duration += incoming.duration;

        summary.tests += incoming.tests;
        summary.passed += incoming.passed;
        summary.failed += incoming.failed;
        summary.skipped += incoming.skipped;

        self.projects.push(report);
    }

    /// Returns true if any project reported a failed test.
    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn project(name: &str, start: DateTime<Utc>, duration: f64, counts: [u64; 3]) -> ProjectReport {
        let [passed, failed, skipped] = counts;
        ProjectReport {
            name: name.to_string(),
            summary: TestSummary {
                start_time: start,
                duration,
                tests: passed + failed + skipped,
                passed,
                failed,
                skipped,
            },
            suites: Vec::new(),
        }
    }

    #[test]
    fn test_new_report_is_empty() {
        let before = Utc::now();
        let report = AggregateReport::new("ci");
        let after = Utc::now();

        assert_eq!(report.name, "ci");
        assert!(report.projects.is_empty());
        assert_eq!(report.summary.tests, 0);
        assert_eq!(report.summary.duration, 0.0);
        assert!(report.summary.start_time >= before && report.summary.start_time <= after);
    }

    #[test]
    fn test_add_report_sums_counters() {
        let now = Utc::now();
        let mut report = AggregateReport::starting_at("ci", now);

        report.add_report(project("a", now, 1.5, [2, 1, 0]));
        report.add_report(project("b", now, 2.25, [4, 0, 3]));

        assert_eq!(report.summary.tests, 10);
        assert_eq!(report.summary.passed, 6);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.skipped, 3);
        assert!((report.summary.duration - 3.75).abs() < 1e-9);
        assert!(report.has_failures());
    }

    #[test]
    fn test_earliest_start_time_wins() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let middle = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();

        let mut report = AggregateReport::starting_at("ci", now);

        report.add_report(project("late", late, 1.0, [1, 0, 0]));
        assert_eq!(report.summary.start_time, now);

        report.add_report(project("middle", middle, 1.0, [1, 0, 0]));
        assert_eq!(report.summary.start_time, middle);

        report.add_report(project("early", early, 1.0, [1, 0, 0]));
        report.add_report(project("middle-again", middle, 1.0, [1, 0, 0]));
        assert_eq!(report.summary.start_time, early);
    }

    #[test]
    fn test_projects_keep_insertion_order() {
        let now = Utc::now();
        let mut report = AggregateReport::starting_at("ci", now);

        report.add_report(project("second", now, 0.0, [0, 0, 0]));
        report.add_report(project("first", now, 0.0, [0, 0, 0]));

        let names: Vec<_> = report.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_parse_project_report_keeps_suites() {
        let json = r#"{
            "name": "project-1 build",
            "summary": {
                "startTime": "2024-05-01T10:00:00.000Z",
                "duration": 0.032,
                "tests": 3,
                "passed": 2,
                "failed": 1,
                "skipped": 0
            },
            "suites": [{"name": "a", "cases": [1, 2]}, {"name": "b"}]
        }"#;

        let report: ProjectReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.name, "project-1 build");
        assert_eq!(report.summary.tests, 3);
        assert_eq!(report.suites.len(), 2);
        assert_eq!(report.suites[0]["cases"][1], 2);
    }

    #[test]
    fn test_suite_keys_keep_their_order() {
        let json = r#"{"name":"p","summary":{"startTime":"2024-05-01T10:00:00Z","duration":1.0,"tests":0,"passed":0,"failed":0,"skipped":0},"suites":[{"zeta":1,"alpha":{"omega":true,"beta":false}}]}"#;

        let report: ProjectReport = serde_json::from_str(json).unwrap();
        let suites = serde_json::to_string(&report.suites).unwrap();

        assert_eq!(suites, r#"[{"zeta":1,"alpha":{"omega":true,"beta":false}}]"#);
    }

    #[test]
    fn test_serialized_field_names() {
        let report = AggregateReport::new("ci");
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.starts_with("{\"name\":\"ci\",\"projects\":[],\"summary\":"));
        assert!(json.contains("\"startTime\""));
    }
}
