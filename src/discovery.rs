//! Discovery of downloaded project report directories.

use crate::aggregator::OUTPUT_DIRNAME;
use crate::error::{AggregateError, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// List project directories directly under `work_dir` whose name starts
/// with `prefix`, sorted by name.
pub fn discover_projects(work_dir: &Path, prefix: &str) -> Result<Vec<String>> {
    let mut projects = Vec::new();

    let walker = WalkDir::new(work_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(work_dir).to_path_buf();
            AggregateError::io(path, e.into())
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!("Skipping non UTF-8 directory {}", entry.path().display());
            continue;
        };

        if name == OUTPUT_DIRNAME || !name.starts_with(prefix) {
            debug!("Ignoring directory {}", name);
            continue;
        }

        projects.push(name.to_string());
    }

    Ok(projects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_matching_directories_in_order() {
        let dir = TempDir::new().unwrap();
        for name in ["test-report-b", "test-report-a", "coverage", OUTPUT_DIRNAME] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("test-report-file"), "").unwrap();

        let projects = discover_projects(dir.path(), "test-report-").unwrap();
        assert_eq!(projects, vec!["test-report-a", "test-report-b"]);
    }

    #[test]
    fn test_empty_prefix_matches_all_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("one")).unwrap();
        std::fs::create_dir(dir.path().join(OUTPUT_DIRNAME)).unwrap();

        let projects = discover_projects(dir.path(), "").unwrap();
        assert_eq!(projects, vec!["one"]);
    }

    #[test]
    fn test_missing_work_dir_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = discover_projects(&missing, "").unwrap_err();
        assert!(matches!(err, AggregateError::Io { ref path, .. } if path == &missing));
    }
}
