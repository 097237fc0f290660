//! Locating per-project report files on disk.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve `base_dir/project/file_name` if it is a regular file.
///
/// Any stat failure, a directory, or a symlink to a directory yields `None`.
pub async fn locate_report(base_dir: &Path, project: &str, file_name: &str) -> Option<PathBuf> {
    let candidate = base_dir.join(project).join(file_name);

    match tokio::fs::metadata(&candidate).await {
        Ok(metadata) if metadata.is_file() => {
            debug!("Found {}", candidate.display());
            Some(candidate)
        }
        Ok(_) => {
            debug!("Not a regular file: {}", candidate.display());
            None
        }
        Err(e) => {
            debug!("Cannot stat {}: {}", candidate.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_locate_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("proj")).unwrap();
        std::fs::write(dir.path().join("proj").join("summary.json"), "{}").unwrap();

        let found = locate_report(dir.path(), "proj", "summary.json").await;
        assert_eq!(found, Some(dir.path().join("proj").join("summary.json")));
    }

    #[tokio::test]
    async fn test_locate_missing_file() {
        let dir = TempDir::new().unwrap();

        assert!(locate_report(dir.path(), "proj", "summary.json").await.is_none());
        assert!(locate_report(dir.path(), "", "nothing").await.is_none());
    }

    #[tokio::test]
    async fn test_locate_directory_is_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("proj").join("summary.json")).unwrap();

        assert!(locate_report(dir.path(), "proj", "summary.json").await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_locate_symlink_to_directory_is_absent() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("proj").join("real")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("proj").join("real"),
            dir.path().join("proj").join("summary.json"),
        )
        .unwrap();

        assert!(locate_report(dir.path(), "proj", "summary.json").await.is_none());
    }
}
