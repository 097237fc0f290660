//! Error types for report aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while merging project reports.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Cannot locate report for [{project}] project")]
    MissingReport { project: String },

    #[error("Cannot locate {file} for [{project}] project")]
    IncompleteReport { project: String, file: String },

    #[error("Malformed report summary {}: {source}", path.display())]
    MalformedReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize aggregate report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Render error: {0}")]
    Render(String),
}

impl AggregateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregateError>;
