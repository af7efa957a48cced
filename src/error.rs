use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelmap operations.
///
/// Only conditions that abort a whole run live here. Per-line and
/// per-sample problems are reported as [`LoadWarning`](crate::ir::LoadWarning)s.
#[derive(Debug, Error)]
pub enum LabelmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{side} root not found: {path}")]
    RootNotFound { side: RootSide, path: PathBuf },

    #[error("Failed while traversing {path}: {source}")]
    Traverse {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write mapping to {path}: {source}")]
    MappingWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write detection records to {path}: {source}")]
    RecordWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report: {0}")]
    ReportJson(#[source] serde_json::Error),

    #[error("Results file not found: {path}")]
    ResultsNotFound { path: PathBuf },

    #[error("Invalid regex '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Error parsing detections JSON: {source}")]
    DetectionsJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Which of the two annotation trees a root path belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootSide {
    Original,
    Yolo,
}

impl std::fmt::Display for RootSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootSide::Original => write!(f, "Original"),
            RootSide::Yolo => write!(f, "YOLO"),
        }
    }
}
