//! Recoverable problems found while loading annotation inputs.
//!
//! A warning never aborts a run: the offending line, file, or sample is
//! skipped and the warning is handed back to the caller for counting and
//! logging.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single skipped line or file.
#[derive(Clone, Debug, Serialize)]
pub struct LoadWarning {
    /// File the problem was found in.
    pub path: PathBuf,
    /// 1-based line number, when the problem is tied to a line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// A stable code for the problem.
    pub code: WarningCode,
    /// Human-readable detail.
    pub message: String,
}

impl LoadWarning {
    /// A warning tied to a specific line.
    pub fn at_line(
        path: &Path,
        line: usize,
        code: WarningCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            line: Some(line),
            code,
            message: message.into(),
        }
    }

    /// A warning about a whole file.
    pub fn for_file(path: &Path, code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            line: None,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}: line {} {}",
                self.path.display(),
                line,
                self.message
            ),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

/// Stable codes for [`LoadWarning`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// Fewer than five whitespace-separated tokens.
    MissingTokens,
    /// A coordinate token is not a number.
    NonNumericCoordinate,
    /// A coordinate is NaN or infinite.
    NonFiniteCoordinate,
    /// The box has zero or negative width or height.
    DegenerateBox,
    /// A fractional class token was truncated to an integer id.
    ClassIdTruncated,
    /// Another file already claimed the same base key.
    DuplicateBaseName,
    /// No image was found for a sample that needs denormalizing.
    MissingImage,
    /// The image header could not be read.
    ImageDimensionRead,
    /// A file could not be opened or decoded.
    UnreadableFile,
    /// A directory entry could not be read while walking a tree.
    UnreadableEntry,
    /// A JSONL line is not a valid detection record.
    MalformedRecord,
}
