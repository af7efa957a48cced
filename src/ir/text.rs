//! Shared plumbing for the line-oriented annotation formats.

use std::fs;
use std::path::Path;

use super::warning::WarningCode;
use crate::error::LabelmapError;

/// Why a single line was rejected.
#[derive(Clone, Debug, PartialEq)]
pub struct LineIssue {
    pub code: WarningCode,
    pub message: String,
}

impl LineIssue {
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

pub(crate) fn read_text(path: &Path) -> Result<String, LabelmapError> {
    fs::read_to_string(path).map_err(|source| LabelmapError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Yields `(line_number, trimmed_line)` for every line that carries data.
///
/// Blank lines and `#` comments are dropped here so both loaders share the
/// same skipping rules.
pub(crate) fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Splits a data line into a leading token and four numeric values.
///
/// Tokens after the fifth are ignored.
pub(crate) fn split_head_and_four(
    line: &str,
    head_name: &str,
) -> Result<(String, [f64; 4]), LineIssue> {
    // Five tokens is all we read; the rest of the line is never split.
    let tokens: Vec<&str> = line.split_whitespace().take(5).collect();
    if tokens.len() < 5 {
        return Err(LineIssue::new(
            WarningCode::MissingTokens,
            format!("malformed (expected {head_name} + 4 coords)"),
        ));
    }

    let mut values = [0.0; 4];
    for (slot, raw) in values.iter_mut().zip(&tokens[1..5]) {
        *slot = raw.parse::<f64>().map_err(|_| {
            LineIssue::new(WarningCode::NonNumericCoordinate, "has non-numeric coords")
        })?;
    }

    if values.iter().any(|value| !value.is_finite()) {
        return Err(LineIssue::new(
            WarningCode::NonFiniteCoordinate,
            "has non-finite coords",
        ));
    }

    Ok((tokens[0].to_string(), values))
}

pub(crate) fn degenerate_box() -> LineIssue {
    LineIssue::new(WarningCode::DegenerateBox, "degenerate box skipped")
}
