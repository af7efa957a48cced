//! Empty-vs-non-empty classification metrics over detection records.
//!
//! A record counts as a positive prediction when the model reported at
//! least one detection. Ground truth comes from regexes applied to the
//! record's relative image path.

mod report;

pub use report::{ConfusionMatrix, EvaluationReport, Metrics, SkipReason};

use regex::Regex;

use crate::error::LabelmapError;
use crate::ir::io_jsonl::DetectionRecord;

/// What to do with samples that match neither regex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Leave them out of the metrics.
    #[default]
    Skip,
    /// Treat them as containing a target object.
    Positive,
    /// Treat them as empty.
    Negative,
}

impl std::str::FromStr for UnmatchedPolicy {
    type Err = LabelmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(UnmatchedPolicy::Skip),
            "positive" => Ok(UnmatchedPolicy::Positive),
            "negative" => Ok(UnmatchedPolicy::Negative),
            other => Err(LabelmapError::InvalidOption(format!(
                "unknown unmatched policy '{other}' (expected skip, positive or negative)"
            ))),
        }
    }
}

/// Options for an evaluation run.
#[derive(Clone, Debug)]
pub struct EvaluateOptions {
    /// Paths matching this contain at least one target object.
    pub positive: Regex,
    /// Paths matching this contain none.
    pub negative: Option<Regex>,
    pub unmatched: UnmatchedPolicy,
}

impl EvaluateOptions {
    /// Compile the ground-truth patterns.
    pub fn new(
        positive: &str,
        negative: Option<&str>,
        unmatched: UnmatchedPolicy,
    ) -> Result<Self, LabelmapError> {
        Ok(Self {
            positive: compile(positive)?,
            negative: negative.map(compile).transpose()?,
            unmatched,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex, LabelmapError> {
    Regex::new(pattern).map_err(|source| LabelmapError::InvalidRegex {
        pattern: pattern.to_string(),
        source,
    })
}

/// Ground truth for one path, or the reason it was left out.
pub fn assign_label(path: &str, opts: &EvaluateOptions) -> Result<bool, SkipReason> {
    let positive = opts.positive.is_match(path);
    let negative = opts
        .negative
        .as_ref()
        .map(|re| re.is_match(path))
        .unwrap_or(false);

    match (positive, negative) {
        (true, true) => Err(SkipReason::Conflict),
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        (false, false) => match opts.unmatched {
            UnmatchedPolicy::Positive => Ok(true),
            UnmatchedPolicy::Negative => Ok(false),
            UnmatchedPolicy::Skip => Err(SkipReason::Unmatched),
        },
    }
}

/// Tally predictions against regex-derived ground truth.
pub fn evaluate_classification(
    records: &[DetectionRecord],
    opts: &EvaluateOptions,
) -> EvaluationReport {
    let mut report = EvaluationReport::default();

    for record in records {
        let actual = match assign_label(&record.image, opts) {
            Ok(actual) => actual,
            Err(reason) => {
                if reason == SkipReason::Conflict {
                    log::warn!(
                        "sample '{}' matches both positive and negative regexes; skipping",
                        record.image
                    );
                }
                report.skip(reason);
                continue;
            }
        };

        report.matrix.add(record.has_detections(), actual);
    }

    report.metrics = report.matrix.metrics();
    report
}
