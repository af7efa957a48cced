//! Evaluation report types and terminal formatting.

use serde::Serialize;
use std::fmt;

/// Why a record was left out of the metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The path matched both the positive and the negative regex.
    Conflict,
    /// The path matched neither regex and the policy is `skip`.
    Unmatched,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Conflict => write!(f, "conflict"),
            SkipReason::Unmatched => write!(f, "unmatched"),
        }
    }
}

/// Predicted-vs-actual counts for the binary "has objects" task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

impl ConfusionMatrix {
    pub fn add(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true, true) => self.tp += 1,
            (true, false) => self.fp += 1,
            (false, true) => self.fn_ += 1,
            (false, false) => self.tn += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    /// Derived metrics. Any ratio with a zero denominator is 0.0.
    pub fn metrics(&self) -> Metrics {
        let (tp, fp, tn, fn_) = (
            self.tp as f64,
            self.fp as f64,
            self.tn as f64,
            self.fn_ as f64,
        );
        Metrics {
            accuracy: ratio(tp + tn, self.total() as f64),
            precision: ratio(tp, tp + fp),
            recall: ratio(tp, tp + fn_),
            specificity: ratio(tn, tn + fp),
            f1: ratio(2.0 * tp, 2.0 * tp + fp + fn_),
        }
    }
}

fn ratio(dividend: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        0.0
    } else {
        dividend / divisor
    }
}

/// Standard binary classification metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub specificity: f64,
    pub f1: f64,
}

/// Number of records skipped for one reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedCount {
    pub reason: SkipReason,
    pub count: usize,
}

/// The result of an evaluation run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EvaluationReport {
    pub matrix: ConfusionMatrix,
    pub metrics: Metrics,
    /// Skip counts in the order reasons were first seen.
    pub skipped: Vec<SkippedCount>,
}

impl EvaluationReport {
    /// Records that made it into the confusion matrix.
    pub fn evaluated(&self) -> usize {
        self.matrix.total()
    }

    pub(crate) fn skip(&mut self, reason: SkipReason) {
        match self.skipped.iter_mut().find(|s| s.reason == reason) {
            Some(entry) => entry.count += 1,
            None => self.skipped.push(SkippedCount { reason, count: 1 }),
        }
    }

    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped
            .iter()
            .find(|s| s.reason == reason)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Samples evaluated: {}", self.evaluated())?;
        for skipped in &self.skipped {
            writeln!(f, "Skipped ({}): {}", skipped.reason, skipped.count)?;
        }

        if self.evaluated() == 0 {
            return writeln!(f, "No samples met the criteria for evaluation.");
        }

        let m = &self.matrix;
        writeln!(f)?;
        writeln!(f, "Confusion Matrix (predicted vs. actual):")?;
        writeln!(f, "              Actual Positive  Actual Negative")?;
        writeln!(f, "Pred Positive       {:>6}              {:>6}", m.tp, m.fp)?;
        writeln!(f, "Pred Negative       {:>6}              {:>6}", m.fn_, m.tn)?;

        writeln!(f)?;
        writeln!(f, "Metrics:")?;
        let rows = [
            ("Accuracy", self.metrics.accuracy),
            ("Precision", self.metrics.precision),
            ("Recall", self.metrics.recall),
            ("Specificity", self.metrics.specificity),
            ("F1", self.metrics.f1),
        ];
        for (name, value) in rows {
            writeln!(f, "{name:<12}: {value:.4}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_match_closed_form() {
        let matrix = ConfusionMatrix {
            tp: 3,
            fp: 1,
            tn: 4,
            fn_: 2,
        };
        let metrics = matrix.metrics();
        assert!((metrics.accuracy - 0.7).abs() < 1e-12);
        assert!((metrics.precision - 0.75).abs() < 1e-12);
        assert!((metrics.recall - 0.6).abs() < 1e-12);
        assert!((metrics.specificity - 0.8).abs() < 1e-12);
        assert!((metrics.f1 - 6.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn zero_denominators_give_zero() {
        let metrics = ConfusionMatrix {
            tn: 5,
            ..Default::default()
        }
        .metrics();
        assert_eq!(metrics.accuracy, 1.0);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1, 0.0);
    }

    #[test]
    fn text_report_renders_matrix() {
        let mut report = EvaluationReport::default();
        report.matrix = ConfusionMatrix {
            tp: 3,
            fp: 1,
            tn: 4,
            fn_: 2,
        };
        report.metrics = report.matrix.metrics();
        report.skip(SkipReason::Unmatched);

        let text = report.to_string();
        assert!(text.starts_with("Samples evaluated: 10\nSkipped (unmatched): 1\n"));
        assert!(text.contains("Pred Positive            3                   1\n"));
        assert!(text.contains("Accuracy    : 0.7000\n"));
        assert!(text.contains("F1          : 0.6667\n"));
    }

    #[test]
    fn empty_report_says_nothing_to_evaluate() {
        let report = EvaluationReport::default();
        assert_eq!(
            report.to_string(),
            "Samples evaluated: 0\nNo samples met the criteria for evaluation.\n"
        );
    }
}
