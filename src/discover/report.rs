//! Discovery report types and text formatting.

use serde::Serialize;
use std::fmt;

use crate::ir::LoadWarning;
use crate::mapping::DiscoveredMapping;

/// The result of a discovery run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DiscoveryReport {
    /// Base keys present in both trees (after the sample limit).
    pub shared_samples: usize,
    /// Samples that had boxes on both sides and went through matching.
    pub files_analyzed: usize,
    /// Original boxes left without a partner in analyzed samples.
    pub unmatched_original: usize,
    /// YOLO boxes left without a partner in analyzed samples.
    pub unmatched_yolo: usize,
    /// Accepted box matches across the corpus.
    pub matched_pairs: usize,
    /// Everything that was skipped along the way.
    pub warnings: Vec<LoadWarning>,
    /// The resolved class id → label mapping.
    pub mapping: DiscoveredMapping,
}

/// How a run ended, for reporting purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryOutcome {
    /// The two trees share no base keys.
    NoSharedFiles,
    /// Samples were compared but no pair cleared the IoU threshold.
    NoMatches,
    /// At least one class id was mapped.
    Mapped,
}

impl DiscoveryReport {
    pub fn outcome(&self) -> DiscoveryOutcome {
        if self.shared_samples == 0 {
            DiscoveryOutcome::NoSharedFiles
        } else if self.mapping.is_empty() {
            DiscoveryOutcome::NoMatches
        } else {
            DiscoveryOutcome::Mapped
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl fmt::Display for DiscoveryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            DiscoveryOutcome::NoSharedFiles => {
                return writeln!(
                    f,
                    "No overlapping annotation files found between the two roots."
                );
            }
            DiscoveryOutcome::NoMatches => {
                return writeln!(f, "No matches were found with the chosen IoU threshold.");
            }
            DiscoveryOutcome::Mapped => {}
        }

        writeln!(f, "Files analyzed: {}", self.files_analyzed)?;
        writeln!(f, "Unmatched original boxes: {}", self.unmatched_original)?;
        writeln!(f, "Unmatched YOLO boxes   : {}", self.unmatched_yolo)?;
        writeln!(f)?;
        writeln!(f, "Discovered mappings:")?;

        for entry in &self.mapping.entries {
            writeln!(
                f,
                "class {}: {} ({}/{}, {:.1}%)",
                entry.class_id,
                entry.label,
                entry.hits,
                entry.total,
                entry.confidence * 100.0
            )?;
            if !entry.alternatives.is_empty() {
                let others: Vec<String> = entry
                    .alternatives
                    .iter()
                    .map(|alt| format!("{}:{}", alt.label, alt.count))
                    .collect();
                writeln!(f, "  other candidates: {}", others.join(", "))?;
            }
        }

        Ok(())
    }
}
