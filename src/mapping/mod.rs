//! Class id → label aggregation.
//!
//! Every accepted box match votes for one `(class id, label)` pair.
//! [`MappingCounts`] accumulates the votes for the whole corpus, and
//! [`MappingCounts::finalize`] resolves each class id to its most frequent
//! label, along with a confidence and the runner-up labels.

mod export;

pub use export::{write_mapping, LabelMap};

use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::ClassId;

/// Label votes for a single class id, in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct LabelCounter {
    counts: Vec<LabelCount>,
}

impl LabelCounter {
    pub fn add(&mut self, label: &str) {
        match self.counts.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => self.counts.push(LabelCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|entry| entry.count).sum()
    }

    /// Labels by count descending. Equal counts keep first-seen order.
    pub fn ranked(&self) -> Vec<LabelCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

/// Votes for every class id seen so far.
#[derive(Clone, Debug, Default)]
pub struct MappingCounts {
    by_class: BTreeMap<ClassId, LabelCounter>,
}

impl MappingCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one match between `class_id` and `label`.
    pub fn record(&mut self, class_id: &ClassId, label: &str) {
        self.by_class
            .entry(class_id.clone())
            .or_default()
            .add(label);
    }

    pub fn is_empty(&self) -> bool {
        self.by_class.is_empty()
    }

    /// Total number of recorded matches across all class ids.
    pub fn total(&self) -> usize {
        self.by_class.values().map(LabelCounter::total).sum()
    }

    /// Resolve every class id to its best label.
    ///
    /// Entries are ordered numerically when every class id is an integer,
    /// lexicographically otherwise.
    pub fn finalize(&self) -> DiscoveredMapping {
        let mut entries: Vec<ClassMapping> = self
            .by_class
            .iter()
            .filter_map(|(class_id, counter)| ClassMapping::from_counter(class_id, counter))
            .collect();

        if entries.iter().all(|entry| entry.class_id.as_integer().is_some()) {
            entries.sort_by_key(|entry| entry.class_id.as_integer());
        }

        DiscoveredMapping { entries }
    }
}

/// A label with its vote count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// The resolved label for one class id.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassMapping {
    pub class_id: ClassId,
    /// Most frequent label.
    pub label: String,
    /// Votes for `label`.
    pub hits: usize,
    /// All votes for this class id.
    pub total: usize,
    /// `hits / total`, in `(0, 1]`.
    pub confidence: f64,
    /// Other labels, most frequent first.
    pub alternatives: Vec<LabelCount>,
}

impl ClassMapping {
    fn from_counter(class_id: &ClassId, counter: &LabelCounter) -> Option<Self> {
        let mut ranked = counter.ranked().into_iter();
        let top = ranked.next()?;
        let total = counter.total();

        Some(Self {
            class_id: class_id.clone(),
            confidence: top.count as f64 / total as f64,
            label: top.label,
            hits: top.count,
            total,
            alternatives: ranked.collect(),
        })
    }
}

/// The finished mapping, in report order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiscoveredMapping {
    pub entries: Vec<ClassMapping>,
}

impl DiscoveredMapping {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, class_id: &str) -> Option<&ClassMapping> {
        self.entries
            .iter()
            .find(|entry| entry.class_id.as_str() == class_id)
    }

    /// Plain `class id -> label` pairs in report order.
    pub fn label_map(&self) -> LabelMap {
        LabelMap::new(
            self.entries
                .iter()
                .map(|entry| (entry.class_id.clone(), entry.label.clone()))
                .collect(),
        )
    }
}
