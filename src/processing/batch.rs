//! Completeness analysis over a batch of classified files

use crate::processing::document::ExtractedDocument;
use crate::processing::taxonomy::RequiredSet;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Missing and duplicated document types for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Required types not found, in required-set order.
    pub missing: Vec<String>,
    /// Types found more than once, in order of first appearance.
    pub duplicates: Vec<String>,
}

impl BatchSummary {
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }

    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.has_missing() && !self.has_duplicates()
    }
}

pub struct BatchAnalyzer {
    required: RequiredSet,
}

impl BatchAnalyzer {
    pub fn new(required: RequiredSet) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &RequiredSet {
        &self.required
    }

    /// Compute missing and duplicate types. Sentinel rows never count as
    /// duplicates and never satisfy a required type.
    pub fn analyze(&self, results: &[ExtractedDocument]) -> BatchSummary {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        for label in results.iter().filter_map(|doc| doc.detected_type.as_document()) {
            let count = counts.entry(label).or_insert(0);
            if *count == 0 {
                first_seen.push(label);
            }
            *count += 1;
        }

        let present: HashSet<&str> = counts.keys().copied().collect();

        let missing = self
            .required
            .iter()
            .filter(|label| !present.contains(label))
            .map(str::to_string)
            .collect();

        let duplicates = first_seen
            .into_iter()
            .filter(|label| counts[label] > 1)
            .map(str::to_string)
            .collect();

        BatchSummary { missing, duplicates }
    }
}
