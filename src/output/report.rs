//! Batch report structures

use crate::processing::batch::BatchSummary;
use crate::processing::document::{DetectedType, ExtractedDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything produced by one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// One row per input file, in input order.
    pub results: Vec<ExtractedDocument>,
    pub summary: BatchSummary,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub tagger_version: String,
    pub file_count: usize,
    pub classified_count: usize,
    pub unclassified_count: usize,
    pub error_count: usize,
    pub required_count: usize,
}

impl BatchReport {
    pub fn new(
        results: Vec<ExtractedDocument>,
        summary: BatchSummary,
        required_count: usize,
        processing_time_ms: u64,
    ) -> Self {
        let error_count = results.iter().filter(|r| r.is_error()).count();
        let unclassified_count = results.iter().filter(|r| r.is_unclassified()).count();

        let metadata = ReportMetadata {
            generated_at: Utc::now(),
            processing_time_ms,
            tagger_version: env!("CARGO_PKG_VERSION").to_string(),
            file_count: results.len(),
            classified_count: results.len() - error_count - unclassified_count,
            unclassified_count,
            error_count,
            required_count,
        };

        Self {
            results,
            summary,
            metadata,
        }
    }

    pub fn missing(&self) -> &[String] {
        &self.summary.missing
    }

    pub fn duplicates(&self) -> &[String] {
        &self.summary.duplicates
    }

    pub fn is_complete(&self) -> bool {
        self.summary.is_complete()
    }

    /// `(filename, detected type)` pairs, the tabular view of the batch.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &DetectedType)> {
        self.results
            .iter()
            .map(|r| (r.filename.as_str(), &r.detected_type))
    }
}
