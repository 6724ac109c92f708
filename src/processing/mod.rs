//! Classification and batch analysis

pub mod batch;
pub mod classifier;
pub mod document;
pub mod pipeline;
pub mod taxonomy;

pub use batch::{BatchAnalyzer, BatchSummary};
pub use classifier::{Classification, Classifier, MatchMode};
pub use document::{DetectedType, ExtractedDocument};
pub use pipeline::BatchProcessor;
pub use taxonomy::{KeywordTaxonomy, RequiredSet, TaxonomyEntry};
