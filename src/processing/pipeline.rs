//! Sequential batch processing: extract, classify, summarize

use crate::config::Config;
use crate::error::{Result, TaggerError};
use crate::input::InputManager;
use crate::output::report::BatchReport;
use crate::processing::batch::BatchAnalyzer;
use crate::processing::classifier::{Classifier, MatchMode};
use crate::processing::document::ExtractedDocument;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct BatchProcessor {
    input: InputManager,
    classifier: Classifier,
    analyzer: BatchAnalyzer,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(input: InputManager, classifier: Classifier, analyzer: BatchAnalyzer) -> Self {
        Self {
            input,
            classifier,
            analyzer,
            show_progress: false,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = Classifier::with_match_mode(config.taxonomy(), config.classification.match_mode)?;
        if classifier.match_mode() == MatchMode::WholeWord {
            warn!("Whole-word keyword matching enabled; results may differ from substring matching");
        }

        let analyzer = BatchAnalyzer::new(config.required_set());
        let input = InputManager::new(&config.extraction);

        info!(
            "Classifier ready: {} document types, {} keywords, {} required ({:?} matching)",
            classifier.taxonomy().len(),
            classifier.keyword_count(),
            analyzer.required().len(),
            classifier.match_mode()
        );

        Ok(Self::new(input, classifier, analyzer))
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Extract and classify one file. Extraction failures become `Error` rows.
    pub async fn process_file(&mut self, path: &Path) -> ExtractedDocument {
        let filename = display_name(path);

        match self.input.extract_text(path).await {
            Ok(text) => {
                let classification = self.classifier.classify_with_evidence(&text);
                debug!(
                    "{} -> {} (keyword: {})",
                    filename,
                    classification.detected,
                    classification.keyword.as_deref().unwrap_or("none")
                );
                ExtractedDocument::classified(filename, text, classification.detected, classification.keyword)
            }
            Err(e) => {
                warn!("Error processing {}: {}", filename, e);
                ExtractedDocument::failed(filename, e.to_string())
            }
        }
    }

    /// Process every file in order and build the batch report.
    pub async fn process_batch(&mut self, paths: &[PathBuf]) -> Result<BatchReport> {
        let started = Instant::now();
        info!("Processing {} file(s)", paths.len());

        let progress = if self.show_progress {
            let bar = ProgressBar::new(paths.len() as u64);
            bar.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| TaggerError::OutputFormatting(e.to_string()))?
                    .progress_chars("=> "),
            );
            Some(bar)
        } else {
            None
        };

        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(bar) = &progress {
                bar.set_message(display_name(path));
            }
            results.push(self.process_file(path).await);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        let summary = self.analyzer.analyze(&results);
        let elapsed = started.elapsed().as_millis() as u64;
        info!(
            "Batch finished in {}ms: {} missing, {} duplicated",
            elapsed,
            summary.missing.len(),
            summary.duplicates.len()
        );

        Ok(BatchReport::new(results, summary, self.analyzer.required().len(), elapsed))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
