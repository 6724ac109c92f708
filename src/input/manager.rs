//! Input manager for routing files to the right extractor

use crate::config::ExtractionConfig;
use crate::error::{Result, TaggerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{ImageExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// Extracts lowercase text from a file, memoizing results by path.
pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    pdf: PdfExtractor,
    image: ImageExtractor,
}

impl InputManager {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_caching,
            pdf: PdfExtractor::from_config(config),
            image: ImageExtractor::from_config(config),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Text is lowercased here so the classifier can match verbatim.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(TaggerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match FileType::from_path(path) {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                self.pdf.extract(path).await?
            }
            FileType::Image => {
                info!("Running OCR on image: {}", path.display());
                self.image.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(TaggerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        let text = text.to_lowercase();

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
