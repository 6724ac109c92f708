//! Configuration management for the loan document tagger

use crate::error::{Result, TaggerError};
use crate::processing::classifier::MatchMode;
use crate::processing::taxonomy::{KeywordTaxonomy, RequiredSet, TaxonomyEntry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Document types a complete application must contain exactly once.
    pub required: Vec<String>,
    /// Ordered keyword taxonomy; earlier entries take precedence.
    pub taxonomy: Vec<TaxonomyEntry>,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Only the first pages of a PDF are rasterized for OCR.
    pub pdf_max_pages: u32,
    pub render_dpi: u32,
    pub ocr_language: String,
    pub tesseract_cmd: String,
    pub pdftoppm_cmd: String,
    /// Use the embedded PDF text layer when it has any text. The text layer
    /// covers every page; `pdf_max_pages` only limits the OCR fallback.
    pub prefer_text_layer: bool,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub match_mode: MatchMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_max_pages: 2,
            render_dpi: 300,
            ocr_language: "eng".to_string(),
            tesseract_cmd: "tesseract".to_string(),
            pdftoppm_cmd: "pdftoppm".to_string(),
            prefer_text_layer: true,
            enable_caching: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required: RequiredSet::loan_defaults().as_slice().to_vec(),
            taxonomy: KeywordTaxonomy::loan_defaults().entries().to_vec(),
            extraction: ExtractionConfig::default(),
            classification: ClassificationConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load from the default location, writing the defaults on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path when one is given, otherwise the default location.
    pub fn load_at(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TaggerError::Configuration(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| TaggerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TaggerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Overwrite `path` with the defaults. The existing file is not read,
    /// so a config that fails validation can still be reset.
    pub fn reset_at(path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(path)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("loan-doc-tagger")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let taxonomy = self.taxonomy();
        taxonomy.validate()?;
        self.required_set().validate_against(&taxonomy)?;

        if self.extraction.pdf_max_pages == 0 {
            return Err(TaggerError::Configuration(
                "extraction.pdf_max_pages must be at least 1".to_string(),
            ));
        }
        if self.extraction.render_dpi == 0 {
            return Err(TaggerError::Configuration(
                "extraction.render_dpi must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn taxonomy(&self) -> KeywordTaxonomy {
        KeywordTaxonomy::new(self.taxonomy.clone())
    }

    pub fn required_set(&self) -> RequiredSet {
        RequiredSet::new(self.required.iter().cloned())
    }
}
