//! Error handling for the loan document tagger

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Keyword matcher error: {0}")]
    Matcher(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, TaggerError>;

impl From<aho_corasick::BuildError> for TaggerError {
    fn from(err: aho_corasick::BuildError) -> Self {
        TaggerError::Matcher(err.to_string())
    }
}
