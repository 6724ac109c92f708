//! Per-file classification results

use crate::processing::taxonomy::{ERROR_LABEL, UNCLASSIFIED_LABEL};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The label a file ends up with: a taxonomy type or one of the two sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DetectedType {
    Document(String),
    Unclassified,
    Error,
}

impl DetectedType {
    pub fn document<S: Into<String>>(label: S) -> Self {
        DetectedType::Document(label.into())
    }

    pub fn label(&self) -> &str {
        match self {
            DetectedType::Document(label) => label,
            DetectedType::Unclassified => UNCLASSIFIED_LABEL,
            DetectedType::Error => ERROR_LABEL,
        }
    }

    /// The taxonomy label, or `None` for sentinels.
    pub fn as_document(&self) -> Option<&str> {
        match self {
            DetectedType::Document(label) => Some(label),
            _ => None,
        }
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for DetectedType {
    fn from(label: String) -> Self {
        match label.as_str() {
            UNCLASSIFIED_LABEL => DetectedType::Unclassified,
            ERROR_LABEL => DetectedType::Error,
            _ => DetectedType::Document(label),
        }
    }
}

impl From<DetectedType> for String {
    fn from(detected: DetectedType) -> Self {
        match detected {
            DetectedType::Document(label) => label,
            other => other.label().to_string(),
        }
    }
}

/// Result of extracting and classifying a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub filename: String,
    #[serde(skip_serializing, default)]
    pub text: String,
    pub detected_type: DetectedType,
    /// Keyword that decided the type, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub matched_keyword: Option<String>,
    /// Extraction failure message for `Error` rows.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ExtractedDocument {
    pub fn new<S: Into<String>>(filename: S, detected_type: DetectedType) -> Self {
        Self {
            filename: filename.into(),
            text: String::new(),
            detected_type,
            matched_keyword: None,
            error: None,
        }
    }

    pub fn classified(
        filename: String,
        text: String,
        detected_type: DetectedType,
        matched_keyword: Option<String>,
    ) -> Self {
        Self {
            filename,
            text,
            detected_type,
            matched_keyword,
            error: None,
        }
    }

    pub fn failed<S: Into<String>>(filename: String, error: S) -> Self {
        Self {
            filename,
            text: String::new(),
            detected_type: DetectedType::Error,
            matched_keyword: None,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.detected_type == DetectedType::Error
    }

    pub fn is_unclassified(&self) -> bool {
        self.detected_type == DetectedType::Unclassified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_labels() {
        assert_eq!(DetectedType::Unclassified.label(), "Unclassified");
        assert_eq!(DetectedType::Error.label(), "Error");
        assert_eq!(DetectedType::Error.as_document(), None);
        assert_eq!(DetectedType::document("PAN Card").as_document(), Some("PAN Card"));
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(DetectedType::from("Unclassified".to_string()), DetectedType::Unclassified);
        assert_eq!(DetectedType::from("Error".to_string()), DetectedType::Error);
        assert_eq!(
            DetectedType::from("Sale Deed".to_string()),
            DetectedType::document("Sale Deed")
        );
        assert_eq!(String::from(DetectedType::document("Salary Slip")), "Salary Slip");
    }

    #[test]
    fn test_serializes_as_plain_label() {
        let doc = ExtractedDocument::new("scan.png", DetectedType::document("PAN Card"));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["detected_type"], "PAN Card");
        assert_eq!(json["filename"], "scan.png");
        assert!(json.get("text").is_none());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_document() {
        let doc = ExtractedDocument::failed("broken.pdf".to_string(), "tesseract exited with status 1");
        assert!(doc.is_error());
        assert!(doc.text.is_empty());
        assert_eq!(doc.error.as_deref(), Some("tesseract exited with status 1"));
    }
}
