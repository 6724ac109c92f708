//! Integration tests for the loan document tagger

use loan_doc_tagger::config::{Config, ExtractionConfig};
use loan_doc_tagger::input::InputManager;
use loan_doc_tagger::processing::{BatchAnalyzer, BatchProcessor, Classifier, DetectedType, RequiredSet};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new("tests/fixtures").join(name)
}

#[tokio::test]
async fn test_text_extraction_is_lowercased() {
    let mut manager = InputManager::new(&ExtractionConfig::default());
    let text = manager.extract_text(&fixture("pan_card.txt")).await.unwrap();

    assert!(text.contains("income tax department"));
    assert!(text.contains("permanent account number"));
    assert!(!text.contains("INCOME"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new(&ExtractionConfig::default());
    let path = fixture("aadhaar.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new(&ExtractionConfig::default()).with_cache(false);
    manager.extract_text(&fixture("aadhaar.txt")).await.unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new(&ExtractionConfig::default());
    assert!(manager.extract_text(&fixture("unsupported.xyz")).await.is_err());
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new(&ExtractionConfig::default());
    assert!(manager.extract_text(&fixture("nonexistent.txt")).await.is_err());
}

#[tokio::test]
async fn test_loan_batch_scenario() {
    let mut processor = BatchProcessor::from_config(&Config::default()).unwrap();
    let files = vec![fixture("aadhaar.txt"), fixture("pan_card.txt"), fixture("blank.txt")];

    let report = processor.process_batch(&files).await.unwrap();

    let rows: Vec<(String, String)> = report
        .rows()
        .map(|(name, detected)| (name.to_string(), detected.to_string()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("aadhaar.txt".to_string(), "Aadhaar Card".to_string()),
            ("pan_card.txt".to_string(), "PAN Card".to_string()),
            ("blank.txt".to_string(), "Unclassified".to_string()),
        ]
    );
    assert_eq!(
        report.missing(),
        &[
            "Sale Deed".to_string(),
            "Bank Statement".to_string(),
            "Income Tax Return (ITR)".to_string(),
            "Legal Scrutiny Report".to_string(),
        ]
    );
    assert!(report.duplicates().is_empty());
    assert!(!report.is_complete());
}

#[tokio::test]
async fn test_duplicates_and_errors_in_one_batch() {
    let mut processor = BatchProcessor::from_config(&Config::default()).unwrap();
    let files = vec![
        fixture("pan_card.txt"),
        fixture("unsupported.xyz"),
        fixture("pan_card_copy.txt"),
        fixture("bank_statement.txt"),
        fixture("nonexistent.pdf"),
    ];

    let report = processor.process_batch(&files).await.unwrap();

    assert_eq!(report.results[1].detected_type, DetectedType::Error);
    assert_eq!(report.results[3].detected_type, DetectedType::document("Bank Statement"));
    assert_eq!(report.results[4].detected_type, DetectedType::Error);
    assert_eq!(report.duplicates(), &["PAN Card".to_string()]);
    assert_eq!(report.metadata.error_count, 2);
}

#[test]
fn test_custom_taxonomy_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
required = ["Form 16"]

[[taxonomy]]
label = "Form 16"
keywords = ["form 16", "tds certificate"]

[[taxonomy]]
label = "Rent Agreement"
keywords = ["rent agreement", "lessor"]
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    let classifier = Classifier::new(config.taxonomy()).unwrap();
    assert_eq!(
        classifier.classify("lessor and lessee agree; tds certificate attached"),
        DetectedType::document("Form 16")
    );

    let analyzer = BatchAnalyzer::new(config.required_set());
    assert_eq!(analyzer.analyze(&[]).missing, vec!["Form 16".to_string()]);
}

#[test]
fn test_config_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.extraction.pdf_max_pages = 3;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded, config);
    assert_eq!(reloaded.required_set(), RequiredSet::loan_defaults());
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "required = [\"Sale Deed\"]\ntaxonomy = []\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}
