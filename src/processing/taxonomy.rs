//! Keyword taxonomy and required document set

use crate::error::{Result, TaggerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Label reported when no taxonomy keyword matches.
pub const UNCLASSIFIED_LABEL: &str = "Unclassified";

/// Label reported when text extraction failed for a file.
pub const ERROR_LABEL: &str = "Error";

/// One document type and the keywords that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub label: String,
    pub keywords: Vec<String>,
}

impl TaxonomyEntry {
    pub fn new<S: Into<String>>(label: S, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered mapping from document type to its ordered keyword list.
///
/// Entry order is precedence order: when text carries keywords of several
/// types, the entry that comes first wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordTaxonomy {
    entries: Vec<TaxonomyEntry>,
}

impl KeywordTaxonomy {
    pub fn new(entries: Vec<TaxonomyEntry>) -> Self {
        Self { entries }
    }

    /// Taxonomy used for Indian secured-loan applications.
    pub fn loan_defaults() -> Self {
        Self::new(vec![
            TaxonomyEntry::new(
                "Sale Deed",
                &["sale deed", "deed of sale", "stamp duty", "consideration amount", "vendor", "vendee"],
            ),
            TaxonomyEntry::new(
                "PAN Card",
                &["permanent account number", "pan card", "income tax department"],
            ),
            TaxonomyEntry::new(
                "Aadhaar Card",
                &["aadhaar", "unique identification authority", "uidai"],
            ),
            TaxonomyEntry::new(
                "Bank Statement",
                &["bank statement", "account number", "transaction date", "closing balance"],
            ),
            TaxonomyEntry::new(
                "Income Tax Return (ITR)",
                &["income tax return", "acknowledgement", "itr-v", "assessment year"],
            ),
            TaxonomyEntry::new(
                "Salary Slip",
                &["salary slip", "payslip", "earnings", "deductions", "net pay"],
            ),
            TaxonomyEntry::new(
                "Legal Scrutiny Report",
                &["legal scrutiny report", "title search report", "advocate", "legal opinion"],
            ),
            TaxonomyEntry::new(
                "No Objection Certificate (NOC)",
                &["no objection certificate", "noc", "no objection"],
            ),
        ])
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.iter().any(|e| e.label == label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keyword_count(&self) -> usize {
        self.entries.iter().map(|e| e.keywords.len()).sum()
    }

    /// Reject taxonomies that would make classification ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(TaggerError::Configuration(
                "taxonomy must define at least one document type".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            let label = entry.label.trim();
            if label.is_empty() {
                return Err(TaggerError::Configuration(
                    "taxonomy contains an entry with an empty label".to_string(),
                ));
            }
            if label == UNCLASSIFIED_LABEL || label == ERROR_LABEL {
                return Err(TaggerError::Configuration(format!(
                    "'{}' is reserved and cannot be used as a document type",
                    label
                )));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(TaggerError::Configuration(format!(
                    "document type '{}' is defined more than once",
                    entry.label
                )));
            }
            if entry.keywords.is_empty() {
                return Err(TaggerError::Configuration(format!(
                    "document type '{}' has no keywords",
                    entry.label
                )));
            }
            if entry.keywords.iter().any(|k| k.is_empty()) {
                return Err(TaggerError::Configuration(format!(
                    "document type '{}' has an empty keyword",
                    entry.label
                )));
            }
        }

        Ok(())
    }
}

/// Document types that must each appear exactly once in a complete batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequiredSet {
    types: Vec<String>,
}

impl RequiredSet {
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn loan_defaults() -> Self {
        Self::new([
            "Sale Deed",
            "PAN Card",
            "Aadhaar Card",
            "Bank Statement",
            "Income Tax Return (ITR)",
            "Legal Scrutiny Report",
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.types
    }

    pub fn contains(&self, label: &str) -> bool {
        self.types.iter().any(|t| t == label)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Every required type must be one the taxonomy can produce.
    pub fn validate_against(&self, taxonomy: &KeywordTaxonomy) -> Result<()> {
        let mut seen = HashSet::new();
        for label in &self.types {
            if !seen.insert(label.as_str()) {
                return Err(TaggerError::Configuration(format!(
                    "required document '{}' is listed more than once",
                    label
                )));
            }
            if !taxonomy.contains(label) {
                return Err(TaggerError::Configuration(format!(
                    "required document '{}' is not defined in the taxonomy",
                    label
                )));
            }
        }
        Ok(())
    }
}
