//! Keyword classifier that resolves text to a single document type

use crate::error::Result;
use crate::processing::document::DetectedType;
use crate::processing::taxonomy::KeywordTaxonomy;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

/// How a keyword occurrence is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Any occurrence counts, even inside a longer word ("noc" in "innocent").
    #[default]
    Substring,
    /// The occurrence must not be flanked by alphanumeric characters.
    WholeWord,
}

/// Outcome of classifying one text, with the keyword that decided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub detected: DetectedType,
    pub keyword: Option<String>,
}

impl Classification {
    pub fn unclassified() -> Self {
        Self {
            detected: DetectedType::Unclassified,
            keyword: None,
        }
    }
}

/// Maps lowercase text to a document type using an ordered taxonomy.
///
/// All keywords are compiled into one case-sensitive Aho-Corasick automaton.
/// Pattern ids follow taxonomy order and then keyword order, so the smallest
/// matching id is exactly the keyword a nested scan over the taxonomy would
/// stop at. The classifier never lowercases; callers normalize first.
pub struct Classifier {
    taxonomy: KeywordTaxonomy,
    matcher: AhoCorasick,
    // pattern id -> (entry index, keyword index)
    pattern_index: Vec<(usize, usize)>,
    match_mode: MatchMode,
}

impl Classifier {
    pub fn new(taxonomy: KeywordTaxonomy) -> Result<Self> {
        Self::with_match_mode(taxonomy, MatchMode::Substring)
    }

    pub fn with_match_mode(taxonomy: KeywordTaxonomy, match_mode: MatchMode) -> Result<Self> {
        taxonomy.validate()?;

        let mut patterns = Vec::with_capacity(taxonomy.keyword_count());
        let mut pattern_index = Vec::with_capacity(taxonomy.keyword_count());

        for (entry_idx, entry) in taxonomy.entries().iter().enumerate() {
            for (keyword_idx, keyword) in entry.keywords.iter().enumerate() {
                patterns.push(keyword.as_str());
                pattern_index.push((entry_idx, keyword_idx));
            }
        }

        // Standard semantics are required for overlapping search.
        let matcher = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)?;

        Ok(Self {
            taxonomy,
            matcher,
            pattern_index,
            match_mode,
        })
    }

    /// Label for `text`, or `Unclassified` when no keyword matches.
    pub fn classify(&self, text: &str) -> DetectedType {
        self.classify_with_evidence(text).detected
    }

    pub fn classify_with_evidence(&self, text: &str) -> Classification {
        let mut best: Option<usize> = None;

        for mat in self.matcher.find_overlapping_iter(text) {
            let id = mat.pattern().as_usize();
            if best.is_some_and(|current| current <= id) {
                continue;
            }
            if self.match_mode == MatchMode::WholeWord && !is_word_bounded(text, mat.start(), mat.end()) {
                continue;
            }
            best = Some(id);
            if id == 0 {
                break;
            }
        }

        match best {
            Some(id) => {
                let (entry_idx, keyword_idx) = self.pattern_index[id];
                let entry = &self.taxonomy.entries()[entry_idx];
                Classification {
                    detected: DetectedType::document(entry.label.clone()),
                    keyword: Some(entry.keywords[keyword_idx].clone()),
                }
            }
            None => Classification::unclassified(),
        }
    }

    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    pub fn keyword_count(&self) -> usize {
        self.pattern_index.len()
    }
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggerError;
    use crate::processing::taxonomy::TaxonomyEntry;

    fn loan_classifier() -> Classifier {
        Classifier::new(KeywordTaxonomy::loan_defaults()).unwrap()
    }

    #[test]
    fn test_single_type_keyword() {
        let classifier = loan_classifier();
        assert_eq!(
            classifier.classify("government of india\naadhaar\nmy identity"),
            DetectedType::document("Aadhaar Card")
        );
        assert_eq!(
            classifier.classify("monthly payslip for march, net pay 52,000"),
            DetectedType::document("Salary Slip")
        );
        assert_eq!(
            classifier.classify("itr-v acknowledgement"),
            DetectedType::document("Income Tax Return (ITR)")
        );
    }

    #[test]
    fn test_taxonomy_order_beats_text_position() {
        let classifier = loan_classifier();
        // Bank Statement keyword appears first in the text, PAN Card is earlier in the taxonomy.
        let text = "account number 00123 closing balance ... pan card enclosed";
        assert_eq!(classifier.classify(text), DetectedType::document("PAN Card"));

        // Sale Deed is the first entry, so it wins over everything else.
        let text = "bank statement attached with stamp duty receipt";
        assert_eq!(classifier.classify(text), DetectedType::document("Sale Deed"));
    }

    #[test]
    fn test_overlapping_keywords_resolve_by_entry() {
        let classifier = loan_classifier();
        // "permanent account number" contains the Bank Statement keyword "account number".
        let result = classifier.classify_with_evidence("permanent account number card");
        assert_eq!(result.detected, DetectedType::document("PAN Card"));
        assert_eq!(result.keyword.as_deref(), Some("permanent account number"));
    }

    #[test]
    fn test_evidence_is_first_keyword_in_list_order() {
        let classifier = loan_classifier();
        let result = classifier.classify_with_evidence("uidai issued aadhaar letter");
        assert_eq!(result.detected, DetectedType::document("Aadhaar Card"));
        assert_eq!(result.keyword.as_deref(), Some("aadhaar"));
    }

    #[test]
    fn test_empty_text_is_unclassified() {
        let classifier = loan_classifier();
        assert_eq!(classifier.classify(""), DetectedType::Unclassified);
        assert_eq!(classifier.classify_with_evidence(""), Classification::unclassified());
    }

    #[test]
    fn test_garbage_text_is_unclassified() {
        let classifier = loan_classifier();
        assert_eq!(classifier.classify("lorem ipsum dolor sit amet"), DetectedType::Unclassified);
    }

    #[test]
    fn test_case_sensitive() {
        let classifier = loan_classifier();
        let raw = "PERMANENT ACCOUNT NUMBER";
        assert_eq!(classifier.classify(raw), DetectedType::Unclassified);
        assert_eq!(
            classifier.classify(&raw.to_lowercase()),
            DetectedType::document("PAN Card")
        );
    }

    #[test]
    fn test_substring_matches_inside_words() {
        let classifier = loan_classifier();
        assert_eq!(
            classifier.classify("the innocent bystander"),
            DetectedType::document("No Objection Certificate (NOC)")
        );
    }

    #[test]
    fn test_whole_word_mode() {
        let classifier =
            Classifier::with_match_mode(KeywordTaxonomy::loan_defaults(), MatchMode::WholeWord).unwrap();
        assert_eq!(classifier.match_mode(), MatchMode::WholeWord);
        assert_eq!(classifier.classify("the innocent bystander"), DetectedType::Unclassified);
        assert_eq!(
            classifier.classify("noc issued by the society"),
            DetectedType::document("No Objection Certificate (NOC)")
        );
        assert_eq!(
            classifier.classify("(noc) attached."),
            DetectedType::document("No Objection Certificate (NOC)")
        );
    }

    #[test]
    fn test_whole_word_falls_back_to_later_occurrence() {
        let taxonomy = KeywordTaxonomy::new(vec![
            TaxonomyEntry::new("First", &["ab"]),
            TaxonomyEntry::new("Second", &["cd"]),
        ]);
        let classifier = Classifier::with_match_mode(taxonomy, MatchMode::WholeWord).unwrap();
        assert_eq!(classifier.classify("cd xaby ab"), DetectedType::document("First"));
        assert_eq!(classifier.classify("cd xaby"), DetectedType::document("Second"));
    }

    #[test]
    fn test_classification_ignores_prior_calls() {
        let classifier = loan_classifier();
        let first = classifier.classify("sale deed");
        let _ = classifier.classify("aadhaar");
        assert_eq!(classifier.classify("sale deed"), first);
    }

    #[test]
    fn test_empty_taxonomy_rejected() {
        assert!(matches!(
            Classifier::new(KeywordTaxonomy::default()),
            Err(TaggerError::Configuration(_))
        ));
    }

    #[test]
    fn test_reserved_label_rejected() {
        let taxonomy = KeywordTaxonomy::new(vec![
            TaxonomyEntry::new("PAN Card", &["pan card"]),
            TaxonomyEntry::new("Unclassified", &["lorem"]),
        ]);
        let result = Classifier::with_match_mode(taxonomy, MatchMode::WholeWord);
        assert!(matches!(result, Err(TaggerError::Configuration(_))));
    }
}
