//! Keyword corpus: per-document-type classification keywords, side
//! indicators and identifying-number formats.
//!
//! The corpus is plain data. Its entry order is the classifier's tie-break
//! order, so it is kept in a `Vec` rather than a map.

mod builtin;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{IdScanError, Result};
use crate::extract::IdFormat;
use crate::models::document::DocumentType;

/// How side indicators are matched against the fragment text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SideMatch {
    /// Indicator fires when its similarity reaches the threshold (0-100).
    Fuzzy {
        front_threshold: f64,
        back_threshold: f64,
    },
    /// Indicator fires only on a case-insensitive substring match.
    Exact,
}

/// Indicators for a single document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    /// Document type these indicators identify.
    pub doc_type: DocumentType,

    /// Classification keywords, scored against the whole text.
    pub keywords: Vec<String>,

    /// Phrases printed on the front side.
    #[serde(default)]
    pub front: Vec<String>,

    /// Phrases printed on the back side.
    #[serde(default)]
    pub back: Vec<String>,

    pub side_match: SideMatch,

    /// Canonical identifying-number formats; any hit marks the front side.
    #[serde(default)]
    pub id_formats: Vec<IdFormat>,
}

impl IndicatorSet {
    pub fn new(doc_type: DocumentType, keywords: &[&str], side_match: SideMatch) -> Self {
        Self {
            doc_type,
            keywords: to_strings(keywords),
            front: Vec::new(),
            back: Vec::new(),
            side_match,
            id_formats: Vec::new(),
        }
    }

    pub fn with_front(mut self, indicators: &[&str]) -> Self {
        self.front = to_strings(indicators);
        self
    }

    pub fn with_back(mut self, indicators: &[&str]) -> Self {
        self.back = to_strings(indicators);
        self
    }

    pub fn with_id_formats(mut self, formats: &[IdFormat]) -> Self {
        self.id_formats = formats.to_vec();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.doc_type == DocumentType::Unknown {
            return Err(IdScanError::Config(
                "corpus entry cannot use the Unknown document type".to_string(),
            ));
        }
        if self.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(IdScanError::Config(format!(
                "{} has no classification keywords",
                self.doc_type
            )));
        }
        if let SideMatch::Fuzzy {
            front_threshold,
            back_threshold,
        } = self.side_match
        {
            for threshold in [front_threshold, back_threshold] {
                if !(0.0..=100.0).contains(&threshold) {
                    return Err(IdScanError::Config(format!(
                        "{} side threshold {} is outside 0-100",
                        self.doc_type, threshold
                    )));
                }
            }
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Ordered, read-only collection of [`IndicatorSet`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordCorpus {
    entries: Vec<IndicatorSet>,
}

impl KeywordCorpus {
    /// Build a corpus from entries, rejecting invalid data.
    pub fn new(entries: Vec<IndicatorSet>) -> Result<Self> {
        let corpus = Self { entries };
        corpus.validate()?;
        Ok(corpus)
    }

    /// Corpus for Indian identity documents and bank passbooks.
    pub fn builtin() -> Self {
        Self {
            entries: builtin::entries(),
        }
    }

    /// Check every entry and reject duplicated document types.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            entry.validate()?;
            if !seen.insert(entry.doc_type) {
                return Err(IdScanError::Config(format!(
                    "{} appears more than once in the corpus",
                    entry.doc_type
                )));
            }
        }
        Ok(())
    }

    /// Entries in tie-break order.
    pub fn entries(&self) -> &[IndicatorSet] {
        &self.entries
    }

    /// Indicators for `doc_type`, if the corpus covers it.
    pub fn get(&self, doc_type: DocumentType) -> Option<&IndicatorSet> {
        self.entries.iter().find(|e| e.doc_type == doc_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KeywordCorpus {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid_and_ordered() {
        let corpus = KeywordCorpus::builtin();
        corpus.validate().unwrap();

        let order: Vec<DocumentType> = corpus.entries().iter().map(|e| e.doc_type).collect();
        assert_eq!(order, DocumentType::KNOWN.to_vec());
    }

    #[test]
    fn test_builtin_side_thresholds() {
        let corpus = KeywordCorpus::builtin();

        assert_eq!(
            corpus.get(DocumentType::Voter).unwrap().side_match,
            SideMatch::Fuzzy {
                front_threshold: 70.0,
                back_threshold: 60.0
            }
        );
        assert_eq!(corpus.get(DocumentType::Passport).unwrap().side_match, SideMatch::Exact);
        assert_eq!(
            corpus.get(DocumentType::Aadhaar).unwrap().id_formats,
            vec![IdFormat::AadhaarSpaced, IdFormat::AadhaarCompact]
        );
        assert!(corpus.get(DocumentType::Unknown).is_none());
    }

    #[test]
    fn test_rejects_duplicate_entries() {
        let entry = IndicatorSet::new(DocumentType::Pan, &["pan"], SideMatch::Exact);
        let err = KeywordCorpus::new(vec![entry.clone(), entry]).unwrap_err();
        assert!(matches!(err, IdScanError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_entries() {
        let unknown = IndicatorSet::new(DocumentType::Unknown, &["x"], SideMatch::Exact);
        assert!(KeywordCorpus::new(vec![unknown]).is_err());

        let no_keywords = IndicatorSet::new(DocumentType::Pan, &[], SideMatch::Exact);
        assert!(KeywordCorpus::new(vec![no_keywords]).is_err());

        let bad_threshold = IndicatorSet::new(
            DocumentType::Pan,
            &["pan"],
            SideMatch::Fuzzy {
                front_threshold: 120.0,
                back_threshold: 80.0,
            },
        );
        assert!(KeywordCorpus::new(vec![bad_threshold]).is_err());
    }

    #[test]
    fn test_corpus_json_roundtrip_keeps_order() {
        let corpus = KeywordCorpus::builtin();
        let json = serde_json::to_string(&corpus).unwrap();
        let parsed: KeywordCorpus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, corpus);
        assert!(json.contains(r#""mode":"fuzzy""#));
    }
}
