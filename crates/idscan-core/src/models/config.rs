//! Configuration for the classification pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::DEFAULT_CONFIDENCE_FLOOR;
use crate::corpus::KeywordCorpus;
use crate::error::{IdScanError, Result};
use crate::extract::labels::DEFAULT_AUTHORITY_THRESHOLD;
use crate::extract::DEFAULT_MIN_DETAIL_LENGTH;

/// Main configuration for the idscan pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Minimum winning score (0-100) for a document type to be accepted.
    pub confidence_floor: f64,

    /// Minimum fuzzy containment score (0-100) for an issuing-authority phrase.
    pub authority_threshold: f64,

    /// Fragments whose trimmed length exceeds this are kept as other details.
    pub min_detail_length: usize,

    /// Keyword corpus, including side thresholds.
    pub corpus: KeywordCorpus,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
            authority_threshold: DEFAULT_AUTHORITY_THRESHOLD,
            min_detail_length: DEFAULT_MIN_DETAIL_LENGTH,
            corpus: KeywordCorpus::builtin(),
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check thresholds and corpus contents.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("confidence_floor", self.confidence_floor),
            ("authority_threshold", self.authority_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(IdScanError::Config(format!(
                    "{name} must be within 0-100, got {value}"
                )));
            }
        }
        self.corpus.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = ClassifierConfig {
            confidence_floor: 60.0,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = ClassifierConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"authority_threshold": 90.0}"#).unwrap();

        let loaded = ClassifierConfig::from_file(&path).unwrap();
        assert_eq!(loaded.authority_threshold, 90.0);
        assert_eq!(loaded.confidence_floor, DEFAULT_CONFIDENCE_FLOOR);
        assert_eq!(loaded.corpus, KeywordCorpus::builtin());
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let config = ClassifierConfig {
            confidence_floor: 150.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(IdScanError::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_corpus_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"corpus": [{"doc_type": "Unknown Document", "keywords": ["x"], "side_match": {"mode": "exact"}}]}"#,
        )
        .unwrap();

        assert!(matches!(
            ClassifierConfig::from_file(&path),
            Err(IdScanError::Config(_))
        ));
    }
}
