//! Document type classification by best keyword similarity.

use std::sync::Arc;

use tracing::debug;

use crate::corpus::KeywordCorpus;
use crate::fuzzy::best_similarity;
use crate::models::document::{ClassificationScore, DocumentType};

use super::join_fragments;

/// Default minimum winning score for a document type to be accepted.
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 50.0;

/// Scores every corpus entry against the fragment text and picks the best.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    corpus: Arc<KeywordCorpus>,
    confidence_floor: f64,
}

impl DocumentClassifier {
    pub fn new(corpus: Arc<KeywordCorpus>) -> Self {
        Self {
            corpus,
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
        }
    }

    /// Set the minimum winning score (0-100).
    pub fn with_confidence_floor(mut self, floor: f64) -> Self {
        self.confidence_floor = floor;
        self
    }

    /// Classify fragments into a document type.
    ///
    /// Each type scores the best similarity of any of its keywords against
    /// the lowercased concatenation of all fragments. The highest score wins;
    /// ties go to the entry that comes first in the corpus. When the winner
    /// is below the confidence floor the type is `Unknown` but every score is
    /// still returned. Empty input yields `Unknown` with no scores.
    ///
    /// Scoring is a symmetric partial ratio, so very short text is matched
    /// inside the keywords as well: a lone "a" occurs in a keyword of every
    /// built-in type, scores 100 everywhere and resolves to the first entry.
    pub fn classify<S: AsRef<str>>(&self, fragments: &[S]) -> (DocumentType, ClassificationScore) {
        let mut scores = ClassificationScore::new();
        if fragments.is_empty() {
            return (DocumentType::Unknown, scores);
        }

        let blob = join_fragments(fragments).to_lowercase();
        let mut best: Option<(DocumentType, f64)> = None;

        for entry in self.corpus.entries() {
            let score = best_similarity(&blob, &entry.keywords);
            scores.insert(entry.doc_type, score);

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((entry.doc_type, score));
            }
        }

        match best {
            Some((doc_type, score)) if score >= self.confidence_floor => {
                debug!("Classified as {} (score {:.1})", doc_type, score);
                (doc_type, scores)
            }
            Some((doc_type, score)) => {
                debug!(
                    "Best candidate {} scored {:.1}, below floor {:.1}",
                    doc_type, score, self.confidence_floor
                );
                (DocumentType::Unknown, scores)
            }
            None => (DocumentType::Unknown, scores),
        }
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new(Arc::new(KeywordCorpus::builtin()))
    }
}
