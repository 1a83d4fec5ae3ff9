//! Front/back side classification for an already classified document.

use std::sync::Arc;

use tracing::debug;

use crate::corpus::{IndicatorSet, KeywordCorpus, SideMatch};
use crate::fuzzy::similarity;
use crate::models::document::{DocumentType, Side};

use super::join_fragments;

/// Decides which side of a document the fragments come from.
#[derive(Debug, Clone)]
pub struct SideClassifier {
    corpus: Arc<KeywordCorpus>,
}

impl SideClassifier {
    pub fn new(corpus: Arc<KeywordCorpus>) -> Self {
        Self { corpus }
    }

    /// Classify the side of a `doc_type` document.
    ///
    /// Front is checked first and wins outright: a front indicator at or
    /// above the front threshold, or any fragment shaped like the type's
    /// identifying number. Otherwise a back indicator at or above the back
    /// threshold gives Back. Unknown types and types missing from the corpus
    /// are always `Side::Unknown`.
    pub fn classify_side<S: AsRef<str>>(&self, doc_type: DocumentType, fragments: &[S]) -> Side {
        if !doc_type.is_known() || fragments.is_empty() {
            return Side::Unknown;
        }
        let Some(entry) = self.corpus.get(doc_type) else {
            debug!("No indicators for {}, side unknown", doc_type);
            return Side::Unknown;
        };

        let text = join_fragments(fragments);

        let side = if Self::front_matches(entry, &text, fragments) {
            Side::Front
        } else if Self::any_indicator(entry.side_match, &entry.back, &text, Side::Back) {
            Side::Back
        } else {
            Side::Unknown
        };

        debug!("{} side: {}", doc_type, side);
        side
    }

    fn front_matches<S: AsRef<str>>(entry: &IndicatorSet, text: &str, fragments: &[S]) -> bool {
        Self::any_indicator(entry.side_match, &entry.front, text, Side::Front)
            || fragments.iter().any(|fragment| {
                entry
                    .id_formats
                    .iter()
                    .any(|format| format.matches_fragment(fragment.as_ref()))
            })
    }

    fn any_indicator(side_match: SideMatch, indicators: &[String], text: &str, side: Side) -> bool {
        let mut indicators = indicators.iter().filter(|i| !i.trim().is_empty());

        match side_match {
            SideMatch::Fuzzy {
                front_threshold,
                back_threshold,
            } => {
                let threshold = if side == Side::Back {
                    back_threshold
                } else {
                    front_threshold
                };
                indicators.any(|indicator| similarity(text, indicator) >= threshold)
            }
            SideMatch::Exact => {
                let upper = text.to_uppercase();
                indicators.any(|indicator| upper.contains(&indicator.to_uppercase()))
            }
        }
    }
}

impl Default for SideClassifier {
    fn default() -> Self {
        Self::new(Arc::new(KeywordCorpus::builtin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_has_unknown_side() {
        let classifier = SideClassifier::default();

        assert_eq!(
            classifier.classify_side(DocumentType::Unknown, &["INCOME TAX DEPARTMENT", "ABCDE1234F"]),
            Side::Unknown
        );
        let empty: [&str; 0] = [];
        assert_eq!(classifier.classify_side(DocumentType::Pan, &empty), Side::Unknown);
    }

    #[test]
    fn test_pan_front() {
        let fragments = ["INCOME TAX DEPARTMENT", "PERMANENT ACCOUNT NUMBER", "ABCDE1234F"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Pan, &fragments),
            Side::Front
        );
    }

    #[test]
    fn test_number_pattern_alone_marks_front() {
        let classifier = SideClassifier::default();

        assert_eq!(
            classifier.classify_side(DocumentType::Pan, &["zzzz", "ABCDE 1234F"]),
            Side::Front
        );
        assert_eq!(
            classifier.classify_side(DocumentType::Aadhaar, &["zzzz", "123456789012"]),
            Side::Front
        );
    }

    #[test]
    fn test_pan_back() {
        let fragments = ["If this card is lost", "INCOME TAX PAN SERVICES UNIT", "NSDL"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Pan, &fragments),
            Side::Back
        );
    }

    #[test]
    fn test_front_takes_priority_over_back() {
        let fragments = ["VALID TILL 2030", "AUTHORISED TO DRIVE", "TRANSPORT"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::DrivingLicense, &fragments),
            Side::Front
        );
    }

    #[test]
    fn test_exact_mode_requires_substring() {
        let classifier = SideClassifier::default();

        assert_eq!(
            classifier.classify_side(DocumentType::BankPassbook, &["Deposit", "Withdrawal"]),
            Side::Back
        );
        // One character off is enough to miss in exact mode.
        assert_eq!(
            classifier.classify_side(DocumentType::Passport, &["PASSP0RT"]),
            Side::Unknown
        );
        assert_eq!(
            classifier.classify_side(DocumentType::Passport, &["Republic of India", "J8369854"]),
            Side::Front
        );
    }

    /// Built-in corpus with the Voter entry raised to 80/80.
    fn strict_voter_classifier() -> SideClassifier {
        let entries = KeywordCorpus::builtin()
            .entries()
            .iter()
            .cloned()
            .map(|mut entry| {
                if entry.doc_type == DocumentType::Voter {
                    entry.side_match = SideMatch::Fuzzy {
                        front_threshold: 80.0,
                        back_threshold: 80.0,
                    };
                }
                entry
            })
            .collect();
        SideClassifier::new(Arc::new(KeywordCorpus::new(entries).unwrap()))
    }

    #[test]
    fn test_voter_back_threshold_is_lower() {
        // Three substitutions against "ISSUE DATE" score 70.
        let fragments = ["ISXUE DXTX"];

        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Voter, &fragments),
            Side::Back
        );
        assert_eq!(
            strict_voter_classifier().classify_side(DocumentType::Voter, &fragments),
            Side::Unknown
        );
    }

    #[test]
    fn test_voter_front_threshold_is_lower() {
        // One substitution against "NAME" scores 75.
        let fragments = ["NXME"];

        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Voter, &fragments),
            Side::Front
        );
        assert_eq!(
            strict_voter_classifier().classify_side(DocumentType::Voter, &fragments),
            Side::Unknown
        );
    }

    #[test]
    fn test_voter_back_with_ocr_noise() {
        let fragments = ["ADDRES5 12 MG ROAD", "DISTRlCT"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Voter, &fragments),
            Side::Back
        );
    }

    #[test]
    fn test_aadhaar_back() {
        let fragments = ["Address: 12 MG Road", "District: Pune"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Aadhaar, &fragments),
            Side::Back
        );
    }

    #[test]
    fn test_driving_license_back() {
        let fragments = ["NON-TRANSPORT", "LMV"];
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::DrivingLicense, &fragments),
            Side::Back
        );
    }

    #[test]
    fn test_nothing_matches() {
        assert_eq!(
            SideClassifier::default().classify_side(DocumentType::Aadhaar, &["zzzz qqqq"]),
            Side::Unknown
        );
    }
}
