//! Cascading field assignment over a fragment list.

use tracing::debug;

use crate::models::document::{DocumentType, FieldSummary};

use super::dates::DobExtractor;
use super::ids::IdNumberExtractor;
use super::labels::{AuthorityExtractor, LabeledValueExtractor};
use super::FieldExtractor;

/// Default minimum trimmed length (exclusive) for a fragment to be kept in
/// the other-details list.
pub const DEFAULT_MIN_DETAIL_LENGTH: usize = 2;

/// Builds a [`FieldSummary`] from ordered fragments.
///
/// Every rule is applied to every fragment, in input order. Rules do not
/// exclude each other and a later fragment overwrites a field set by an
/// earlier one, so the identifying number is the last matching fragment,
/// not the first.
pub struct SummaryExtractor {
    authority: AuthorityExtractor,
    name: LabeledValueExtractor,
    fathers_name: LabeledValueExtractor,
    dob: DobExtractor,
    number: IdNumberExtractor,
    min_detail_length: usize,
}

impl SummaryExtractor {
    pub fn new() -> Self {
        Self {
            authority: AuthorityExtractor::new(),
            name: LabeledValueExtractor::name(),
            fathers_name: LabeledValueExtractor::fathers_name(),
            dob: DobExtractor::new(),
            number: IdNumberExtractor::new(),
            min_detail_length: DEFAULT_MIN_DETAIL_LENGTH,
        }
    }

    /// Set issuing-authority containment threshold (0-100).
    pub fn with_authority_threshold(mut self, threshold: f64) -> Self {
        self.authority = AuthorityExtractor::new().with_threshold(threshold);
        self
    }

    /// Set the length a trimmed fragment must exceed to be kept as a detail.
    pub fn with_min_detail_length(mut self, length: usize) -> Self {
        self.min_detail_length = length;
        self
    }

    /// Extract fields from `fragments` for a document of type `doc_type`.
    pub fn extract<S: AsRef<str>>(&self, fragments: &[S], doc_type: DocumentType) -> FieldSummary {
        let mut summary = FieldSummary::new(doc_type);

        for fragment in fragments {
            let text = fragment.as_ref().trim();

            for authority in self.authority.extract_all(text) {
                summary.issuing_authority = Some(authority);
            }

            if let Some(name) = self.name.extract(text) {
                summary.name = Some(name);
            }

            if let Some(name) = self.fathers_name.extract(text) {
                summary.fathers_name = Some(name);
            }

            if let Some(dob) = self.dob.extract(text) {
                summary.dob = Some(dob.value);
            }

            if let Some(number) = self.number.extract(text) {
                debug!("Fragment {:?} matches {:?} format", number.source, number.value);
                summary.number = Some(number.source);
            }

            if text.chars().count() > self.min_detail_length {
                summary.other_details.push(text.to_string());
            }
        }

        debug!(
            "Extracted summary for {}: name={} dob={} number={} details={}",
            doc_type,
            summary.name.is_some(),
            summary.dob.is_some(),
            summary.number.is_some(),
            summary.other_details.len()
        );

        summary
    }
}

impl Default for SummaryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::IssuingAuthority;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_aadhaar_front_fields() {
        let fragments = ["GOVERNMENT OF INDIA", "1234 5678 9012", "DOB: 01-01-1990"];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Aadhaar);

        assert_eq!(summary.document, "Aadhaar Card");
        assert_eq!(summary.dob.as_deref(), Some("01-01-1990"));
        assert_eq!(summary.number.as_deref(), Some("1234 5678 9012"));
        assert_eq!(summary.issuing_authority, Some(IssuingAuthority::GovernmentOfIndia));
        assert_eq!(summary.name, None);
    }

    #[test]
    fn test_last_number_wins() {
        let fragments = ["ABCDE1234F", "PQRST5678G"];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Pan);

        assert_eq!(summary.number.as_deref(), Some("PQRST5678G"));
    }

    #[test]
    fn test_later_fragments_overwrite_fields() {
        let fragments = [
            "ELECTION COMMISSION OF INDIA",
            "Name: FIRST",
            "Government of India",
            "Name : SECOND",
            "DOB 01/01/1980",
            "Date of Birth: 02-02-1990",
        ];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Voter);

        assert_eq!(summary.name.as_deref(), Some("SECOND"));
        assert_eq!(summary.dob.as_deref(), Some("02-02-1990"));
        assert_eq!(summary.issuing_authority, Some(IssuingAuthority::GovernmentOfIndia));
    }

    #[test]
    fn test_fragment_feeds_several_fields() {
        let fragments = ["Father's Name: RAM 01-01-1960"];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Pan);

        assert_eq!(summary.fathers_name.as_deref(), Some("RAM 01-01-1960"));
        assert_eq!(summary.dob.as_deref(), Some("01-01-1960"));
        assert_eq!(summary.name, None);
        assert_eq!(summary.other_details, vec!["Father's Name: RAM 01-01-1960"]);
    }

    #[test]
    fn test_other_details_keeps_order_and_length_filter() {
        let fragments = ["  INCOME TAX DEPARTMENT ", "ab", "   ", "XYZ", "ABCDE1234F", "a"];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Pan);

        assert_eq!(
            summary.other_details,
            vec!["INCOME TAX DEPARTMENT", "XYZ", "ABCDE1234F"]
        );
        let expected = fragments.iter().filter(|f| f.trim().chars().count() > 2).count();
        assert_eq!(summary.other_details.len(), expected);
    }

    #[test]
    fn test_min_detail_length_is_configurable() {
        let fragments = ["ab", "abcd"];
        let summary = SummaryExtractor::new()
            .with_min_detail_length(0)
            .extract(&fragments, DocumentType::Unknown);

        assert_eq!(summary.other_details, vec!["ab", "abcd"]);
        assert_eq!(summary.document, "Unknown Document");
    }

    #[test]
    fn test_empty_fragments() {
        let fragments: [&str; 0] = [];
        let summary = SummaryExtractor::new().extract(&fragments, DocumentType::Unknown);

        assert_eq!(summary, FieldSummary::new(DocumentType::Unknown));
    }
}
