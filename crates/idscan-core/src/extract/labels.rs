//! Labeled values (name, father's name) and issuing authority.

use crate::fuzzy::containment;
use crate::models::document::IssuingAuthority;

use super::FieldExtractor;

/// Default minimum containment score for an issuing-authority phrase.
pub const DEFAULT_AUTHORITY_THRESHOLD: f64 = 85.0;

/// Extracts the value of a `LABEL: value` fragment.
///
/// A fragment qualifies when it contains the label (case-insensitive) and
/// does not contain the excluded word. The value is whatever follows the
/// last colon, or the whole fragment when there is no colon.
pub struct LabeledValueExtractor {
    label: String,
    exclude: Option<String>,
}

impl LabeledValueExtractor {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_uppercase(),
            exclude: None,
        }
    }

    /// Skip fragments that also contain `word`.
    pub fn excluding(mut self, word: &str) -> Self {
        self.exclude = Some(word.to_uppercase());
        self
    }

    /// Holder's name, ignoring father's-name lines.
    pub fn name() -> Self {
        Self::new("NAME").excluding("FATHER")
    }

    pub fn fathers_name() -> Self {
        Self::new("FATHER")
    }

    fn applies_to(&self, text: &str) -> bool {
        let upper = text.to_uppercase();
        upper.contains(&self.label)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|word| upper.contains(word.as_str()))
    }
}

impl FieldExtractor for LabeledValueExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let text = text.trim();
        if !self.applies_to(text) {
            return None;
        }
        let value = text.rsplit(':').next().unwrap_or(text);
        Some(value.trim().to_string())
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

/// Detects issuing-authority phrases by fuzzy containment.
pub struct AuthorityExtractor {
    threshold: f64,
}

impl AuthorityExtractor {
    /// Authorities in the order their rules are applied; a later match
    /// overrides an earlier one.
    pub const ORDER: [IssuingAuthority; 2] = [
        IssuingAuthority::ElectionCommission,
        IssuingAuthority::GovernmentOfIndia,
    ];

    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_AUTHORITY_THRESHOLD,
        }
    }

    /// Set minimum containment score (0-100).
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }
}

impl Default for AuthorityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AuthorityExtractor {
    type Output = IssuingAuthority;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        Self::ORDER
            .into_iter()
            .filter(|authority| containment(text, authority.phrase()) >= self.threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_after_last_colon() {
        let extractor = LabeledValueExtractor::name();

        assert_eq!(extractor.extract("Name: RAHUL KUMAR"), Some("RAHUL KUMAR".to_string()));
        assert_eq!(extractor.extract("Name / नाम : Sita: DEVI"), Some("DEVI".to_string()));
        assert_eq!(extractor.extract("  NAME RAHUL  "), Some("NAME RAHUL".to_string()));
    }

    #[test]
    fn test_name_skips_father_lines() {
        let extractor = LabeledValueExtractor::name();

        assert_eq!(extractor.extract("Father's Name: SURESH KUMAR"), None);
        assert_eq!(extractor.extract("DOB: 01-01-1990"), None);
    }

    #[test]
    fn test_fathers_name() {
        let extractor = LabeledValueExtractor::fathers_name();

        assert_eq!(
            extractor.extract("Father's Name: SURESH KUMAR"),
            Some("SURESH KUMAR".to_string())
        );
    }

    #[test]
    fn test_authority_fuzzy_containment() {
        let extractor = AuthorityExtractor::new();

        assert_eq!(
            extractor.extract("ELECTION COMMISSION OF INDIA"),
            Some(IssuingAuthority::ElectionCommission)
        );
        assert_eq!(
            extractor.extract("GOVERNMENT 0F INDIA"),
            Some(IssuingAuthority::GovernmentOfIndia)
        );
        assert_eq!(extractor.extract("INDIA"), None);
        assert_eq!(extractor.extract("Permanent Account Number"), None);
    }

    #[test]
    fn test_authority_threshold() {
        let strict = AuthorityExtractor::new().with_threshold(100.0);

        assert_eq!(strict.extract("GOVERNMENT 0F INDIA"), None);
        assert_eq!(
            strict.extract("Government of India"),
            Some(IssuingAuthority::GovernmentOfIndia)
        );
    }
}
