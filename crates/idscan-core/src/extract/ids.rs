//! Identifying-number extraction.

use super::patterns::IdFormat;
use super::{ExtractionMatch, FieldExtractor};

/// Recognizes a fragment that is, in its entirety, an identifying number.
///
/// Formats are tried in [`IdFormat::PRECEDENCE`] order; the first that
/// matches the trimmed fragment names the format.
pub struct IdNumberExtractor {
    formats: Vec<IdFormat>,
}

impl IdNumberExtractor {
    /// Extractor for every known format.
    pub fn new() -> Self {
        Self {
            formats: IdFormat::PRECEDENCE.to_vec(),
        }
    }

    /// Restrict recognition to the given formats, keeping their order.
    pub fn with_formats(mut self, formats: &[IdFormat]) -> Self {
        self.formats = formats.to_vec();
        self
    }
}

impl Default for IdNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdNumberExtractor {
    type Output = ExtractionMatch<IdFormat>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let trimmed = text.trim();
        let format = self.formats.iter().find(|f| f.is_match(trimmed))?;
        let start = text.len() - text.trim_start().len();

        Some(ExtractionMatch::new(*format, trimmed).with_position(start, start + trimmed.len()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.extract(text).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pan() {
        let extractor = IdNumberExtractor::new();

        let m = extractor.extract("  ABCDE1234F ").unwrap();
        assert_eq!(m.value, IdFormat::Pan);
        assert_eq!(m.source, "ABCDE1234F");
        assert_eq!(m.position, Some((2, 12)));
    }

    #[test]
    fn test_precedence_order() {
        let extractor = IdNumberExtractor::new();

        assert_eq!(extractor.extract("1234 5678 9012").unwrap().value, IdFormat::AadhaarSpaced);
        assert_eq!(extractor.extract("SBIN0001234").unwrap().value, IdFormat::Ifsc);
    }

    #[test]
    fn test_restricted_formats() {
        let extractor = IdNumberExtractor::new().with_formats(&[IdFormat::Voter]);

        assert!(extractor.extract("ABCDE1234F").is_none());
        assert!(extractor.extract("ABC1234567").is_some());
    }

    #[test]
    fn test_fragment_with_label_is_not_a_number() {
        let extractor = IdNumberExtractor::new();

        assert!(extractor.extract("PAN: ABCDE1234F").is_none());
        assert!(extractor.extract_all("").is_empty());
    }
}
