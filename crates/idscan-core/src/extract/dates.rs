//! Date-of-birth extraction.

use super::patterns::DATE_DMY;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts DD-MM-YYYY / DD/MM/YYYY dates exactly as printed.
///
/// The text is not parsed into a calendar date: cards print day-first dates
/// and an OCR'd "31-02-1990" is still reported rather than dropped.
pub struct DobExtractor;

impl DobExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DobExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DobExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_DMY.find(text).map(|m| {
            ExtractionMatch::new(m.as_str().to_string(), text).with_position(m.start(), m.end())
        })
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .find_iter(text)
            .map(|m| {
                ExtractionMatch::new(m.as_str().to_string(), text)
                    .with_position(m.start(), m.end())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_date() {
        let extractor = DobExtractor::new();

        let result = extractor.extract("DOB: 01-01-1990 Issue 12/05/2015").unwrap();
        assert_eq!(result.value, "01-01-1990");
        assert_eq!(result.position, Some((5, 15)));
    }

    #[test]
    fn test_extract_all_dates() {
        let extractor = DobExtractor::new();

        let values: Vec<String> = extractor
            .extract_all("01-01-1990 / 12/05/2015")
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(values, vec!["01-01-1990", "12/05/2015"]);
    }

    #[test]
    fn test_no_date() {
        let extractor = DobExtractor::new();

        assert!(extractor.extract("Year of Birth: 1990").is_none());
        assert!(extractor.extract("1.1.1990").is_none());
    }
}
