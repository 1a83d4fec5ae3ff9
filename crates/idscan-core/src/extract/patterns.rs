//! Regex patterns for identity document fields.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    // Permanent Account Number: five letters, four digits, one letter
    pub static ref PAN_NUMBER: Regex = Regex::new(
        r"^[A-Z]{5}[0-9]{4}[A-Z]$"
    ).unwrap();

    // Aadhaar: 12 digits, printed in groups of four or run together
    pub static ref AADHAAR_SPACED: Regex = Regex::new(
        r"^\d{4}\s\d{4}\s\d{4}$"
    ).unwrap();

    pub static ref AADHAAR_COMPACT: Regex = Regex::new(
        r"^\d{12}$"
    ).unwrap();

    // Driving licence: state code, RTO code, then at least 11 alphanumerics
    pub static ref DL_NUMBER: Regex = Regex::new(
        r"^[A-Z]{2}\d{2}[0-9A-Z]{11,}$"
    ).unwrap();

    // EPIC (voter ID) number
    pub static ref VOTER_NUMBER: Regex = Regex::new(
        r"^[A-Z]{3}[0-9]{7}$"
    ).unwrap();

    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"^[A-Z][0-9]{7}$"
    ).unwrap();

    // Bank branch code
    pub static ref IFSC_CODE: Regex = Regex::new(
        r"^[A-Z]{4}0[A-Z0-9]{6}$"
    ).unwrap();

    // DD-MM-YYYY or DD/MM/YYYY, anywhere in the fragment
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\d{2}[-/]\d{2}[-/]\d{4}"
    ).unwrap();
}

/// Recognized identifying-number formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdFormat {
    Pan,
    AadhaarSpaced,
    AadhaarCompact,
    DrivingLicense,
    Voter,
    Passport,
    Ifsc,
}

impl IdFormat {
    /// Evaluation order when a fragment is tested for an identifying number.
    pub const PRECEDENCE: [IdFormat; 7] = [
        IdFormat::Pan,
        IdFormat::AadhaarSpaced,
        IdFormat::AadhaarCompact,
        IdFormat::DrivingLicense,
        IdFormat::Voter,
        IdFormat::Passport,
        IdFormat::Ifsc,
    ];

    /// The anchored pattern for this format.
    pub fn pattern(&self) -> &'static Regex {
        match self {
            IdFormat::Pan => &PAN_NUMBER,
            IdFormat::AadhaarSpaced => &AADHAAR_SPACED,
            IdFormat::AadhaarCompact => &AADHAAR_COMPACT,
            IdFormat::DrivingLicense => &DL_NUMBER,
            IdFormat::Voter => &VOTER_NUMBER,
            IdFormat::Passport => &PASSPORT_NUMBER,
            IdFormat::Ifsc => &IFSC_CODE,
        }
    }

    /// Whether `text` is exactly a number of this format.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern().is_match(text)
    }

    /// Whether a raw fragment carries this format, either as printed or with
    /// OCR-inserted spaces removed.
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        let trimmed = fragment.trim();
        if self.is_match(trimmed) {
            return true;
        }
        let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
        compact != trimmed && self.is_match(&compact)
    }

    /// First format, in precedence order, that `text` matches exactly.
    pub fn detect(text: &str) -> Option<IdFormat> {
        Self::PRECEDENCE.into_iter().find(|f| f.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_formats() {
        assert_eq!(IdFormat::detect("ABCDE1234F"), Some(IdFormat::Pan));
        assert_eq!(IdFormat::detect("1234 5678 9012"), Some(IdFormat::AadhaarSpaced));
        assert_eq!(IdFormat::detect("123456789012"), Some(IdFormat::AadhaarCompact));
        assert_eq!(IdFormat::detect("MH1220110012345"), Some(IdFormat::DrivingLicense));
        assert_eq!(IdFormat::detect("ABC1234567"), Some(IdFormat::Voter));
        assert_eq!(IdFormat::detect("J8369854"), Some(IdFormat::Passport));
        assert_eq!(IdFormat::detect("SBIN0001234"), Some(IdFormat::Ifsc));
    }

    #[test]
    fn test_detect_rejects_partial_and_lowercase() {
        assert_eq!(IdFormat::detect("PAN ABCDE1234F"), None);
        assert_eq!(IdFormat::detect("abcde1234f"), None);
        assert_eq!(IdFormat::detect("1234 5678"), None);
    }

    #[test]
    fn test_matches_fragment_ignores_inner_spaces() {
        assert!(IdFormat::Pan.matches_fragment("  ABCDE 1234 F "));
        assert!(IdFormat::AadhaarCompact.matches_fragment("1234 5678 9012"));
        assert!(!IdFormat::Voter.matches_fragment("ABCDE1234F"));
    }

    #[test]
    fn test_date_pattern() {
        let m = DATE_DMY.find("DOB: 01/02/1990 issued 05-06-2010").unwrap();
        assert_eq!(m.as_str(), "01/02/1990");
        assert!(!DATE_DMY.is_match("1-1-1990"));
    }
}
