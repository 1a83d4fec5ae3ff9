//! Identity document data models.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of identity document.
///
/// Variant order is the default tie-break order used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Permanent Account Number card (income tax).
    #[serde(rename = "PAN Card")]
    Pan,
    /// Aadhaar card (UIDAI).
    #[serde(rename = "Aadhaar Card")]
    Aadhaar,
    /// Elector's photo identity card.
    #[serde(rename = "Voter ID Card")]
    Voter,
    #[serde(rename = "Passport")]
    Passport,
    #[serde(rename = "Driving License")]
    DrivingLicense,
    #[serde(rename = "Bank Passbook")]
    BankPassbook,
    /// No document type reached the confidence floor.
    #[serde(rename = "Unknown Document")]
    Unknown,
}

impl DocumentType {
    /// Every classifiable type, excluding `Unknown`.
    pub const KNOWN: [DocumentType; 6] = [
        DocumentType::Pan,
        DocumentType::Aadhaar,
        DocumentType::Voter,
        DocumentType::Passport,
        DocumentType::DrivingLicense,
        DocumentType::BankPassbook,
    ];

    /// Human-readable label, also used as the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Pan => "PAN Card",
            DocumentType::Aadhaar => "Aadhaar Card",
            DocumentType::Voter => "Voter ID Card",
            DocumentType::Passport => "Passport",
            DocumentType::DrivingLicense => "Driving License",
            DocumentType::BankPassbook => "Bank Passbook",
            DocumentType::Unknown => "Unknown Document",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != DocumentType::Unknown
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Physical side of the document shown in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    Front,
    Back,
    #[default]
    Unknown,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Front => "Front",
            Side::Back => "Back",
            Side::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Issuing authorities recognized on Indian identity documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssuingAuthority {
    #[serde(rename = "Election Commission of India")]
    ElectionCommission,
    #[serde(rename = "Government of India")]
    GovernmentOfIndia,
}

impl IssuingAuthority {
    /// Phrase searched for in the fragment text.
    pub fn phrase(&self) -> &'static str {
        match self {
            IssuingAuthority::ElectionCommission => "ELECTION COMMISSION OF INDIA",
            IssuingAuthority::GovernmentOfIndia => "GOVERNMENT OF INDIA",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IssuingAuthority::ElectionCommission => "Election Commission of India",
            IssuingAuthority::GovernmentOfIndia => "Government of India",
        }
    }
}

/// Confidence (0-100) per document type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassificationScore(BTreeMap<DocumentType, f64>);

impl ClassificationScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, doc_type: DocumentType, score: f64) {
        self.0.insert(doc_type, score);
    }

    pub fn get(&self, doc_type: DocumentType) -> Option<f64> {
        self.0.get(&doc_type).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DocumentType, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

/// Normalized fields pulled out of the fragments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    /// Document label (e.g. "PAN Card").
    #[serde(rename = "Document")]
    pub document: String,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Father's Name")]
    pub fathers_name: Option<String>,

    /// Date of birth as printed (DD-MM-YYYY or DD/MM/YYYY).
    #[serde(rename = "DOB")]
    pub dob: Option<String>,

    /// Identifying number, taken from the last fragment matching a known format.
    #[serde(rename = "Number")]
    pub number: Option<String>,

    #[serde(rename = "Issuing Authority")]
    pub issuing_authority: Option<IssuingAuthority>,

    /// Every fragment long enough to be meaningful, in input order.
    #[serde(rename = "Other Details")]
    pub other_details: Vec<String>,
}

impl FieldSummary {
    /// Empty summary for the given document type.
    pub fn new(doc_type: DocumentType) -> Self {
        Self {
            document: doc_type.label().to_string(),
            name: None,
            fathers_name: None,
            dob: None,
            number: None,
            issuing_authority: None,
            other_details: Vec::new(),
        }
    }
}

/// Complete classification of one image.
///
/// Built once by [`ClassificationResult::assemble`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    filename: String,
    document_type: DocumentType,
    side: Side,
    fuzzy_scores: ClassificationScore,
    cleaned_summary: FieldSummary,
    raw_detected_text: Vec<String>,
}

impl ClassificationResult {
    /// Combine the outputs of every stage.
    pub fn assemble(
        reference: impl Into<String>,
        fragments: Vec<String>,
        document_type: DocumentType,
        side: Side,
        scores: ClassificationScore,
        summary: FieldSummary,
    ) -> Self {
        Self {
            filename: reference.into(),
            document_type,
            side,
            fuzzy_scores: scores,
            cleaned_summary: summary,
            raw_detected_text: fragments,
        }
    }

    /// Reference id (usually the source file name).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn scores(&self) -> &ClassificationScore {
        &self.fuzzy_scores
    }

    pub fn summary(&self) -> &FieldSummary {
        &self.cleaned_summary
    }

    /// Fragments exactly as received, in reading order.
    pub fn fragments(&self) -> &[String] {
        &self.raw_detected_text
    }

    /// Whether a document type was resolved.
    pub fn is_predicted(&self) -> bool {
        self.document_type.is_known()
    }
}
