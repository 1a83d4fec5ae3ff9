//! Rule-based field extraction for identity documents.

pub mod dates;
pub mod ids;
pub mod labels;
pub mod patterns;
mod summary;

pub use dates::DobExtractor;
pub use ids::IdNumberExtractor;
pub use labels::{AuthorityExtractor, LabeledValueExtractor};
pub use patterns::IdFormat;
pub use summary::{SummaryExtractor, DEFAULT_MIN_DETAIL_LENGTH};

/// Trait for single-fragment field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from a fragment.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, in the order they apply.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An extracted value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in the source fragment.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
