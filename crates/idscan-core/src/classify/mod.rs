//! Document type and side classification.

mod document;
mod side;

pub use document::{DocumentClassifier, DEFAULT_CONFIDENCE_FLOOR};
pub use side::SideClassifier;

/// Join fragments into one text blob. Position information is dropped.
pub(crate) fn join_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    fragments
        .iter()
        .map(|f| f.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}
