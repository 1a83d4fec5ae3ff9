//! Core library for identity document classification.
//!
//! This crate provides:
//! - A data-driven keyword corpus for Indian identity documents
//! - Partial-ratio fuzzy scoring
//! - Document type and side classification
//! - Cascading field extraction (name, father's name, DOB, ID number, issuing authority)
//!
//! OCR itself is not performed here: the input is an ordered list of text
//! fragments produced by an upstream recognizer.

pub mod classify;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod fuzzy;
pub mod models;
pub mod pipeline;

pub use classify::{DocumentClassifier, SideClassifier};
pub use corpus::{IndicatorSet, KeywordCorpus, SideMatch};
pub use error::{IdScanError, Result};
pub use extract::{IdFormat, SummaryExtractor};
pub use fuzzy::similarity;
pub use models::config::ClassifierConfig;
pub use models::document::{
    ClassificationResult, ClassificationScore, DocumentType, FieldSummary, IssuingAuthority, Side,
};
pub use pipeline::{
    fragments_from_lines, load_fragments, parse_fragments, BatchItem, BatchSummary,
    DocumentPipeline,
};
