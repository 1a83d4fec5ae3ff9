//! Error types for the idscan-core library.

use thiserror::Error;

/// Main error type for the idscan library.
#[derive(Error, Debug)]
pub enum IdScanError {
    /// The caller supplied something other than a list of text fragments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A scoring or assembly step failed. Scoring is total, so this is a defect.
    #[error("processing error: {0}")]
    Processing(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the idscan library.
pub type Result<T> = std::result::Result<T, IdScanError>;
