//! Error types for ABBYY report processing.

use thiserror::Error;

/// Errors that can occur when scanning or analyzing ABBYY OCR reports.
#[derive(Error, Debug)]
pub enum QaError {
    /// A page fragment is not well-formed XML
    #[error("Malformed page: {0}")]
    MalformedPage(String),

    /// The input ended in the middle of a page fragment
    #[error("Truncated page: {0}")]
    TruncatedPage(String),

    /// An attribute value is outside its expected form
    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    /// IO error while reading a report
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for report processing operations.
pub type Result<T> = std::result::Result<T, QaError>;
