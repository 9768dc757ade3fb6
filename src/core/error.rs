//! Error types for stanza operations
//!
//! Tree traversal and mutation never fail: missing lookups are reported as
//! `None` or an empty string, not as errors. The error type exists for the
//! interchange decoder, which has to reject malformed input shapes.

use thiserror::Error;

/// Error types for stanza operations
#[derive(Debug, Error)]
pub enum StanzaError {
    /// Bad value in an interchange tree (wrong shape or type)
    #[error("Bad value: {0}")]
    BadValue(String),

    /// Underlying JSON error while reading interchange text
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type alias for stanza operations
pub type StanzaResult<T> = Result<T, StanzaError>;
