//! Error types for valuetrace-ir
//!
//! Provides unified error handling across the crate.
//!
//! Missing semantic information is deliberately NOT an error: oracle lookups
//! that come back empty fold into `Verdict::Unknown` or an empty candidate
//! set. Only cooperative cancellation and classification-table contract
//! violations surface as `Err`.

use thiserror::Error;

/// Main error type for valuetrace-ir operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// The query's cancellation token was signalled; the caller must treat
    /// this as "no answer", never as a negative classification.
    #[error("query cancelled")]
    Cancelled,

    /// A symbol kind outside the classification decision table was passed to
    /// a classification entry point. This indicates an incomplete table, not
    /// a condition of the analyzed input.
    #[error("symbol kind not covered by the classification table: {0}")]
    UnsupportedSymbol(String),
}

/// Result type alias for valuetrace operations
pub type Result<T> = std::result::Result<T, TraceError>;
