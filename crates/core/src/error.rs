//! Error types for the event database.
//!
//! Ingestion and queries are infallible: absent inputs are ignored and
//! lookup misses come back as `None` or empty vectors. Only operations that
//! touch an external sink or parse external input return [`Result`].

use thiserror::Error;

/// All tracedb errors.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error while writing or reading an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A string-table export line could not be parsed
    #[error("malformed string table at line {line}: {reason}")]
    MalformedStringTable {
        /// 1-based line number in the input
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// Rejected configuration value
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for tracedb operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a malformed-line error
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedStringTable {
            line,
            reason: reason.into(),
        }
    }

    /// Check if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this is a parse error on imported data.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Error::MalformedStringTable { .. })
    }
}
