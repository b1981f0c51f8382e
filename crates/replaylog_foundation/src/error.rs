//! Error types for replaylog.
//!
//! Uses `thiserror` for ergonomic error definition. Store operations are total;
//! errors only arise while parsing inputs or validating configuration.

use thiserror::Error;

/// Result alias using the replaylog [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for replaylog operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an invalid execution point error.
    #[must_use]
    pub fn invalid_point(raw: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidExecutionPoint(raw.into()))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(reason.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An execution point string was empty or contained non-digit characters.
    #[error("invalid execution point: {0:?}")]
    InvalidExecutionPoint(String),

    /// A store configuration value was out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
