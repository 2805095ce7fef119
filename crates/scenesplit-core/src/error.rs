//! Error types for SceneSplit.

use thiserror::Error;

/// Main error type for SceneSplit operations.
#[derive(Error, Debug)]
pub enum SceneSplitError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An external collaborator (ffprobe, a detector) failed or returned malformed data.
    #[error("Collaborator failure: {0}")]
    CollaboratorFailure(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SceneSplitError {
    /// Shorthand for building an `InvalidParameter` error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Shorthand for building a `CollaboratorFailure` error.
    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::CollaboratorFailure(msg.into())
    }

    /// True for errors caused by the caller's input rather than the environment.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter(_))
    }
}

/// Result type alias for SceneSplit operations.
pub type Result<T> = std::result::Result<T, SceneSplitError>;
