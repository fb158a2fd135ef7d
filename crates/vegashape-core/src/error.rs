//! Error types and handling for shape-check operations

use thiserror::Error;

/// Main error type for shape-check operations
#[derive(Debug, Error)]
pub enum ShapeError {
    /// Encode/decode failures from the external schema codec
    #[error("Codec error: {message}")]
    CodecError { message: String },

    /// A path pattern that could not be compiled
    #[error("Invalid path pattern '{pattern}': {message}")]
    PatternError { pattern: String, message: String },

    /// Per-rule evaluation failures; always absorbed by the rule fold
    #[error("Rule error at '{path}': {message}")]
    RuleError { path: String, message: String },

    /// JSON serialization failures (non-representable values)
    #[error("Serialization error: {source}")]
    SerializationError {
        #[source]
        source: serde_json::Error,
    },

    /// Diff capability failures
    #[error("Diff error: {message}")]
    DiffError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Codec,
    Pattern,
    Rule,
    Serialization,
    Diff,
    Internal,
}

impl ShapeError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShapeError::CodecError { .. } => ErrorKind::Codec,
            ShapeError::PatternError { .. } => ErrorKind::Pattern,
            ShapeError::RuleError { .. } => ErrorKind::Rule,
            ShapeError::SerializationError { .. } => ErrorKind::Serialization,
            ShapeError::DiffError { .. } => ErrorKind::Diff,
            ShapeError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (can continue with the next rule)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Pattern | ErrorKind::Rule)
    }

    /// Create a codec error
    pub fn codec_error(message: impl Into<String>) -> Self {
        Self::CodecError {
            message: message.into(),
        }
    }

    /// Create a pattern error
    pub fn pattern_error(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PatternError {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a rule error
    pub fn rule_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a diff error
    pub fn diff_error(message: impl Into<String>) -> Self {
        Self::DiffError {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from serde_json::Error
impl From<serde_json::Error> for ShapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError { source: err }
    }
}
