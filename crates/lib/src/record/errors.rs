//! Error types for record operations.
//!
//! This module defines the structured errors raised by [`Record`](super::Record)
//! construction, attribute-style dispatch and typed value extraction.

use thiserror::Error;

/// Structured error types for record operations.
///
/// Plain reads and writes are total; errors only surface when an
/// attribute-style name cannot be resolved, when source data is not
/// map-shaped, or when a caller asks for a key or type that is not there.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RecordError {
    /// An attribute-style name matched no mutator, predicate, forcing
    /// accessor, stored key or simple identifier
    #[error("No accessor '{name}': not a key, mutator, predicate or forcing accessor")]
    NoSuchAccessor { name: String },

    /// Construction or merge input was not usable as a record
    #[error("Invalid source data: {reason}")]
    InvalidSourceData { reason: String },

    /// A strict lookup found no value for the key
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// A stored value could not be converted to the requested type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },
}

impl RecordError {
    /// Check if this error came from attribute-style dispatch
    pub fn is_accessor_error(&self) -> bool {
        matches!(self, RecordError::NoSuchAccessor { .. })
    }

    /// Check if this error is about unusable source data
    pub fn is_source_error(&self) -> bool {
        matches!(self, RecordError::InvalidSourceData { .. })
    }

    /// Check if this error indicates a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecordError::KeyNotFound { .. })
    }

    /// Check if this error is a type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(self, RecordError::TypeMismatch { .. })
    }

    /// Get the accessor name if this is a dispatch error
    pub fn name(&self) -> Option<&str> {
        match self {
            RecordError::NoSuchAccessor { name } => Some(name),
            _ => None,
        }
    }

    /// Get the key if this is a key-related error
    pub fn key(&self) -> Option<&str> {
        match self {
            RecordError::KeyNotFound { key } => Some(key),
            _ => None,
        }
    }
}

// Conversion from RecordError to the main Error type
impl From<RecordError> for crate::Error {
    fn from(err: RecordError) -> Self {
        crate::Error::Record(err)
    }
}
