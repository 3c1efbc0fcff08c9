//!
//! dynrecord: dynamic, attribute-style records over string-keyed data.
//!
//! ## Core Concepts
//!
//! * **Records (`record::Record`)**: A mapping from normalized string keys to values. Map-shaped
//!   values are always nested records and sequences are coerced element by element, at any depth.
//! * **Raw data (`record::Raw`)**: The shapes accepted on every write or construction path: plain
//!   maps, sequences, JSON documents, leaves, or already built records.
//! * **Defaults (`record::Fallback`)**: A fixed value or per-key rule answering for missing keys.
//! * **Deep merge**: Recursive combination where map-shaped values on both sides merge and every
//!   other collision is replaced by the incoming value.
//! * **Attribute-style dispatch (`record::Accessor`)**: `name=`, `name?`, `name!` and bare `name`
//!   accesses resolved through an explicit table.

pub mod record;

/// Re-export the core record types for easier access.
pub use record::{Fallback, Key, Raw, Record, RecordError, Reply, Value};

/// Result type used throughout the dynrecord library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the dynrecord library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured record errors from the record module
    #[error(transparent)]
    Record(record::RecordError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Record(_) => "record",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a key was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error came from attribute-style dispatch.
    pub fn is_accessor_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_accessor_error(),
            _ => false,
        }
    }

    /// Check if this error indicates unusable source data.
    pub fn is_source_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_source_error(),
            _ => false,
        }
    }

    /// Check if this error is a type mismatch.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Record(record_err) => record_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is record-related.
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::Record(_))
    }

    /// Check if this error is a serialization failure.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::Serialize(_))
    }
}
