//! Common error types for VEIL.

use thiserror::Error;

/// Errors that can occur when reading or writing a target property.
///
/// Map-shaped targets accept arbitrary keys and never fail; fixed-shape
/// targets use these variants to refuse a key or a value.
#[derive(Debug, Error)]
pub enum PropError {
    /// The target has no property with this name.
    #[error("No such property: {key}")]
    NoSuchProperty { key: String },

    /// The property exists but cannot be written.
    #[error("Property is immutable: {key}")]
    Immutable { key: String },

    /// The property setter refused the value.
    #[error("Property {key} rejected value: {reason}")]
    Rejected { key: String, reason: String },
}

impl PropError {
    pub fn no_such_property(key: impl Into<String>) -> Self {
        Self::NoSuchProperty { key: key.into() }
    }

    pub fn immutable(key: impl Into<String>) -> Self {
        Self::Immutable { key: key.into() }
    }

    pub fn rejected(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for property operations.
pub type PropResult<T> = Result<T, PropError>;
