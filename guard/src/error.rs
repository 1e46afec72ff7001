//! Guard error types.

use thiserror::Error;
use veil_core::PropError;

/// Result type for guard operations.
pub type GuardResult<T> = Result<T, GuardError>;

/// Errors that can occur while applying or restoring an overwrite set.
#[derive(Debug, Error)]
pub enum GuardError {
    /// A write failed while applying the overwrite set. Properties
    /// overwritten before the failure have already been restored.
    #[error("Failed to overwrite property {key}: {source}")]
    Apply { key: String, source: PropError },

    /// One or more properties could not be written back after the unit
    /// of work completed.
    #[error("Restore failed: {0}")]
    Restore(#[from] RestoreError),
}

impl GuardError {
    pub fn apply(key: impl Into<String>, source: PropError) -> Self {
        Self::Apply {
            key: key.into(),
            source,
        }
    }
}

/// Aggregated write-back failures from a best-effort restore.
///
/// Every snapshotted key is attempted even after a failure; the keys
/// that could not be restored are collected here in snapshot order.
#[derive(Debug, Error)]
#[error("Failed to restore {} snapshotted properties", .failures.len())]
pub struct RestoreError {
    pub failures: Vec<(String, PropError)>,
}
