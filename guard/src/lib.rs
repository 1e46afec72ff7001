//! VEIL Scope Guard
//!
//! Scoped property overwrites with guaranteed restoration.
//!
//! Responsibilities:
//! - Apply an overwrite set to a target, capturing prior values
//! - Run a caller-supplied unit of work against the overwritten target
//! - Restore captured values on every exit path, panics included
//!
//! The target is shared mutable state: between apply and restore the
//! overwritten values are visible to everything else holding access to
//! it. Callers that need the overlay concurrently with other readers
//! should hand them a [`merged`] copy instead.
//!
//! # Module Structure
//!
//! - `overwrite` - Overwrite directives and the ordered overwrite set
//! - `snapshot` - Prior-value capture handed to the unit of work
//! - `guard` - The RAII guard, `with_props`, and `merged`
//! - `error` - Error types for apply and restore failures

mod error;
mod guard;
mod overwrite;
mod snapshot;

pub use error::{GuardError, GuardResult, RestoreError};
pub use guard::{merged, with_props, PropGuard};
pub use overwrite::{Overwrite, Overwrites};
pub use snapshot::{Prior, Snapshot};
