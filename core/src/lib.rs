//! VEIL Core Types
//!
//! This crate provides the foundational types used throughout VEIL:
//! - Value types (the Value enum with all scalar types, Null, and lists)
//! - The PropTarget trait (named-property access with tri-state absence)
//! - Common error types

mod error;
mod target;
mod value;

pub use error::*;
pub use target::*;
pub use value::*;
