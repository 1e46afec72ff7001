//! The target seam: named-property access for overwritable objects.
//!
//! Absence is a first-class state. `get_prop` returns `None` for a
//! property the target does not currently have, and `Some(Value::Null)`
//! for a property that holds null. The two must never be conflated.

use std::collections::{BTreeMap, HashMap};

use crate::{PropResult, Value};

/// A mutable object whose named properties can be read and written.
///
/// Map-shaped targets accept arbitrary keys. Fixed-shape targets (a
/// settings struct, a handle with validated fields) implement this
/// directly and may refuse unknown keys or reject values.
pub trait PropTarget {
    /// Read a property. `None` means the property is absent.
    fn get_prop(&self, key: &str) -> Option<Value>;

    /// Write a property, creating it if absent.
    fn set_prop(&mut self, key: &str, value: Value) -> PropResult<()>;

    /// Remove a property, returning it to the absent state.
    /// Removing an already-absent property is not an error.
    fn remove_prop(&mut self, key: &str) -> PropResult<()>;
}

impl PropTarget for HashMap<String, Value> {
    fn get_prop(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn set_prop(&mut self, key: &str, value: Value) -> PropResult<()> {
        self.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_prop(&mut self, key: &str) -> PropResult<()> {
        self.remove(key);
        Ok(())
    }
}

impl PropTarget for BTreeMap<String, Value> {
    fn get_prop(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn set_prop(&mut self, key: &str, value: Value) -> PropResult<()> {
        self.insert(key.to_string(), value);
        Ok(())
    }

    fn remove_prop(&mut self, key: &str) -> PropResult<()> {
        self.remove(key);
        Ok(())
    }
}
