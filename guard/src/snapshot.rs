//! Prior-value capture for restoration.

use veil_core::Value;

/// The state of a property immediately before it was overwritten or
/// remembered.
#[derive(Debug, Clone, PartialEq)]
pub enum Prior {
    /// The property was present with this value.
    Present(Value),
    /// The property did not exist on the target.
    Absent,
}

impl Prior {
    /// Returns true if the property was absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Prior::Absent)
    }

    /// Get the prior value, if the property was present.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Prior::Present(value) => Some(value),
            Prior::Absent => None,
        }
    }
}

impl From<Option<Value>> for Prior {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => Prior::Present(v),
            None => Prior::Absent,
        }
    }
}

/// Original values captured before overwriting.
///
/// Entries are kept in capture order, which is the overwrite set's
/// iteration order; restoration walks the same order. The snapshot is
/// handed to the unit of work read-only and discarded once the guard
/// call ends. Keys marked `Ignore` never appear here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: Vec<(String, Prior)>,
}

impl Snapshot {
    pub(crate) fn record(&mut self, key: &str, prior: Prior) {
        self.entries.push((key.to_string(), prior));
    }

    /// The prior value for a key. `None` when the key was not captured
    /// or was absent before the call; use [`Snapshot::prior`] to tell
    /// the two apart.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.prior(key).and_then(Prior::as_value)
    }

    /// The captured prior state for a key, if the key was captured.
    pub fn prior(&self, key: &str) -> Option<&Prior> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, p)| p)
    }

    /// True if the key was captured.
    pub fn contains(&self, key: &str) -> bool {
        self.prior(key).is_some()
    }

    /// Captured keys in capture order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Captured entries in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prior)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Number of captured keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
