//! Overwrite directives and the ordered overwrite set.

use veil_core::Value;

/// A proposed overwrite for one property.
///
/// `Ignore` and `Remember` are the sentinel markers. Enum variants cannot
/// collide with any `Value` a property might legitimately hold (including
/// `Value::Null`), and a variant compares equal to itself however many
/// times it is named.
#[derive(Debug, Clone, PartialEq)]
pub enum Overwrite {
    /// Replace the property with this value for the scope of the call.
    Set(Value),
    /// Skip this property: never read, written, or snapshotted.
    Ignore,
    /// Capture the current value in the snapshot without writing.
    Remember,
}

impl From<Value> for Overwrite {
    fn from(value: Value) -> Self {
        Overwrite::Set(value)
    }
}

impl From<bool> for Overwrite {
    fn from(b: bool) -> Self {
        Overwrite::Set(Value::from(b))
    }
}

impl From<i64> for Overwrite {
    fn from(i: i64) -> Self {
        Overwrite::Set(Value::from(i))
    }
}

impl From<i32> for Overwrite {
    fn from(i: i32) -> Self {
        Overwrite::Set(Value::from(i))
    }
}

impl From<f64> for Overwrite {
    fn from(f: f64) -> Self {
        Overwrite::Set(Value::from(f))
    }
}

impl From<String> for Overwrite {
    fn from(s: String) -> Self {
        Overwrite::Set(Value::from(s))
    }
}

impl From<&str> for Overwrite {
    fn from(s: &str) -> Self {
        Overwrite::Set(Value::from(s))
    }
}

impl From<Vec<Value>> for Overwrite {
    fn from(items: Vec<Value>) -> Self {
        Overwrite::Set(Value::from(items))
    }
}

/// An ordered set of proposed overwrites.
///
/// Iteration order is insertion order, so apply and restore are
/// deterministic. Inserting a key that is already present replaces its
/// directive in place: the last occurrence wins, the position of the
/// first is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overwrites {
    entries: Vec<(String, Overwrite)>,
}

impl Overwrites {
    /// Create an empty overwrite set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a directive for a key, replacing any earlier entry.
    pub fn insert(&mut self, key: impl Into<String>, directive: impl Into<Overwrite>) {
        let key = key.into();
        let directive = directive.into();
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => self.entries[idx].1 = directive,
            None => self.entries.push((key, directive)),
        }
    }

    /// Chainable insert of a replacement value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, Overwrite::Set(value.into()));
        self
    }

    /// Chainable insert of the `Ignore` marker.
    pub fn ignore(mut self, key: impl Into<String>) -> Self {
        self.insert(key, Overwrite::Ignore);
        self
    }

    /// Chainable insert of the `Remember` marker.
    pub fn remember(mut self, key: impl Into<String>) -> Self {
        self.insert(key, Overwrite::Remember);
        self
    }

    /// Get the directive for a key.
    pub fn get(&self, key: &str) -> Option<&Overwrite> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, d)| d)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Overwrite)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, D> FromIterator<(K, D)> for Overwrites
where
    K: Into<String>,
    D: Into<Overwrite>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut set = Overwrites::new();
        for (key, directive) in iter {
            set.insert(key, directive);
        }
        set
    }
}

/// Helper macro to create overwrite sets.
#[macro_export]
macro_rules! overwrites {
    () => {
        $crate::Overwrites::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut set = $crate::Overwrites::new();
            $(
                set.insert($key, $crate::Overwrite::from($value));
            )+
            set
        }
    };
}
