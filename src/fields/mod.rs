//! Structured field sets.
//!
//! # Responsibilities
//! - Hold the key/value data attached to one record or one context
//! - Convert caller values into [`Value`] args without failing
//! - Normalize a flat key/value arg list into [`Fields`] (see [`normalize`])
//!
//! # Design Decisions
//! - Args are `serde_json::Value`: a string in key position is a key,
//!   anything else there is recorded under a sentinel key
//! - Insertion order is kept and duplicate keys are not collapsed

mod normalize;

pub use normalize::{normalize, DANGLING_ARG, INVALID_KEY_TYPE};

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

/// Build an arg list from heterogeneous expressions.
///
/// ```
/// let args = fieldlog::args!["request_id", "abc123", "attempt", 2];
/// assert_eq!(args.len(), 4);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::fields::to_arg(&$arg)),+]
    };
}

/// Convert any serializable value into an arg.
///
/// Values that fail to serialize (e.g. maps with non-string keys) are kept as
/// a string describing the failure instead of being dropped.
pub fn to_arg<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|e| Value::String(format!("<unserializable: {e}>")))
}

/// Ordered key/value pairs attached to a record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, Value)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Append an entry, keeping any earlier entry with the same key.
    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.entries.push((key.into(), value));
    }

    /// Replace the entry with the same key in place, or append it.
    pub fn set(&mut self, key: &str, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Last value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
