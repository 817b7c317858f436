//! Structured key/value fields attached to a log entry

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt::Write as _;

/// Ordered set of structured fields.
///
/// ```
/// use paywarden_log::Fields;
///
/// let fields = Fields::new()
///     .with("customerId", "cus_42")
///     .with("count", 2);
/// assert_eq!(fields.get_str("customerId"), Some("cus_42"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields(Map<String, Value>);

impl Fields {
    /// Create an empty field set
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Add a field, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a field
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a field as a string slice, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Append ` key=value` pairs for the text formats.
    pub(crate) fn write_pairs(&self, out: &mut String) {
        for (key, value) in &self.0 {
            match value {
                Value::String(s) => {
                    let _ = write!(out, " {}={}", key, s);
                }
                other => {
                    let _ = write!(out, " {}={}", key, other);
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}
