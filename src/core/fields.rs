//! Key-value payload carried by loggers and records
//!
//! Two combination rules live here and they point in opposite directions:
//! - [`Fields::merge`]: the base map wins on a key collision.
//! - [`Fields::extend_overwrite`]: the incoming map wins on a key collision.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<FieldValue>),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Int(i) => Some(*i),
            FieldValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u64> for FieldValue {
    fn from(u: u64) -> Self {
        FieldValue::UInt(u)
    }
}

impl From<u32> for FieldValue {
    fn from(u: u32) -> Self {
        FieldValue::UInt(u64::from(u))
    }
}

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    fields: HashMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: HashMap::with_capacity(capacity),
        }
    }

    /// Add a field, replacing any previous value under the same key
    #[must_use]
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    /// Add a field, replacing any previous value. Empty keys are ignored.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.fields.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    /// New map holding `base` plus every key of `overlay` that `base` lacks.
    ///
    /// Keys already present in `base` are never overwritten.
    #[must_use]
    pub fn merge(base: &Fields, overlay: &Fields) -> Fields {
        let mut merged = base.clone();
        merged.absorb(overlay);
        merged
    }

    /// In-place form of [`Fields::merge`]: insert only the keys not yet present.
    pub fn absorb(&mut self, overlay: &Fields) {
        for (key, value) in overlay.iter() {
            if !self.fields.contains_key(key) {
                self.fields.insert(key.clone(), value.clone());
            }
        }
    }

    /// Copy every entry of `other` in, overwriting same-named keys.
    pub fn extend_overwrite(&mut self, other: Fields) {
        self.fields.extend(other.fields);
    }

    /// Format fields as key=value pairs, sorted by key
    pub fn format_fields(&self) -> String {
        let mut pairs: Vec<_> = self.fields.iter().collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for Fields {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_creation() {
        let fields = Fields::new();
        assert!(fields.is_empty());

        let fields = Fields::new()
            .with("user_id", 123)
            .with("username", "john_doe")
            .with("active", true);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("user_id"), Some(&FieldValue::Int(123)));
    }

    #[test]
    fn test_merge_keeps_base_on_collision() {
        let base = Fields::from([("key", "base"), ("only_base", "x")]);
        let overlay = Fields::from([("key", "overlay"), ("only_overlay", "y")]);

        let merged = Fields::merge(&base, &overlay);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("key").and_then(FieldValue::as_str), Some("base"));
        assert!(merged.contains_key("only_overlay"));

        // inputs untouched
        assert_eq!(base.len(), 2);
        assert_eq!(overlay.len(), 2);
    }

    #[test]
    fn test_extend_overwrite_prefers_incoming() {
        let mut fields = Fields::from([("k", 1)]);
        fields.extend_overwrite(Fields::from([("k", 2)]));
        assert_eq!(fields.get("k"), Some(&FieldValue::Int(2)));
    }

    #[test]
    fn test_format_fields_sorted() {
        let fields = Fields::new().with("b", 2).with("a", "one");
        assert_eq!(fields.format_fields(), "a=one b=2");
    }

    #[test]
    fn test_empty_key_ignored() {
        let fields = Fields::new().with("", 1).with("a", 2);
        assert_eq!(fields.len(), 1);
        assert!(!fields.contains_key(""));

        let collected: Fields = [("", "x")].into_iter().collect();
        assert!(collected.is_empty());
    }

    #[test]
    fn test_list_display() {
        let value = FieldValue::from(vec!["a.rs:1 f", "b.rs:2 g"]);
        assert_eq!(value.to_string(), "[a.rs:1 f b.rs:2 g]");
    }

    #[test]
    fn test_json_shape() {
        let fields = Fields::new()
            .with("n", 7)
            .with("s", "x")
            .with("l", vec![1, 2])
            .with("none", Option::<i64>::None);
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["n"], 7);
        assert_eq!(json["s"], "x");
        assert_eq!(json["l"], serde_json::json!([1, 2]));
        assert!(json["none"].is_null());
    }
}
