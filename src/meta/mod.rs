//! Document metadata.
//!
//! - [`Metadata`] - ordered key → value mapping returned by the reader
//! - [`MetaValue`] - tagged value (text, integer, nested mapping)
//! - [`MetadataHook`] - per-value post-processing injected by the host
//! - [`frontmatter`] - the `---` header block parser

pub mod frontmatter;

pub use frontmatter::{FrontMatterError, extract, split};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Values
// ============================================================================

/// A single metadata value.
///
/// Front matter only ever yields `Text`; synthetic keys and host hooks may
/// produce the other variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    Integer(u64),
    Map(Metadata),
}

impl MetaValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<u64> for MetaValue {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Ordered metadata mapping.
///
/// Keys keep first-insertion order; inserting an existing key replaces the
/// value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Option<MetaValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    /// Text value of `key`, if present and textual.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Post-processing applied to every metadata value before it is stored.
///
/// Receives the lowercased key and the cleaned-up raw value. Closures work:
///
/// ```ignore
/// let hook = |key: &str, value: String| -> Result<MetaValue, FrontMatterError> {
///     Ok(if key == "title" { value.to_uppercase() } else { value }.into())
/// };
/// ```
pub trait MetadataHook {
    type Error: From<FrontMatterError>;

    fn process(&self, key: &str, value: String) -> Result<MetaValue, Self::Error>;
}

impl<F, E> MetadataHook for F
where
    F: Fn(&str, String) -> Result<MetaValue, E>,
    E: From<FrontMatterError>,
{
    type Error = E;

    fn process(&self, key: &str, value: String) -> Result<MetaValue, E> {
        self(key, value)
    }
}

/// Hook that stores every value as text, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextValues;

impl MetadataHook for TextValues {
    type Error = FrontMatterError;

    fn process(&self, _key: &str, value: String) -> Result<MetaValue, FrontMatterError> {
        Ok(MetaValue::Text(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut meta = Metadata::new();
        meta.insert("title", "First");
        meta.insert("author", "Me");
        let old = meta.insert("title", "Second");

        assert_eq!(old, Some(MetaValue::from("First")));
        assert_eq!(meta.keys().collect::<Vec<_>>(), vec!["title", "author"]);
        assert_eq!(meta.text("title"), Some("Second"));
    }

    #[test]
    fn test_serialize_untagged() {
        let mut nested = Metadata::new();
        nested.insert("name", "Ada");

        let mut meta = Metadata::new();
        meta.insert("title", "Sample");
        meta.insert("reading_time", 4u64);
        meta.insert("author", MetaValue::Map(nested));

        let json = serde_json::to_string(&meta).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Sample","reading_time":4,"author":{"name":"Ada"}}"#
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(MetaValue::from(4u64).to_string(), "4");
        assert_eq!(MetaValue::from("x").to_string(), "x");
        let map: Metadata = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(MetaValue::Map(map).to_string(), "{a: 1, b: 2}");
    }

    #[test]
    fn test_closure_hook() {
        let hook = |key: &str, value: String| -> Result<MetaValue, FrontMatterError> {
            Ok(format!("{key}={value}").into())
        };
        assert_eq!(hook.process("k", "v".into()).unwrap(), MetaValue::from("k=v"));
    }
}
