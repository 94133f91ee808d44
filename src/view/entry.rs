//! View keys and index entries.

use std::fmt;
use std::str::FromStr;

use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewError};

/// Composite key of a view row.
///
/// Keys order component by component, so every key sharing a leading
/// component forms one contiguous range. A single-component key serializes as
/// a bare JSON string, longer keys as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewKey(Vec<String>);

impl ViewKey {
    pub fn new(components: Vec<String>) -> Self {
        ViewKey(components)
    }

    /// One-component key.
    pub fn single<S: Into<String>>(component: S) -> Self {
        ViewKey(vec![component.into()])
    }

    /// Two-component key.
    pub fn pair<A: Into<String>, B: Into<String>>(first: A, second: B) -> Self {
        ViewKey(vec![first.into(), second.into()])
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `prefix` matches this key's leading components.
    pub fn starts_with(&self, prefix: &ViewKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl From<&str> for ViewKey {
    fn from(component: &str) -> Self {
        ViewKey::single(component)
    }
}

impl From<String> for ViewKey {
    fn from(component: String) -> Self {
        ViewKey::single(component)
    }
}

impl From<Vec<String>> for ViewKey {
    fn from(components: Vec<String>) -> Self {
        ViewKey(components)
    }
}

impl Serialize for ViewKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if let [component] = self.0.as_slice() {
            return serializer.serialize_str(component);
        }
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for component in &self.0 {
            seq.serialize_element(component)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for ViewKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::One(component) => ViewKey::single(component),
            Repr::Many(components) => ViewKey(components),
        })
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl FromStr for ViewKey {
    type Err = ViewError;

    /// Parses JSON (`"note"`, `["public","note"]`). Text that is not JSON is
    /// taken as a single raw component, so `note` works on a command line.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('"') {
            return serde_json::from_str(trimmed)
                .map_err(|e| ViewError::query(format!("malformed key {s}: {e}")));
        }
        Ok(ViewKey::single(s))
    }
}

/// One row emitted by a map function. Views carry no payload, so the value is
/// always null.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: ViewKey,
    #[serde(default)]
    pub value: (),
}

impl IndexEntry {
    pub fn new<K: Into<ViewKey>>(key: K) -> Self {
        IndexEntry {
            key: key.into(),
            value: (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![
            ViewKey::pair("b", "note"),
            ViewKey::pair("a", "task"),
            ViewKey::pair("a", ""),
            ViewKey::single("a"),
            ViewKey::pair("a", "note"),
        ];
        keys.sort();

        assert_eq!(
            keys,
            vec![
                ViewKey::single("a"),
                ViewKey::pair("a", ""),
                ViewKey::pair("a", "note"),
                ViewKey::pair("a", "task"),
                ViewKey::pair("b", "note"),
            ]
        );
    }

    #[test]
    fn test_dates_order_lexicographically() {
        assert!(ViewKey::single("0000-00-00") < ViewKey::single("2023-12-31"));
        assert!(ViewKey::single("2023-12-31") < ViewKey::single("2024-01-01"));
    }

    #[test]
    fn test_starts_with() {
        let key = ViewKey::pair("public", "note");
        assert!(key.starts_with(&ViewKey::single("public")));
        assert!(key.starts_with(&key));
        assert!(key.starts_with(&ViewKey::default()));
        assert!(!key.starts_with(&ViewKey::single("pub")));
    }

    #[test]
    fn test_key_json_shape() {
        assert_eq!(serde_json::to_string(&ViewKey::single("note")).unwrap(), r#""note""#);
        assert_eq!(
            serde_json::to_string(&ViewKey::pair("public", "note")).unwrap(),
            r#"["public","note"]"#
        );

        let entry = IndexEntry::new(ViewKey::single("2024-03-15"));
        assert_eq!(
            serde_json::to_string(&entry).unwrap(),
            r#"{"key":"2024-03-15","value":null}"#
        );
    }

    #[test]
    fn test_key_from_str() {
        assert_eq!("note".parse::<ViewKey>().unwrap(), ViewKey::single("note"));
        assert_eq!(r#""note""#.parse::<ViewKey>().unwrap(), ViewKey::single("note"));
        assert_eq!(
            r#"["public","note"]"#.parse::<ViewKey>().unwrap(),
            ViewKey::pair("public", "note")
        );
        assert!(r#"["public""#.parse::<ViewKey>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ViewKey::pair("a", "T").to_string(), r#"["a","T"]"#);
    }
}
