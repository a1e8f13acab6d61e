//! Metadata maps.
//!
//! Metadata lives on host objects (fields, functions, structs). The editor
//! core only reads and writes it through [`MetadataMap`]; [`Metadata`] is
//! the in-memory implementation used for snapshots and tests.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub trait MetadataMap {
    fn get(&self, key: &str) -> Option<&str>;

    fn set(&mut self, key: &str, value: &str);

    fn remove(&mut self, key: &str) -> Option<String>;

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn has_any(&self) -> bool {
        self.entries().next().is_some()
    }

    fn snapshot(&self) -> Metadata {
        self.entries().collect()
    }

    /// Copies every entry of `other` in, overwriting existing values.
    fn append(&mut self, other: &Metadata) {
        for (key, value) in other.iter() {
            self.set(key, value);
        }
    }
}

/// Insertion-ordered key/value metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, String>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl MetadataMap for Metadata {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(self.iter())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// `{ClampMin = "0", UIMax = "10"}`
impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {:?}", key, value)?;
        }
        f.write_str("}")
    }
}
