//! The ordered configuration store
//!
//! Provides [`ConfigStore`], an insertion-ordered string map whose entries
//! carry optional write [`Provenance`]. Cloning produces an independent
//! snapshot containing the parent's full closure.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::provenance::Provenance;

/// One stored value with its optional write reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Entry {
    value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    provenance: Option<Provenance>,
}

/// Ordered string-to-string configuration map
///
/// Iteration yields entries in insertion order. Removal via
/// [`ConfigStore::unset`] preserves the relative order of the remaining
/// entries, so rule application driven by catalog order stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigStore {
    entries: IndexMap<String, Entry>,
}

impl ConfigStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the store holds no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    /// Look up the provenance recorded for a key, if any
    #[inline]
    #[must_use]
    pub fn provenance(&self, key: &str) -> Option<&Provenance> {
        self.entries.get(key).and_then(|e| e.provenance.as_ref())
    }

    /// Check whether a key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Set a value without provenance
    ///
    /// Overwriting an existing key keeps its position and clears any
    /// previously recorded provenance.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(
            key.into(),
            Entry {
                value: value.into(),
                provenance: None,
            },
        );
    }

    /// Set a value and record why it was written
    pub fn set_with_provenance(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        provenance: Provenance,
    ) {
        self.entries.insert(
            key.into(),
            Entry {
                value: value.into(),
                provenance: Some(provenance),
            },
        );
    }

    /// Remove a key, preserving the order of remaining entries
    ///
    /// Returns `true` when the key was present.
    pub fn unset(&mut self, key: &str) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, e)| (k.as_str(), e.value.as_str()))
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Read an integer-valued parameter
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidInt`] when the key is present but its
    /// value does not parse. An absent key yields `default`.
    pub fn get_int(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| StoreError::InvalidInt {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Read a boolean-valued parameter (`"true"` / `"false"`, case-insensitive)
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidBool`] when the key is present but its
    /// value is neither spelling. An absent key yields `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, StoreError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(StoreError::InvalidBool {
                    key: key.to_string(),
                    value: raw.to_string(),
                }),
            },
        }
    }

    /// Builder-style insertion, mainly for fixtures
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

impl FromIterator<(String, String)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (k, v) in iter {
            store.set(k, v);
        }
        store
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (k, v) in iter {
            store.set(k, v);
        }
        store
    }
}
