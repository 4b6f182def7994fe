//! The reasoner catalog.
//!
//! Maps reasoner identifiers to the display/submission value a `from`
//! statement carries. The catalog always contains one synthetic entry for
//! the schema meta-reasoner, which stands for the merged graph and matches
//! every edge.

use serde_json::Value;

use crate::error::{CompleteError, CompleteResult};

/// Identifier of the synthetic schema-only meta-reasoner.
pub const SCHEMA_REASONER: &str = "/schema";

/// Insertion-ordered reasoner id to display value mapping.
///
/// Display order of `from` candidates follows catalog iteration order, so
/// the catalog preserves the order entries were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasonerCatalog {
    entries: Vec<(String, String)>,
}

impl ReasonerCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(id, value)` pairs, keeping order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::new();
        for (id, value) in pairs {
            catalog.insert(id, value);
        }
        catalog
    }

    /// Decode a catalog from a JSON object of id to value.
    pub fn from_json(value: &Value) -> CompleteResult<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| CompleteError::Decode("reasoner catalog is not an object".to_string()))?;
        let mut catalog = Self::new();
        for (id, display) in object {
            let display = display.as_str().ok_or_else(|| {
                CompleteError::Decode(format!("reasoner {id:?} value is not a string"))
            })?;
            catalog.insert(id.clone(), display.to_string());
        }
        Ok(catalog)
    }

    /// Add or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == id) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((id, value)),
        }
    }

    /// Ensure the synthetic schema meta-reasoner entry is present.
    pub fn with_schema_entry(mut self) -> Self {
        if self.get(SCHEMA_REASONER).is_none() {
            self.insert(SCHEMA_REASONER, SCHEMA_REASONER);
        }
        self
    }

    /// Display value for a reasoner id.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate `(id, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
