//! Bookkeeping for `unevaluatedProperties` and `unevaluatedItems`.
use ahash::AHashSet;

/// Property names and array indices of a single instance that some keyword has successfully
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluatedSet {
    properties: AHashSet<String>,
    items: AHashSet<usize>,
}

impl EvaluatedSet {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insert_property(&mut self, name: &str) {
        if !self.properties.contains(name) {
            self.properties.insert(name.to_string());
        }
    }
    pub fn insert_item(&mut self, idx: usize) {
        self.items.insert(idx);
    }
    pub fn contains_property(&self, name: &str) -> bool {
        self.properties.contains(name)
    }
    pub fn contains_item(&self, idx: usize) -> bool {
        self.items.contains(&idx)
    }
    /// Add everything `other` has seen.
    pub fn merge(&mut self, other: EvaluatedSet) {
        self.properties.extend(other.properties);
        self.items.extend(other.items);
    }
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.items.is_empty()
    }
}
