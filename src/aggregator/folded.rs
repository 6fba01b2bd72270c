//! Flat folded-stack aggregation.
//!
//! Keys are the semicolon-joined frame labels in root-first order, values
//! are accumulated weights. First-seen insertion order is preserved and
//! governs output order.

use indexmap::IndexMap;

/// Mapping from aggregation key to accumulated weight
///
/// **Public** - built by the conversion pass, read by the serializer
#[derive(Debug, Default)]
pub struct FoldedTable {
    entries: IndexMap<String, u64>,
}

impl FoldedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one stack into the table
    ///
    /// `frames` is consumed from the leaf end toward the root end, so a
    /// leaf-first input emits a root-first key. Empty inputs are ignored.
    pub fn fold(&mut self, frames: &[String], weight: u64) {
        if frames.is_empty() {
            return;
        }

        let key = Self::aggregation_key(frames);
        *self.entries.entry(key).or_insert(0) += weight;
    }

    /// Build the aggregation key for an ordered frame sequence
    fn aggregation_key(frames: &[String]) -> String {
        let mut key = String::new();
        for label in frames.iter().rev() {
            if !key.is_empty() {
                key.push(';');
            }
            key.push_str(label);
        }
        key
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all accumulated weights
    pub fn total_weight(&self) -> u64 {
        self.entries.values().sum()
    }
}
