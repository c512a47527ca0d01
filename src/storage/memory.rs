//! In-memory storage implementation, the reference backend.

use ahash::AHashMap;

use crate::storage::traits::SpellStore;

/// A map-backed [`SpellStore`].
///
/// `set_frequency` overwrites the stored value. `add_delete` appends without
/// deduplication; repeated registrations of the same pair show up as
/// repeated entries in [`SpellStore::terms`], which the lookup engine
/// tolerates.
///
/// Reads never touch shared mutable state, so any number of lookups may run
/// concurrently against a `&MemoryStore`. Writes need `&mut` and are therefore
/// serialized by the borrow checker.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    /// Delete hash to the terms that produced it.
    deletes: AHashMap<u32, Vec<String>>,
    /// Term to frequency.
    words: AHashMap<String, i64>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of terms with a stored frequency.
    pub fn term_count(&self) -> usize {
        self.words.len()
    }

    /// Get the number of distinct delete-hash buckets.
    pub fn delete_bucket_count(&self) -> usize {
        self.deletes.len()
    }
}

impl SpellStore for MemoryStore {
    fn add_delete(&mut self, hash: u32, term: &str) {
        self.deletes.entry(hash).or_default().push(term.to_string());
    }

    fn terms(&self, hash: u32) -> Vec<String> {
        self.deletes.get(&hash).cloned().unwrap_or_default()
    }

    fn set_frequency(&mut self, term: &str, frequency: i64) {
        if let Some(stored) = self.words.get_mut(term) {
            *stored = frequency;
        } else {
            self.words.insert(term.to_string(), frequency);
        }
    }

    fn frequency(&self, term: &str) -> Option<i64> {
        self.words.get(term).copied()
    }

    fn term_exists(&self, term: &str) -> bool {
        self.words.contains_key(term)
    }

    fn longest_term_length(&self) -> Option<usize> {
        self.words.keys().map(|term| term.chars().count()).max()
    }
}
