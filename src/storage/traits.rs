//! Storage abstraction trait shared by every spelling backend.

use parking_lot::Mutex;

/// A backend that persists term frequencies and the delete-hash inverted index.
///
/// The trait is a plain key-value plus inverted-index contract. It carries no
/// ordering or atomicity guarantees across calls and no transaction
/// semantics; backends that support transactions expose them as their own
/// inherent methods.
///
/// Write methods take `&mut self`, read methods take `&self`, so a lookup can
/// never mutate the store it reads from.
pub trait SpellStore: Send + std::fmt::Debug {
    /// Register that `term` produces the deletion hash `hash`.
    ///
    /// Calling this more than once for the same pair is allowed. Whether the
    /// duplicate is kept is up to the backend.
    fn add_delete(&mut self, hash: u32, term: &str);

    /// All terms registered under `hash`, in no particular order.
    fn terms(&self, hash: u32) -> Vec<String>;

    /// Store the frequency of `term`.
    ///
    /// Implementations must document whether this overwrites or accumulates.
    fn set_frequency(&mut self, term: &str, frequency: i64);

    /// The stored frequency of `term`, or `None` if it was never stored.
    fn frequency(&self, term: &str) -> Option<i64>;

    /// Whether a frequency record exists for `term`.
    fn term_exists(&self, term: &str) -> bool;

    /// Length in chars of the longest stored term, if the backend can tell.
    ///
    /// Used to restore the early-reject bound when an engine is opened over
    /// an already populated backend.
    fn longest_term_length(&self) -> Option<usize> {
        None
    }
}

// Implement SpellStore for Box<dyn SpellStore> to allow trait objects
impl SpellStore for Box<dyn SpellStore> {
    fn add_delete(&mut self, hash: u32, term: &str) {
        self.as_mut().add_delete(hash, term)
    }

    fn terms(&self, hash: u32) -> Vec<String> {
        self.as_ref().terms(hash)
    }

    fn set_frequency(&mut self, term: &str, frequency: i64) {
        self.as_mut().set_frequency(term, frequency)
    }

    fn frequency(&self, term: &str) -> Option<i64> {
        self.as_ref().frequency(term)
    }

    fn term_exists(&self, term: &str) -> bool {
        self.as_ref().term_exists(term)
    }

    fn longest_term_length(&self) -> Option<usize> {
        self.as_ref().longest_term_length()
    }
}

/// Serializes every call through a mutex.
///
/// This turns a backend that cannot be shared between threads (a single
/// SQLite connection) into one that can serve concurrent lookups. Writers
/// still need `&mut`, so ingestion stays single-writer.
impl<S: SpellStore> SpellStore for Mutex<S> {
    fn add_delete(&mut self, hash: u32, term: &str) {
        self.get_mut().add_delete(hash, term)
    }

    fn terms(&self, hash: u32) -> Vec<String> {
        self.lock().terms(hash)
    }

    fn set_frequency(&mut self, term: &str, frequency: i64) {
        self.get_mut().set_frequency(term, frequency)
    }

    fn frequency(&self, term: &str) -> Option<i64> {
        self.lock().frequency(term)
    }

    fn term_exists(&self, term: &str) -> bool {
        self.lock().term_exists(term)
    }

    fn longest_term_length(&self) -> Option<usize> {
        self.lock().longest_term_length()
    }
}
