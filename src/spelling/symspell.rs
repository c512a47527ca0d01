//! Symmetric-delete spelling correction engine.
//!
//! Every admitted term is indexed under the hashes of all strings obtained by
//! deleting up to `max_edit_distance` chars from its prefix. A query walks
//! its own prefix deletions breadth first and probes the index with each;
//! two strings within distance `k` always share a common deletion, so every
//! true match surfaces as a candidate. Candidates are filtered cheaply,
//! verified by exact bounded distance, and ranked per [`Verbosity`].

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use log::{debug, trace};
use rayon::prelude::*;

use crate::error::Result;
use crate::spelling::config::SymSpellConfig;
use crate::spelling::deletes::{delete_hash, delete_in_suggestion_prefix, prefix_deletes};
use crate::spelling::distance::bounded_distance_chars;
use crate::spelling::suggest::{Suggestion, SuggestionCollector, Verbosity};
use crate::storage::memory::MemoryStore;
use crate::storage::traits::SpellStore;

/// A spelling dictionary with symmetric-delete lookup over a [`SpellStore`].
///
/// Ingestion needs `&mut self` and lookups only `&self`, so lookups can run
/// concurrently whenever the store is `Sync`, while writers are serialized
/// by the borrow checker (or by the caller's own lock).
#[derive(Debug)]
pub struct SymSpell<S: SpellStore = MemoryStore> {
    store: S,
    config: SymSpellConfig,
    /// Length in chars of the longest admitted term; 0 while unknown.
    max_term_length: usize,
    /// Terms seen but not yet frequent enough to be indexed.
    below_threshold: AHashMap<String, i64>,
}

impl SymSpell<MemoryStore> {
    /// Create an engine over a new in-memory store.
    pub fn new(config: SymSpellConfig) -> Result<Self> {
        Self::with_store(MemoryStore::new(), config)
    }
}

impl<S: SpellStore> SymSpell<S> {
    /// Create an engine over the given store.
    ///
    /// If the store already holds terms and can report their longest length,
    /// the early-reject bound starts from it.
    pub fn with_store(store: S, config: SymSpellConfig) -> Result<Self> {
        config.validate()?;
        let max_term_length = store.longest_term_length().unwrap_or(0);

        Ok(SymSpell {
            store,
            config,
            max_term_length,
            below_threshold: AHashMap::new(),
        })
    }

    /// Get the engine configuration.
    pub fn config(&self) -> &SymSpellConfig {
        &self.config
    }

    /// Get the configured maximum edit distance.
    pub fn max_edit_distance(&self) -> usize {
        self.config.max_edit_distance
    }

    /// Get the configured prefix length.
    pub fn prefix_length(&self) -> usize {
        self.config.prefix_length
    }

    /// Get the configured count threshold.
    pub fn count_threshold(&self) -> i64 {
        self.config.count_threshold
    }

    /// Length in chars of the longest indexed term, 0 if none is known.
    pub fn max_term_length(&self) -> usize {
        self.max_term_length
    }

    /// Number of terms waiting to reach the count threshold.
    pub fn pending_count(&self) -> usize {
        self.below_threshold.len()
    }

    /// Accumulated count of a term that is not yet indexed.
    pub fn pending_frequency(&self, term: &str) -> Option<i64> {
        self.below_threshold.get(term).copied()
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the underlying store mutably, e.g. to control its transactions.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the engine and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Add `count` observations of `term`.
    ///
    /// Returns `true` only when this call indexed the term for the first
    /// time. Non-positive counts, counts that leave a term below the
    /// threshold, and frequency updates of already indexed terms all
    /// return `false`. Frequencies saturate at `i64::MAX`.
    pub fn ingest(&mut self, term: &str, count: i64) -> bool {
        if count <= 0 {
            return false;
        }

        let frequency = if let Some(&pending) = self.below_threshold.get(term) {
            let total = pending.saturating_add(count);
            if total < self.config.count_threshold {
                self.below_threshold.insert(term.to_string(), total);
                return false;
            }
            self.below_threshold.remove(term);
            debug!("promoting {term:?} with accumulated count {total}");
            total
        } else if let Some(stored) = self.store.frequency(term) {
            self.store.set_frequency(term, stored.saturating_add(count));
            return false;
        } else if count < self.config.count_threshold {
            self.below_threshold.insert(term.to_string(), count);
            return false;
        } else {
            count
        };

        self.admit(term, frequency);
        true
    }

    /// Write the frequency and register every deletion variant of `term`.
    fn admit(&mut self, term: &str, frequency: i64) {
        self.store.set_frequency(term, frequency);

        let term_length = term.chars().count();
        if term_length > self.max_term_length {
            self.max_term_length = term_length;
        }

        let variants = prefix_deletes(term, self.config.max_edit_distance, self.config.prefix_length);
        trace!("indexing {term:?} under {} deletion variants", variants.len());
        for variant in &variants {
            self.store.add_delete(delete_hash(variant), term);
        }
    }

    /// Find dictionary terms within edit distance of `query`.
    ///
    /// `max_edit_distance` narrows the configured bound for this call; values
    /// above the configured maximum are clamped to it. A lookup never fails;
    /// it returns an empty list when nothing is within range.
    pub fn lookup(
        &self,
        query: &str,
        verbosity: Verbosity,
        max_edit_distance: Option<usize>,
    ) -> Vec<Suggestion> {
        let bound = max_edit_distance.map_or(self.config.max_edit_distance, |d| {
            d.min(self.config.max_edit_distance)
        });
        let prefix_length = self.config.prefix_length;
        let query_chars: Vec<char> = query.chars().collect();
        let query_len = query_chars.len();

        if self.max_term_length > 0 && query_len.saturating_sub(bound) > self.max_term_length {
            return Vec::new();
        }

        let mut collector = SuggestionCollector::new(verbosity, bound);

        if let Some(frequency) = self.store.frequency(query) {
            let exact = Suggestion::new(query, 0, frequency);
            if verbosity != Verbosity::All {
                return vec![exact];
            }
            collector.offer(exact);
        }

        if bound == 0 {
            return collector.finish();
        }

        let mut considered_deletes: AHashSet<Vec<char>> = AHashSet::new();
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        considered_suggestions.insert(query.to_string());

        let query_prefix_len = query_len.min(prefix_length);
        let mut candidates = VecDeque::from([query_chars[..query_prefix_len].to_vec()]);
        let mut probes = 0usize;
        let mut verified = 0usize;

        while let Some(candidate) = candidates.pop_front() {
            let candidate_len = candidate.len();
            let length_diff = query_prefix_len - candidate_len;

            // Candidates come out shortest-deletion first, so once one is out
            // of range every later one is too.
            if length_diff > collector.bound() {
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            let candidate_str: String = candidate.iter().collect();
            probes += 1;

            for term in self.store.terms(delete_hash(&candidate_str)) {
                if term == query {
                    continue;
                }

                let working_bound = collector.bound();
                let term_chars: Vec<char> = term.chars().collect();
                let term_len = term_chars.len();

                if term_len.abs_diff(query_len) > working_bound
                    || term_len < candidate_len
                    || (term_len == candidate_len && term != candidate_str)
                {
                    continue;
                }

                let term_prefix_len = term_len.min(prefix_length);
                if term_prefix_len > query_prefix_len
                    && term_prefix_len - candidate_len > working_bound
                {
                    continue;
                }

                if !delete_in_suggestion_prefix(&candidate, &term_chars, prefix_length) {
                    continue;
                }

                if !considered_suggestions.insert(term.clone()) {
                    continue;
                }

                verified += 1;
                let distance = bounded_distance_chars(&query_chars, &term_chars, working_bound);
                if distance > working_bound {
                    continue;
                }

                let frequency = self.store.frequency(&term).unwrap_or(0);
                collector.offer(Suggestion::new(term, distance, frequency));
            }

            if length_diff < bound && candidate_len <= prefix_length {
                if verbosity != Verbosity::All && length_diff >= collector.bound() {
                    continue;
                }

                for i in 0..candidate_len {
                    let mut deleted = candidate.clone();
                    deleted.remove(i);
                    if considered_deletes.insert(deleted.clone()) {
                        candidates.push_back(deleted);
                    }
                }
            }
        }

        trace!(
            "lookup {query:?}: {probes} buckets probed, {verified} terms verified, bound {}",
            collector.bound()
        );
        collector.finish()
    }

    /// Look up many queries in parallel.
    ///
    /// Results come back in query order. Requires a store that can be read
    /// from several threads at once.
    pub fn lookup_batch<Q>(
        &self,
        queries: &[Q],
        verbosity: Verbosity,
        max_edit_distance: Option<usize>,
    ) -> Vec<Vec<Suggestion>>
    where
        S: Sync,
        Q: AsRef<str> + Sync,
    {
        queries
            .par_iter()
            .map(|query| self.lookup(query.as_ref(), verbosity, max_edit_distance))
            .collect()
    }
}
