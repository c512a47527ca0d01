//! Spelling correction for Spelldex.
//!
//! This module holds the symmetric-delete engine: deletion-variant indexing,
//! the bounded edit-distance oracle, verbosity-based ranking and dictionary
//! loading. Storage is injected through [`crate::storage::SpellStore`].

pub mod config;
pub mod deletes;
pub mod dictionary;
pub mod distance;
pub mod suggest;
pub mod symspell;

pub use config::SymSpellConfig;
pub use dictionary::{DictionaryFormat, LoadReport};
pub use suggest::{Suggestion, Verbosity};
pub use symspell::SymSpell;
