//! # Spelldex
//!
//! Approximate string matching over a frequency dictionary using the
//! symmetric-delete algorithm.
//!
//! Dictionary terms are indexed by the deletion variants of their prefix, so a
//! lookup only compares the query against terms sharing a variant with it.
//! Candidates are verified with a bounded Damerau-Levenshtein (optimal string
//! alignment) distance.
//!
//! ## Features
//!
//! - Top, Closest and All lookup modes
//! - Count threshold with pending terms promoted once they accumulate enough
//! - Pluggable storage: an in-memory map and a SQLite backend (`sqlite` feature)
//! - Parallel batch lookups
//!
//! ```
//! use spelldex::spelling::{SymSpell, SymSpellConfig, Verbosity};
//!
//! let mut spell = SymSpell::new(SymSpellConfig::default()).unwrap();
//! spell.ingest("hello", 1000);
//! spell.ingest("help", 500);
//!
//! let suggestions = spell.lookup("hellp", Verbosity::Closest, None);
//! assert_eq!(suggestions[0].term, "hello");
//! ```

#[cfg(feature = "sqlite")]
pub mod cli;
pub mod error;
pub mod spelling;
pub mod storage;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
