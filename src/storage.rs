//! Storage abstraction layer for Spelldex.
//!
//! The engine reads and writes terms only through the [`SpellStore`] trait,
//! so backends can be swapped without touching matching logic.
//!
//! # Backends
//!
//! ## MemoryStore
//! - Hash-map backed reference implementation
//! - `set_frequency` overwrites
//! - Safe for concurrent lookups
//!
//! ## SqliteStore (feature `sqlite`)
//! - Persistent, relational schema
//! - `set_frequency` accumulates at the storage layer
//! - Explicit begin/commit/rollback for bulk loads
//!
//! # Example
//!
//! ```
//! use spelldex::spelling::{SymSpell, SymSpellConfig, Verbosity};
//! use spelldex::storage::MemoryStore;
//!
//! # fn main() -> spelldex::error::Result<()> {
//! let mut spell = SymSpell::with_store(MemoryStore::new(), SymSpellConfig::default())?;
//! spell.ingest("hello", 10);
//!
//! let suggestions = spell.lookup("helo", Verbosity::Closest, None);
//! assert_eq!(suggestions[0].term, "hello");
//! # Ok(())
//! # }
//! ```

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
pub use traits::SpellStore;
