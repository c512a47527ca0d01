//! SQLite-backed storage for persistent spelling dictionaries.
//!
//! Terms live in `symspell_terms`, the inverted delete index in
//! `symspell_deletes`. All statements are prepared once when the store is
//! constructed and reused through the connection's statement cache.
//!
//! # Frequency semantics
//!
//! Unlike [`MemoryStore`](crate::storage::memory::MemoryStore),
//! `set_frequency` here *accumulates*: it upserts with
//! `frequency = frequency + excluded.frequency`, saturating at `i64::MAX`. The engine already adds
//! incoming counts to the stored value before writing, so a frequency update
//! on an indexed term is counted twice by this backend. Suggestion sets
//! (term and distance) are identical across backends; frequencies are not.
//!
//! # Failures
//!
//! Opening, schema setup, statement preparation and transaction control
//! return errors. Failures inside the [`SpellStore`] methods cannot be
//! reported through the trait; they are logged with `log::warn!` and the call
//! degrades to "no effect" (empty result, `None`, `false`).

use std::path::Path;

use log::{debug, warn};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::{Result, SpelldexError};
use crate::storage::traits::SpellStore;

const CREATE_TERMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS symspell_terms (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        term TEXT UNIQUE NOT NULL,
        frequency INTEGER DEFAULT 1
    )";

const CREATE_DELETES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS symspell_deletes (
        delete_hash INTEGER NOT NULL,
        term_id INTEGER NOT NULL,
        FOREIGN KEY (term_id) REFERENCES symspell_terms(id) ON DELETE CASCADE,
        PRIMARY KEY (delete_hash, term_id)
    ) WITHOUT ROWID";

const CREATE_TERMS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_symspell_terms_term ON symspell_terms(term)";

const CREATE_DELETES_HASH_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_symspell_deletes_hash ON symspell_deletes(delete_hash)";

const UPSERT_TERM: &str = "
    INSERT INTO symspell_terms (term, frequency) VALUES (?1, ?2)
    ON CONFLICT(term) DO UPDATE SET frequency = CASE
        WHEN excluded.frequency > 9223372036854775807 - frequency THEN 9223372036854775807
        ELSE frequency + excluded.frequency
    END";

const ADD_DELETE: &str = "
    INSERT OR IGNORE INTO symspell_deletes (delete_hash, term_id)
    VALUES (?1, (SELECT id FROM symspell_terms WHERE term = ?2))";

const GET_TERMS: &str = "
    SELECT t.term FROM symspell_terms t
    INNER JOIN symspell_deletes d ON t.id = d.term_id
    WHERE d.delete_hash = ?1";

const GET_FREQUENCY: &str = "SELECT frequency FROM symspell_terms WHERE term = ?1";

const TERM_EXISTS: &str = "SELECT 1 FROM symspell_terms WHERE term = ?1 LIMIT 1";

const LONGEST_TERM: &str = "SELECT MAX(LENGTH(term)) FROM symspell_terms";

const STATEMENTS: [&str; 6] = [
    UPSERT_TERM,
    ADD_DELETE,
    GET_TERMS,
    GET_FREQUENCY,
    TERM_EXISTS,
    LONGEST_TERM,
];

/// A [`SpellStore`] over a single SQLite connection.
///
/// The connection is not shared between threads. Wrap the store in a
/// `parking_lot::Mutex` to serve concurrent lookups.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    in_transaction: bool,
}

impl SqliteStore {
    /// Open (or create) a database file and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        Self::initialize_schema(&conn)?;
        debug!("opened spelling database at {}", path.as_ref().display());
        Self::from_connection(conn)
    }

    /// Create a store over a fresh in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Self::from_connection(conn)
    }

    /// Wrap an existing connection whose schema is already initialized.
    ///
    /// Fails if any of the store's statements cannot be prepared, which is
    /// the case when the schema is missing.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.set_prepared_statement_cache_capacity(STATEMENTS.len().max(16));
        for sql in STATEMENTS {
            conn.prepare_cached(sql).map_err(|e| {
                SpelldexError::storage(format!("Failed to prepare statement: {e}"))
            })?;
        }

        Ok(SqliteStore {
            conn,
            in_transaction: false,
        })
    }

    /// Create the tables and indexes used by the store.
    ///
    /// Missing tables are fatal. Index creation failures are only logged,
    /// since the store still works without them.
    pub fn initialize_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch("PRAGMA foreign_keys = ON")?;

        conn.execute_batch(CREATE_TERMS_TABLE)
            .map_err(|e| SpelldexError::storage(format!("Failed to create terms table: {e}")))?;
        conn.execute_batch(CREATE_DELETES_TABLE).map_err(|e| {
            SpelldexError::storage(format!("Failed to create deletes table: {e}"))
        })?;

        if let Err(e) = conn.execute_batch(CREATE_TERMS_INDEX) {
            warn!("Failed to create terms index: {e}");
        }
        if let Err(e) = conn.execute_batch(CREATE_DELETES_HASH_INDEX) {
            warn!("Failed to create deletes hash index: {e}");
        }

        Ok(())
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Whether a transaction opened by [`begin_transaction`](Self::begin_transaction)
    /// is still open.
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    /// Begin a transaction. Transactions do not nest.
    pub fn begin_transaction(&mut self) -> Result<()> {
        if self.in_transaction {
            return Err(SpelldexError::storage("A transaction is already open"));
        }

        self.conn
            .execute_batch("BEGIN TRANSACTION")
            .map_err(|e| SpelldexError::storage(format!("Failed to begin transaction: {e}")))?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the open transaction. No-op when none is open.
    ///
    /// A failed commit is rolled back before the error is returned.
    pub fn commit_transaction(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }

        self.in_transaction = false;
        if let Err(e) = self.conn.execute_batch("COMMIT") {
            if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                warn!("Rollback after failed commit also failed: {rollback}");
            }
            return Err(SpelldexError::storage(format!(
                "Failed to commit transaction: {e}"
            )));
        }
        Ok(())
    }

    /// Discard every write since the transaction began. No-op when none is open.
    pub fn rollback_transaction(&mut self) -> Result<()> {
        if !self.in_transaction {
            return Ok(());
        }

        self.in_transaction = false;
        self.conn
            .execute_batch("ROLLBACK")
            .map_err(|e| SpelldexError::storage(format!("Failed to roll back transaction: {e}")))
    }

    fn try_add_delete(&self, hash: u32, term: &str) -> rusqlite::Result<()> {
        let mut stmt = self.conn.prepare_cached(ADD_DELETE)?;
        // Hashes are stored as signed 32-bit integers.
        stmt.execute(params![hash as i32, term])?;
        Ok(())
    }

    fn try_terms(&self, hash: u32) -> rusqlite::Result<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(GET_TERMS)?;
        let rows = stmt.query_map(params![hash as i32], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    fn try_set_frequency(&self, term: &str, frequency: i64) -> rusqlite::Result<()> {
        let mut stmt = self.conn.prepare_cached(UPSERT_TERM)?;
        stmt.execute(params![term, frequency])?;
        Ok(())
    }

    fn try_frequency(&self, term: &str) -> rusqlite::Result<Option<i64>> {
        let mut stmt = self.conn.prepare_cached(GET_FREQUENCY)?;
        stmt.query_row(params![term], |row| row.get::<_, i64>(0))
            .optional()
    }

    fn try_term_exists(&self, term: &str) -> rusqlite::Result<bool> {
        let mut stmt = self.conn.prepare_cached(TERM_EXISTS)?;
        stmt.exists(params![term])
    }

    fn try_longest_term_length(&self) -> rusqlite::Result<Option<i64>> {
        let mut stmt = self.conn.prepare_cached(LONGEST_TERM)?;
        stmt.query_row([], |row| row.get::<_, Option<i64>>(0))
    }
}

fn degrade<T>(operation: &str, result: rusqlite::Result<T>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("SQLite {operation} failed: {e}");
            fallback
        }
    }
}

impl SpellStore for SqliteStore {
    fn add_delete(&mut self, hash: u32, term: &str) {
        degrade("add_delete", self.try_add_delete(hash, term), ())
    }

    fn terms(&self, hash: u32) -> Vec<String> {
        degrade("terms", self.try_terms(hash), Vec::new())
    }

    fn set_frequency(&mut self, term: &str, frequency: i64) {
        degrade("set_frequency", self.try_set_frequency(term, frequency), ())
    }

    fn frequency(&self, term: &str) -> Option<i64> {
        degrade("frequency", self.try_frequency(term), None)
    }

    fn term_exists(&self, term: &str) -> bool {
        degrade("term_exists", self.try_term_exists(term), false)
    }

    fn longest_term_length(&self) -> Option<usize> {
        degrade("longest_term_length", self.try_longest_term_length(), None)
            .and_then(|len| usize::try_from(len).ok())
    }
}
