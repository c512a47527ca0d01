//! Integration tests for the SQLite storage backend.

#![cfg(feature = "sqlite")]

use std::collections::BTreeSet;
use std::io::{Cursor, Write};

use parking_lot::Mutex;
use spelldex::error::Result;
use spelldex::spelling::{DictionaryFormat, Suggestion, SymSpell, SymSpellConfig, Verbosity};
use spelldex::storage::{SpellStore, SqliteStore};

const WORDS: [(&str, i64); 8] = [
    ("hello", 1000),
    ("help", 500),
    ("hell", 200),
    ("held", 150),
    ("world", 800),
    ("word", 600),
    ("sword", 90),
    ("ünïcödé", 30),
];

fn term_distances(suggestions: &[Suggestion]) -> BTreeSet<(String, usize)> {
    suggestions
        .iter()
        .map(|s| (s.term.clone(), s.distance))
        .collect()
}

#[test]
fn test_backend_parity() -> Result<()> {
    let mut memory = SymSpell::new(SymSpellConfig::default())?;
    let mut sqlite = SymSpell::with_store(SqliteStore::open_in_memory()?, SymSpellConfig::default())?;
    for (term, count) in WORDS {
        assert_eq!(memory.ingest(term, count), sqlite.ingest(term, count));
    }

    for query in ["hellp", "wrld", "wordd", "swrd", "unicode", "ünicödé", "xyz", ""] {
        for verbosity in [Verbosity::Top, Verbosity::Closest, Verbosity::All] {
            let expected = memory.lookup(query, verbosity, None);
            let actual = sqlite.lookup(query, verbosity, None);
            assert_eq!(
                term_distances(&expected),
                term_distances(&actual),
                "{query:?} in {verbosity} mode"
            );
        }
    }

    Ok(())
}

#[test]
fn test_database_persists_across_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("dictionary.db");

    {
        let mut spell = SymSpell::with_store(SqliteStore::open(&path)?, SymSpellConfig::default())?;
        spell.store_mut().begin_transaction()?;
        for (term, count) in WORDS {
            spell.ingest(term, count);
        }
        spell.store_mut().commit_transaction()?;
    }

    let spell = SymSpell::with_store(SqliteStore::open(&path)?, SymSpellConfig::default())?;
    assert_eq!(spell.max_term_length(), 7);
    assert!(spell.store().term_exists("sword"));

    let suggestions = spell.lookup("wrold", Verbosity::Top, None);
    assert_eq!(suggestions, vec![Suggestion::new("world", 1, 800)]);

    // Longer than any stored term by more than the bound.
    assert!(spell.lookup("abcdefghijk", Verbosity::All, None).is_empty());

    Ok(())
}

#[test]
fn test_frequency_update_accumulates_twice() -> Result<()> {
    let mut spell = SymSpell::with_store(SqliteStore::open_in_memory()?, SymSpellConfig::default())?;

    assert!(spell.ingest("apple", 100));
    assert_eq!(spell.store().frequency("apple"), Some(100));

    // The engine writes 150 and the upsert adds it to the stored 100.
    assert!(!spell.ingest("apple", 50));
    assert_eq!(spell.store().frequency("apple"), Some(250));

    Ok(())
}

#[test]
fn test_frequency_update_saturates() -> Result<()> {
    let mut spell = SymSpell::with_store(SqliteStore::open_in_memory()?, SymSpellConfig::default())?;

    assert!(spell.ingest("big", i64::MAX - 1));
    assert!(!spell.ingest("big", 10));

    assert_eq!(spell.store().frequency("big"), Some(i64::MAX));
    assert_eq!(
        spell.lookup("big", Verbosity::Top, None),
        vec![Suggestion::new("big", 0, i64::MAX)]
    );
    // Still indexed, so another sighting is an update rather than an admission.
    assert!(!spell.ingest("big", 1));
    assert_eq!(spell.pending_count(), 0);

    Ok(())
}

#[test]
fn test_rollback_discards_loaded_terms() -> Result<()> {
    let mut spell = SymSpell::with_store(SqliteStore::open_in_memory()?, SymSpellConfig::default())?;
    spell.ingest("kept", 10);

    spell.store_mut().begin_transaction()?;
    let report = spell.load_dictionary_reader(
        Cursor::new("hello 1000\nworld 500\n"),
        &DictionaryFormat::default(),
    )?;
    assert_eq!(report.admitted, 2);
    assert!(spell.store().term_exists("hello"));
    spell.store_mut().rollback_transaction()?;

    assert!(!spell.store().term_exists("hello"));
    assert!(spell.lookup("hellp", Verbosity::All, None).is_empty());
    assert_eq!(
        spell.lookup("kept", Verbosity::Top, None),
        vec![Suggestion::new("kept", 0, 10)]
    );

    Ok(())
}

#[test]
fn test_load_dictionary_file_into_database() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "hello\t1000")?;
    writeln!(file, "help\t500")?;
    writeln!(file, "not-a-count\tmany")?;
    file.flush()?;

    let mut spell = SymSpell::with_store(SqliteStore::open_in_memory()?, SymSpellConfig::default())?;
    spell.store_mut().begin_transaction()?;
    let report = spell.load_dictionary_file(file.path(), &DictionaryFormat::default())?;
    spell.store_mut().commit_transaction()?;

    assert_eq!(report.lines, 3);
    assert_eq!(report.admitted, 2);
    assert_eq!(report.skipped, 1);

    let closest = spell.lookup("helo", Verbosity::Closest, None);
    let terms: Vec<&str> = closest.iter().map(|s| s.term.as_str()).collect();
    assert_eq!(terms, vec!["hello", "help"]);

    Ok(())
}

#[test]
fn test_shared_database_engine() -> Result<()> {
    let mut spell = SymSpell::with_store(
        Mutex::new(SqliteStore::open_in_memory()?),
        SymSpellConfig::default(),
    )?;
    for (term, count) in WORDS {
        spell.ingest(term, count);
    }

    let results = spell.lookup_batch(&["hellp", "wrld", "swrod"][..], Verbosity::Top, None);
    assert_eq!(results[0][0].term, "hello");
    assert_eq!(results[1][0].term, "world");
    assert_eq!(results[2][0].term, "sword");

    Ok(())
}
