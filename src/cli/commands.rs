//! Command implementations for the Spelldex CLI.

use std::path::Path;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, SpelldexError};
use crate::spelling::distance::distance_within;
use crate::spelling::{DictionaryFormat, LoadReport, SymSpell, Verbosity};
use crate::storage::{SpellStore, SqliteStore};

/// Execute a CLI command.
pub fn execute_command(args: SpelldexArgs) -> Result<()> {
    match &args.command {
        Command::Lookup(lookup_args) => lookup_words(lookup_args, &args),
        Command::Build(build_args) => build_database(build_args, &args),
        Command::Distance(distance_args) => compute_distance(distance_args, &args),
    }
}

/// Suggest corrections for every query word.
fn lookup_words(args: &LookupArgs, cli_args: &SpelldexArgs) -> Result<()> {
    let config = args.engine.to_config()?;
    let verbosity = Verbosity::from(args.mode);

    let results = match &args.database {
        Some(database) => {
            let mut spell = SymSpell::with_store(SqliteStore::open(database)?, config)?;
            if let Some(dictionary) = &args.dictionary {
                load_in_transaction(&mut spell, dictionary)?;
            }
            run_lookups(&spell, &args.queries, verbosity, args.max_distance)
        }
        None => {
            let dictionary = args.dictionary.as_ref().ok_or_else(|| {
                SpelldexError::other("Either --dictionary or --database is required")
            })?;
            let mut spell = SymSpell::new(config)?;
            let report = spell.load_dictionary_file(dictionary, &DictionaryFormat::default())?;
            info!(
                "loaded {} terms into {} delete buckets from {}",
                spell.store().term_count(),
                spell.store().delete_bucket_count(),
                dictionary.display()
            );
            debug!("{} of {} lines admitted a new term", report.admitted, report.lines);
            run_lookups(&spell, &args.queries, verbosity, args.max_distance)
        }
    };

    output_lookup_results(&results, cli_args)
}

/// Load a dictionary file into a SQLite database.
fn build_database(args: &BuildArgs, cli_args: &SpelldexArgs) -> Result<()> {
    let config = args.engine.to_config()?;
    let start = Instant::now();

    let mut spell = SymSpell::with_store(SqliteStore::open(&args.database)?, config)?;
    let report = load_in_transaction(&mut spell, &args.dictionary)?;
    if spell.pending_count() > 0 {
        info!(
            "{} terms stayed below the count threshold and were not stored",
            spell.pending_count()
        );
    }

    output_build_result(
        &BuildResult {
            database: args.database.to_string_lossy().to_string(),
            report,
            duration_ms: start.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Print the bounded distance between two words.
fn compute_distance(args: &DistanceArgs, cli_args: &SpelldexArgs) -> Result<()> {
    let distance = distance_within(&args.source, &args.target, args.max);

    output_distance_result(
        &DistanceResult {
            source: args.source.clone(),
            target: args.target.clone(),
            max: args.max,
            distance,
        },
        cli_args,
    )
}

/// Bulk-load a dictionary inside one transaction, rolling back on failure.
fn load_in_transaction(spell: &mut SymSpell<SqliteStore>, dictionary: &Path) -> Result<LoadReport> {
    spell.store_mut().begin_transaction()?;

    match spell.load_dictionary_file(dictionary, &DictionaryFormat::default()) {
        Ok(report) => {
            spell.store_mut().commit_transaction()?;
            debug!("committed {} admitted terms", report.admitted);
            Ok(report)
        }
        Err(e) => {
            spell.store_mut().rollback_transaction()?;
            Err(e)
        }
    }
}

fn run_lookups<S: SpellStore>(
    spell: &SymSpell<S>,
    queries: &[String],
    verbosity: Verbosity,
    max_distance: Option<usize>,
) -> Vec<LookupResult> {
    queries
        .iter()
        .map(|query| LookupResult {
            query: query.clone(),
            suggestions: spell.lookup(query, verbosity, max_distance),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use clap::Parser;

    use super::*;

    fn dictionary_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hello 1000").unwrap();
        writeln!(file, "world 500").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_build_then_lookup_database() {
        let dictionary = dictionary_file();
        let dir = tempfile::tempdir().unwrap();
        let database = dir.path().join("words.db");
        let dictionary_path = dictionary.path().to_string_lossy().to_string();
        let database_path = database.to_string_lossy().to_string();

        let args = SpelldexArgs::try_parse_from([
            "spelldex",
            "--quiet",
            "build",
            "--dictionary",
            dictionary_path.as_str(),
            "--database",
            database_path.as_str(),
        ])
        .unwrap();
        execute_command(args).unwrap();

        let spell =
            SymSpell::with_store(SqliteStore::open(&database).unwrap(), Default::default())
                .unwrap();
        assert_eq!(spell.max_term_length(), 5);
        let suggestions = spell.lookup("wrold", Verbosity::Top, None);
        assert_eq!(suggestions[0].term, "world");
    }

    #[test]
    fn test_lookup_requires_a_source() {
        let args = SpelldexArgs::try_parse_from(["spelldex", "lookup", "hellp"]).unwrap();

        assert!(execute_command(args).is_err());
    }

    #[test]
    fn test_run_lookups() {
        let mut spell = SymSpell::new(Default::default()).unwrap();
        spell.ingest("hello", 10);

        let results = run_lookups(
            &spell,
            &["hellp".to_string(), "zzz".to_string()],
            Verbosity::Closest,
            None,
        );
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].suggestions[0].term, "hello");
        assert!(results[1].suggestions.is_empty());
    }
}
