//! Loading frequency dictionaries into an engine.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::symspell::SymSpell;
use crate::storage::traits::SpellStore;

/// Column layout of a frequency dictionary file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryFormat {
    /// Column holding the term.
    pub term_index: usize,
    /// Column holding the count.
    pub count_index: usize,
    /// Column separator. `None` splits on any run of whitespace.
    pub separator: Option<char>,
}

impl Default for DictionaryFormat {
    fn default() -> Self {
        DictionaryFormat {
            term_index: 0,
            count_index: 1,
            separator: None,
        }
    }
}

impl DictionaryFormat {
    /// Set the separator.
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Set the term and count columns.
    pub fn with_columns(mut self, term_index: usize, count_index: usize) -> Self {
        self.term_index = term_index;
        self.count_index = count_index;
        self
    }

    /// Extract `(term, count)` from one line, if it has both columns and a
    /// parseable count.
    fn parse_line<'a>(&self, line: &'a str) -> Option<(&'a str, i64)> {
        let columns: Vec<&str> = match self.separator {
            Some(separator) => line.split(separator).collect(),
            None => line.split_whitespace().collect(),
        };

        let term = columns.get(self.term_index)?.trim();
        let count = columns.get(self.count_index)?.trim().parse::<i64>().ok()?;
        if term.is_empty() {
            return None;
        }
        Some((term, count))
    }
}

/// Summary of a dictionary load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Non-blank lines read.
    pub lines: usize,
    /// Terms indexed for the first time during this load.
    pub admitted: usize,
    /// Lines that could not be parsed.
    pub skipped: usize,
}

impl<S: SpellStore> SymSpell<S> {
    /// Ingest every `(term, count)` row of a frequency dictionary.
    pub fn load_dictionary_reader<R: BufRead>(
        &mut self,
        reader: R,
        format: &DictionaryFormat,
    ) -> Result<LoadReport> {
        let mut report = LoadReport::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            report.lines += 1;

            match format.parse_line(&line) {
                Some((term, count)) => {
                    if self.ingest(term, count) {
                        report.admitted += 1;
                    }
                }
                None => {
                    warn!("skipping malformed dictionary line {}: {line:?}", number + 1);
                    report.skipped += 1;
                }
            }
        }

        debug!(
            "loaded {} lines, {} terms admitted, {} skipped",
            report.lines, report.admitted, report.skipped
        );
        Ok(report)
    }

    /// Ingest a frequency dictionary file.
    pub fn load_dictionary_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: &DictionaryFormat,
    ) -> Result<LoadReport> {
        let file = File::open(path)?;
        self.load_dictionary_reader(BufReader::new(file), format)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;
    use crate::spelling::config::SymSpellConfig;
    use crate::spelling::suggest::Verbosity;

    #[test]
    fn test_parse_line_whitespace() {
        let format = DictionaryFormat::default();

        assert_eq!(format.parse_line("hello 100"), Some(("hello", 100)));
        assert_eq!(format.parse_line("  world\t\t42  "), Some(("world", 42)));
        assert_eq!(format.parse_line("hello"), None);
        assert_eq!(format.parse_line("hello many"), None);
    }

    #[test]
    fn test_parse_line_custom_layout() {
        let format = DictionaryFormat::default()
            .with_separator(',')
            .with_columns(1, 0);

        assert_eq!(format.parse_line("7,new york"), Some(("new york", 7)));
        assert_eq!(format.parse_line("7,"), None);
    }

    #[test]
    fn test_load_dictionary_reader() {
        let data = "hello 1000\nworld 500\n\nbroken\nhello 50\nhelp 100\n";
        let mut spell = SymSpell::new(SymSpellConfig::default()).unwrap();

        let report = spell
            .load_dictionary_reader(Cursor::new(data), &DictionaryFormat::default())
            .unwrap();

        assert_eq!(
            report,
            LoadReport {
                lines: 5,
                admitted: 3,
                skipped: 1,
            }
        );
        assert_eq!(spell.store().frequency("hello"), Some(1050));

        let suggestions = spell.lookup("hellp", Verbosity::Top, None);
        assert_eq!(suggestions[0].term, "hello");
    }

    #[test]
    fn test_load_dictionary_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple 10").unwrap();
        writeln!(file, "apply 5").unwrap();
        file.flush().unwrap();

        let mut spell = SymSpell::new(SymSpellConfig::default()).unwrap();
        let report = spell
            .load_dictionary_file(file.path(), &DictionaryFormat::default())
            .unwrap();

        assert_eq!(report.admitted, 2);
        assert_eq!(spell.store().frequency("apply"), Some(5));
    }

    #[test]
    fn test_load_missing_file() {
        let mut spell = SymSpell::new(SymSpellConfig::default()).unwrap();
        let result =
            spell.load_dictionary_file("/nonexistent/dictionary.txt", &DictionaryFormat::default());

        assert!(result.is_err());
    }
}
