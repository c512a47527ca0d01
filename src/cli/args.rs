//! Command line argument parsing for the Spelldex CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::spelling::{SymSpellConfig, Verbosity};

/// Spelldex - symmetric-delete spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "spelldex")]
#[command(about = "Spelling correction over a frequency dictionary")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SpelldexArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SpelldexArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Suggest corrections for one or more words
    Lookup(LookupArgs),

    /// Load a frequency dictionary into a SQLite database
    Build(BuildArgs),

    /// Compute the bounded edit distance between two words
    Distance(DistanceArgs),
}

/// Engine options shared by commands that construct an engine
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// JSON engine configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Maximum edit distance (overrides the config file)
    #[arg(long)]
    pub max_edit_distance: Option<usize>,

    /// Prefix length (overrides the config file)
    #[arg(long)]
    pub prefix_length: Option<usize>,

    /// Count a term needs before it is indexed (overrides the config file)
    #[arg(long)]
    pub count_threshold: Option<i64>,
}

impl EngineArgs {
    /// Build the engine configuration from the file and flag overrides.
    pub fn to_config(&self) -> Result<SymSpellConfig> {
        let mut config = match &self.config {
            Some(path) => SymSpellConfig::from_json_file(path)?,
            None => SymSpellConfig::default(),
        };

        if let Some(max_edit_distance) = self.max_edit_distance {
            config.max_edit_distance = max_edit_distance;
        }
        if let Some(prefix_length) = self.prefix_length {
            config.prefix_length = prefix_length;
        }
        if let Some(count_threshold) = self.count_threshold {
            config.count_threshold = count_threshold;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Arguments for looking up words
#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    /// Words to correct
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,

    /// Frequency dictionary file ("term count" per line)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: Option<PathBuf>,

    /// SQLite database built with `spelldex build`
    #[arg(long, value_name = "DATABASE")]
    pub database: Option<PathBuf>,

    /// Which suggestions to keep
    #[arg(short, long, default_value = "closest")]
    pub mode: LookupMode,

    /// Maximum edit distance for this lookup
    #[arg(long)]
    pub max_distance: Option<usize>,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for building a database
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    /// Frequency dictionary file ("term count" per line)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: PathBuf,

    /// SQLite database to create or extend
    #[arg(long, value_name = "DATABASE")]
    pub database: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}

/// Arguments for the distance command
#[derive(Args, Debug, Clone)]
pub struct DistanceArgs {
    /// First word
    pub source: String,

    /// Second word
    pub target: String,

    /// Bound above which the exact distance is not computed
    #[arg(long, default_value = "2")]
    pub max: usize,
}

/// Lookup modes for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Only the best suggestion
    Top,
    /// All suggestions at the smallest distance
    Closest,
    /// Every suggestion within the bound
    All,
}

impl From<LookupMode> for Verbosity {
    fn from(mode: LookupMode) -> Self {
        match mode {
            LookupMode::Top => Verbosity::Top,
            LookupMode::Closest => Verbosity::Closest,
            LookupMode::All => Verbosity::All,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_command() {
        let args = SpelldexArgs::try_parse_from([
            "spelldex",
            "lookup",
            "hellp",
            "wrold",
            "--dictionary",
            "words.txt",
            "--mode",
            "top",
            "--max-distance",
            "1",
        ])
        .unwrap();

        if let Command::Lookup(lookup_args) = args.command {
            assert_eq!(lookup_args.queries, vec!["hellp", "wrold"]);
            assert_eq!(lookup_args.dictionary, Some(PathBuf::from("words.txt")));
            assert_eq!(lookup_args.mode, LookupMode::Top);
            assert_eq!(lookup_args.max_distance, Some(1));
            assert!(lookup_args.database.is_none());
        } else {
            panic!("Expected Lookup command");
        }
    }

    #[test]
    fn test_build_command() {
        let args = SpelldexArgs::try_parse_from([
            "spelldex",
            "build",
            "--dictionary",
            "words.txt",
            "--database",
            "words.db",
            "--prefix-length",
            "5",
        ])
        .unwrap();

        if let Command::Build(build_args) = args.command {
            assert_eq!(build_args.dictionary, PathBuf::from("words.txt"));
            assert_eq!(build_args.database, PathBuf::from("words.db"));
            assert_eq!(build_args.engine.prefix_length, Some(5));
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_lookup_requires_query() {
        assert!(SpelldexArgs::try_parse_from(["spelldex", "lookup"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SpelldexArgs::try_parse_from(["spelldex", "distance", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SpelldexArgs::try_parse_from(["spelldex", "-vv", "distance", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args =
            SpelldexArgs::try_parse_from(["spelldex", "--quiet", "distance", "a", "b"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            SpelldexArgs::try_parse_from(["spelldex", "--format", "json", "distance", "a", "b"])
                .unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_engine_args_overrides() {
        let engine = EngineArgs {
            max_edit_distance: Some(1),
            count_threshold: Some(5),
            ..Default::default()
        };

        let config = engine.to_config().unwrap();
        assert_eq!(config.max_edit_distance, 1);
        assert_eq!(config.prefix_length, 7);
        assert_eq!(config.count_threshold, 5);

        let invalid = EngineArgs {
            prefix_length: Some(0),
            ..Default::default()
        };
        assert!(invalid.to_config().is_err());
    }

    #[test]
    fn test_lookup_mode_conversion() {
        assert_eq!(Verbosity::from(LookupMode::Top), Verbosity::Top);
        assert_eq!(Verbosity::from(LookupMode::Closest), Verbosity::Closest);
        assert_eq!(Verbosity::from(LookupMode::All), Verbosity::All);
    }
}
