//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SpelldexArgs};
use crate::error::Result;
use crate::spelling::{LoadReport, Suggestion};

/// Suggestions for a single query.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResult {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

/// Result structure for the build command.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub database: String,
    pub report: LoadReport,
    pub duration_ms: u64,
}

/// Result structure for the distance command.
#[derive(Debug, Serialize, Deserialize)]
pub struct DistanceResult {
    pub source: String,
    pub target: String,
    pub max: usize,
    /// `None` when the distance exceeds `max`.
    pub distance: Option<usize>,
}

/// Print lookup results.
pub fn output_lookup_results(results: &[LookupResult], args: &SpelldexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(results),
        OutputFormat::Human => {
            for result in results {
                if result.suggestions.is_empty() {
                    println!("{}: no suggestions", result.query);
                    continue;
                }
                println!("{}:", result.query);
                for suggestion in &result.suggestions {
                    println!(
                        "  {:<24} distance={} frequency={}",
                        suggestion.term, suggestion.distance, suggestion.frequency
                    );
                }
            }
            Ok(())
        }
    }
}

/// Print the outcome of a build.
pub fn output_build_result(result: &BuildResult, args: &SpelldexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                println!("Dictionary loaded into {}", result.database);
            }
            println!("Lines read:     {}", result.report.lines);
            println!("Terms admitted: {}", result.report.admitted);
            println!("Lines skipped:  {}", result.report.skipped);
            println!("Duration:       {} ms", result.duration_ms);
            Ok(())
        }
    }
}

/// Print a distance result.
pub fn output_distance_result(result: &DistanceResult, args: &SpelldexArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => print_json(result),
        OutputFormat::Human => {
            match result.distance {
                Some(distance) => println!("{distance}"),
                None => println!("> {}", result.max),
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
