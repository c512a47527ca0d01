//! Suggestion values and the verbosity-dependent ranking policy.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpelldexError;

/// How many suggestions a lookup keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// The single best suggestion: smallest distance, then highest frequency.
    Top,
    /// Every suggestion tied at the smallest distance found.
    #[default]
    Closest,
    /// Every suggestion within the distance bound.
    All,
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Top => write!(f, "top"),
            Verbosity::Closest => write!(f, "closest"),
            Verbosity::All => write!(f, "all"),
        }
    }
}

impl FromStr for Verbosity {
    type Err = SpelldexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(Verbosity::Top),
            "closest" => Ok(Verbosity::Closest),
            "all" => Ok(Verbosity::All),
            other => Err(SpelldexError::other(format!("Unknown verbosity: {other}"))),
        }
    }
}

/// A spelling suggestion produced by a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested dictionary term.
    pub term: String,
    /// Edit distance from the query.
    pub distance: usize,
    /// Stored frequency of the term.
    pub frequency: i64,
}

impl Suggestion {
    /// Create a new suggestion.
    pub fn new(term: impl Into<String>, distance: usize, frequency: i64) -> Self {
        Suggestion {
            term: term.into(),
            distance,
            frequency,
        }
    }
}

impl Ord for Suggestion {
    /// Ranking order: closer first, then more frequent, then by term.
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| other.frequency.cmp(&self.frequency))
            .then_with(|| self.term.cmp(&other.term))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (distance {}, frequency {})", self.term, self.distance, self.frequency)
    }
}

/// Accumulates verified candidates for one lookup.
///
/// For [`Verbosity::Top`] and [`Verbosity::Closest`] the working bound
/// tightens to the best distance seen, which the lookup uses to prune the
/// rest of its search. [`Verbosity::All`] keeps the original bound.
#[derive(Debug)]
pub struct SuggestionCollector {
    verbosity: Verbosity,
    bound: usize,
    suggestions: Vec<Suggestion>,
}

impl SuggestionCollector {
    /// Create a collector starting at the lookup's distance bound.
    pub fn new(verbosity: Verbosity, bound: usize) -> Self {
        SuggestionCollector {
            verbosity,
            bound,
            suggestions: Vec::new(),
        }
    }

    /// The current working bound.
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Offer a candidate whose distance is already verified to be within the
    /// working bound.
    pub fn offer(&mut self, suggestion: Suggestion) {
        match self.verbosity {
            Verbosity::Top => {
                // Ties on distance and frequency go to the smaller term so the
                // winner does not depend on bucket order.
                let replaces = match self.suggestions.first() {
                    None => true,
                    Some(best) => suggestion < *best,
                };
                if replaces {
                    self.bound = suggestion.distance;
                    self.suggestions.clear();
                    self.suggestions.push(suggestion);
                }
            }
            Verbosity::Closest => match suggestion.distance.cmp(&self.bound) {
                Ordering::Less => {
                    self.bound = suggestion.distance;
                    self.suggestions.clear();
                    self.suggestions.push(suggestion);
                }
                Ordering::Equal => self.suggestions.push(suggestion),
                Ordering::Greater => {}
            },
            Verbosity::All => self.suggestions.push(suggestion),
        }
    }

    /// Sort the kept suggestions and apply the final distance filter.
    pub fn finish(mut self) -> Vec<Suggestion> {
        self.suggestions.sort();

        if self.verbosity == Verbosity::Closest
            && let Some(min_distance) = self.suggestions.first().map(|s| s.distance)
        {
            self.suggestions.retain(|s| s.distance == min_distance);
        }

        self.suggestions
    }
}
