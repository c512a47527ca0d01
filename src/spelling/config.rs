//! Configuration for the symmetric-delete spelling engine.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpelldexError};

/// Engine configuration, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymSpellConfig {
    /// Maximum edit distance considered a match. Also bounds how many
    /// characters are deleted when indexing a term.
    pub max_edit_distance: usize,

    /// Number of leading characters used to generate and match deletion
    /// variants.
    pub prefix_length: usize,

    /// Accumulated count a term needs before it is indexed.
    pub count_threshold: i64,
}

impl Default for SymSpellConfig {
    fn default() -> Self {
        SymSpellConfig {
            max_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
        }
    }
}

impl SymSpellConfig {
    /// Create a configuration with the given distance and prefix length.
    pub fn new(max_edit_distance: usize, prefix_length: usize) -> Self {
        SymSpellConfig {
            max_edit_distance,
            prefix_length,
            ..Default::default()
        }
    }

    /// Set the maximum edit distance.
    pub fn with_max_edit_distance(mut self, max_edit_distance: usize) -> Self {
        self.max_edit_distance = max_edit_distance;
        self
    }

    /// Set the prefix length.
    pub fn with_prefix_length(mut self, prefix_length: usize) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    /// Set the count threshold.
    pub fn with_count_threshold(mut self, count_threshold: i64) -> Self {
        self.count_threshold = count_threshold;
        self
    }

    /// Check that the configuration can drive an engine.
    pub fn validate(&self) -> Result<()> {
        if self.prefix_length < 1 {
            return Err(SpelldexError::invalid_config(
                "prefix_length must be at least 1",
            ));
        }
        if self.prefix_length <= self.max_edit_distance {
            return Err(SpelldexError::invalid_config(format!(
                "prefix_length ({}) must be greater than max_edit_distance ({})",
                self.prefix_length, self.max_edit_distance
            )));
        }
        if self.count_threshold < 0 {
            return Err(SpelldexError::invalid_config(
                "count_threshold must not be negative",
            ));
        }
        Ok(())
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SymSpellConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SymSpellConfig::default();

        assert_eq!(config.max_edit_distance, 2);
        assert_eq!(config.prefix_length, 7);
        assert_eq!(config.count_threshold, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = SymSpellConfig::new(1, 5).with_count_threshold(10);

        assert_eq!(config.max_edit_distance, 1);
        assert_eq!(config.prefix_length, 5);
        assert_eq!(config.count_threshold, 10);

        let config = config.with_max_edit_distance(3).with_prefix_length(9);
        assert_eq!(config.max_edit_distance, 3);
        assert_eq!(config.prefix_length, 9);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(SymSpellConfig::new(0, 0).validate().is_err());
        assert!(SymSpellConfig::new(2, 2).validate().is_err());
        assert!(
            SymSpellConfig::default()
                .with_count_threshold(-1)
                .validate()
                .is_err()
        );
        assert!(SymSpellConfig::new(0, 1).validate().is_ok());
    }

    #[test]
    fn test_from_json_str_uses_defaults() {
        let config = SymSpellConfig::from_json_str(r#"{"max_edit_distance": 1}"#).unwrap();

        assert_eq!(config.max_edit_distance, 1);
        assert_eq!(config.prefix_length, 7);
        assert_eq!(config.count_threshold, 1);
    }

    #[test]
    fn test_from_json_str_validates() {
        let result = SymSpellConfig::from_json_str(r#"{"prefix_length": 1}"#);
        assert!(matches!(result, Err(SpelldexError::InvalidConfig(_))));

        let result = SymSpellConfig::from_json_str("not json");
        assert!(matches!(result, Err(SpelldexError::Json(_))));
    }
}
