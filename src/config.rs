//! Runtime configuration for the `versecard` binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::formatter::DEFAULT_MAX_LENGTH;

/// Settings read from a JSON file; command-line flags override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum line length in characters
    pub max_length: usize,
    /// Skip the semantic pipeline and wrap by length only
    pub fallback: bool,
    /// Emit `<br>` instead of newlines
    pub html: bool,
    /// JSON array of `{content, reference}` verses
    pub verses_path: Option<PathBuf>,
    /// Where the shuffle order and cursor are kept
    pub state_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_length: DEFAULT_MAX_LENGTH,
            fallback: false,
            html: false,
            verses_path: None,
            state_path: None,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(Error::Config("max_length must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.max_length, 15);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json(r#"{"max_length": 25, "html": true}"#).unwrap();
        assert_eq!(config.max_length, 25);
        assert!(config.html);
        assert!(!config.fallback);
    }

    #[test]
    fn test_rejects_zero_length() {
        assert!(matches!(
            Config::from_json(r#"{"max_length": 0}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Config::from_json("{"), Err(Error::Json(_))));
    }
}
