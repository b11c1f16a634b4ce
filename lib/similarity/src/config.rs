//! Index build configuration
//!
//! Controls vocabulary caps of the two text encoders, the stop-word set and
//! how malformed catalog rows are handled. Deserializable from JSON with
//! defaults for every absent field.

use crate::stopwords::StopWords;
use reelsim_core::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SYNOPSIS_TERMS: usize = 5000;
pub const DEFAULT_MAX_KEYWORD_TERMS: usize = 3000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    /// Vocabulary cap of the synopsis text encoder
    #[serde(default = "default_max_synopsis_terms")]
    pub max_synopsis_terms: usize,

    /// Vocabulary cap of the keyword text encoder
    #[serde(default = "default_max_keyword_terms")]
    pub max_keyword_terms: usize,

    #[serde(default)]
    pub stop_words: StopWordsConfig,

    /// Abort the whole build on the first malformed item instead of
    /// excluding it
    #[serde(default)]
    pub strict: bool,
}

fn default_max_synopsis_terms() -> usize {
    DEFAULT_MAX_SYNOPSIS_TERMS
}

fn default_max_keyword_terms() -> usize {
    DEFAULT_MAX_KEYWORD_TERMS
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_synopsis_terms: DEFAULT_MAX_SYNOPSIS_TERMS,
            max_keyword_terms: DEFAULT_MAX_KEYWORD_TERMS,
            stop_words: StopWordsConfig::default(),
            strict: false,
        }
    }
}

impl IndexConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: IndexConfig =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let StopWordsConfig::Custom(words) = &self.stop_words {
            if words.iter().any(|w| w.trim().is_empty()) {
                return Err(Error::InvalidConfig(
                    "stop_words must not contain blank entries".to_string(),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_max_synopsis_terms(mut self, max_terms: usize) -> Self {
        self.max_synopsis_terms = max_terms;
        self
    }

    #[must_use]
    pub fn with_max_keyword_terms(mut self, max_terms: usize) -> Self {
        self.max_keyword_terms = max_terms;
        self
    }

    #[must_use]
    pub fn with_stop_words(mut self, stop_words: StopWordsConfig) -> Self {
        self.stop_words = stop_words;
        self
    }

    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Either a named preset (`"english"`, `"none"`) or an explicit word list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StopWordsConfig {
    Preset(StopWordsPreset),
    Custom(Vec<String>),
}

impl Default for StopWordsConfig {
    fn default() -> Self {
        StopWordsConfig::Preset(StopWordsPreset::English)
    }
}

impl StopWordsConfig {
    pub fn resolve(&self) -> StopWords {
        match self {
            StopWordsConfig::Preset(StopWordsPreset::English) => StopWords::english(),
            StopWordsConfig::Preset(StopWordsPreset::None) => StopWords::none(),
            StopWordsConfig::Custom(words) => StopWords::new(words),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StopWordsPreset {
    English,
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = IndexConfig::from_json("{}").unwrap();
        assert_eq!(config, IndexConfig::default());
        assert_eq!(config.max_synopsis_terms, 5000);
        assert_eq!(config.max_keyword_terms, 3000);
        assert!(!config.strict);
        assert!(config.stop_words.resolve().contains("the"));
    }

    #[test]
    fn test_presets_and_custom_lists() {
        let none = IndexConfig::from_json(r#"{"stop_words": "none"}"#).unwrap();
        assert!(none.stop_words.resolve().is_empty());

        let custom = IndexConfig::from_json(r#"{"stop_words": ["Hero"], "strict": true}"#).unwrap();
        assert!(custom.strict);
        assert!(custom.stop_words.resolve().contains("hero"));
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            IndexConfig::from_json(r#"{"max_synopsis_term": 10}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            IndexConfig::from_json(r#"{"stop_words": "french"}"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            IndexConfig::from_json(r#"{"stop_words": ["ok", " "]}"#),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = IndexConfig::default()
            .with_max_synopsis_terms(10)
            .with_stop_words(StopWordsConfig::Custom(vec!["a".to_string()]));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(IndexConfig::from_json(&json).unwrap(), config);
    }
}
