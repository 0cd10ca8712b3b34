//! Configuration for the Extractor

use crate::error::ExtractorError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Compiled-size ceiling used for the shared builtin pattern cache (1 MiB)
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (bytes); longer input is truncated, not rejected
    pub max_text_length: usize,

    /// Maximum entries kept per list-valued entity kind after deduplication
    pub max_entries_per_kind: usize,

    /// Compiled size limit for a single pattern (bytes)
    ///
    /// Patterns that blow past this are treated as malformed for their kind.
    pub regex_size_limit: usize,
}

impl ExtractorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.max_entries_per_kind == 0 {
            return Err("max_entries_per_kind must be greater than 0".to_string());
        }
        if self.regex_size_limit < 1024 {
            return Err("regex_size_limit must be at least 1024 bytes".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// Default configuration with balanced settings
    fn default() -> Self {
        Self {
            max_text_length: 50_000,
            max_entries_per_kind: 100,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: short documents, few entries per kind
    pub fn strict() -> Self {
        Self {
            max_text_length: 20_000,
            max_entries_per_kind: 25,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }

    /// Lenient preset: long multi-page transcriptions
    pub fn lenient() -> Self {
        Self {
            max_text_length: 200_000,
            max_entries_per_kind: 500,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExtractorError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents).map_err(ExtractorError::Config)?;
        config.validate().map_err(ExtractorError::Config)?;
        Ok(config)
    }
}
