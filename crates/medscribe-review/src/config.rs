//! Review configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for intake and the review gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Maximum time to wait for the OCR provider (seconds)
    pub transcription_timeout_secs: u64,

    /// Allow committing a confirmed result that contains no entities
    pub allow_empty_commit: bool,

    /// Require a non-blank reviewer name on confirmation
    pub require_reviewer: bool,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            transcription_timeout_secs: 120,
            allow_empty_commit: false,
            require_reviewer: true,
        }
    }
}

impl ReviewConfig {
    /// Create a permissive configuration (empty commits, anonymous reviewers)
    pub fn permissive() -> Self {
        Self {
            transcription_timeout_secs: 300,
            allow_empty_commit: true,
            require_reviewer: false,
        }
    }

    /// Get the transcription timeout as a Duration
    pub fn transcription_timeout(&self) -> Duration {
        Duration::from_secs(self.transcription_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.transcription_timeout_secs == 0 {
            return Err("transcription_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReviewConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.allow_empty_commit);
        assert!(config.require_reviewer);
    }

    #[test]
    fn test_permissive_config() {
        let config = ReviewConfig::permissive();
        assert!(config.allow_empty_commit);
        assert!(!config.require_reviewer);
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = ReviewConfig::default();
        config.transcription_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config: ReviewConfig = toml::from_str("allow_empty_commit = true").unwrap();
        assert!(config.allow_empty_commit);
        assert_eq!(config.transcription_timeout_secs, 120);
    }
}
