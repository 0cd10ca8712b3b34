//! Configuration management for the CLI.

use crate::cli::CliFormat;
use crate::error::{CliError, Result};
use medscribe_extractor::ExtractorConfig;
use medscribe_review::ReviewConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Intake and review settings
    #[serde(default)]
    pub review: ReviewConfig,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tables and coloured messages
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => OutputFormat::Text,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".medscribe").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one, the default path is read if
    /// present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate the nested extractor and review settings.
    pub fn validate(&self) -> Result<()> {
        self.extractor
            .validate()
            .map_err(|e| CliError::Config(format!("[extractor] {}", e)))?;
        self.review
            .validate()
            .map_err(|e| CliError::Config(format!("[review] {}", e)))?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Text,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[extractor]\nmax_entries_per_kind = 5\n\n[review]\nallow_empty_commit = true\n\n[settings]\nformat = \"json\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.extractor.max_entries_per_kind, 5);
        assert_eq!(config.extractor.max_text_length, ExtractorConfig::default().max_text_length);
        assert!(config.review.allow_empty_commit);
        assert_eq!(config.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[review]\ntranscription_timeout_secs = 0").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config(ref m)) if m.starts_with("[review]")));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[extractor\nmax_entries_per_kind = ").unwrap();
        assert!(matches!(Config::load(Some(file.path())), Err(CliError::Toml(_))));
    }
}
