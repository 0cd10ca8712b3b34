//! Error types for the Extractor

use crate::patterns::EntityKind;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Pattern errors never reach callers of the aggregator: they are isolated per
/// entity kind and reported as failures alongside the result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// A recognition rule could not be compiled
    #[error("Invalid {kind} pattern '{pattern}': {message}")]
    Pattern {
        /// Entity kind the rule belongs to
        kind: EntityKind,
        /// The offending pattern source
        pattern: String,
        /// Compiler message
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while loading configuration
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExtractorError {
    fn from(e: std::io::Error) -> Self {
        ExtractorError::Io(e.to_string())
    }
}
