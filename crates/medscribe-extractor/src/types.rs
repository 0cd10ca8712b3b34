//! Candidate and report types for extraction

use crate::patterns::EntityKind;
use medscribe_domain::ExtractionResult;

/// A raw match produced by an entity extractor
///
/// Transient: candidates only live for the duration of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCandidate {
    /// Kind of entity matched
    pub kind: EntityKind,

    /// The full matched span
    pub span: String,

    /// The captured sub-value, when the rule keeps a capture group
    pub value: Option<String>,

    /// Byte offset of the kept value in the source text
    pub offset: usize,
}

impl EntityCandidate {
    /// The text kept for this candidate: the sub-value if present, else the span
    pub fn value_text(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.span)
    }
}

/// Result of an aggregation run, with diagnostics
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// The structured entities
    pub result: ExtractionResult,

    /// Kinds that failed and contributed nothing
    pub failures: Vec<ExtractionFailure>,

    /// Metadata about the run
    pub metadata: ExtractionMetadata,
}

impl ExtractionReport {
    /// Whether every extractor ran without failing
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A kind whose extractor failed during aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionFailure {
    /// The kind that produced no output
    pub kind: EntityKind,

    /// Reason for failure
    pub reason: String,
}

/// Metadata about an aggregation run
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Length of the input text (bytes)
    pub text_length: usize,

    /// Whether the input was cut to the configured maximum length
    pub truncated: bool,

    /// Raw candidates produced before normalization
    pub candidates_considered: usize,

    /// Timestamp when extraction occurred (seconds since Unix epoch)
    pub timestamp: u64,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_text_prefers_capture() {
        let candidate = EntityCandidate {
            kind: EntityKind::Diagnosis,
            span: "Diagnosis: Migraine".to_string(),
            value: Some("Migraine".to_string()),
            offset: 11,
        };
        assert_eq!(candidate.value_text(), "Migraine");
    }

    #[test]
    fn test_value_text_falls_back_to_span() {
        let candidate = EntityCandidate {
            kind: EntityKind::Date,
            span: "15/03/2024".to_string(),
            value: None,
            offset: 0,
        };
        assert_eq!(candidate.value_text(), "15/03/2024");
    }
}
