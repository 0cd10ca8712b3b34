//! Entity extractors and the aggregator that runs them

use crate::compiled::CompiledLibrary;
use crate::config::{ExtractorConfig, DEFAULT_REGEX_SIZE_LIMIT};
use crate::error::ExtractorError;
use crate::normalize::{normalize, normalize_vital};
use crate::patterns::{Capture, EntityKind, PatternLibrary};
use crate::types::{EntityCandidate, ExtractionFailure, ExtractionMetadata, ExtractionReport};
use medscribe_domain::{Document, ExtractionResult};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

/// Apply every rule for `kind` to `text` and collect the raw candidates
///
/// Every non-overlapping match of every rule is returned, so the same span may
/// appear more than once. Empty or whitespace-only text yields no candidates.
pub fn extract(
    library: &CompiledLibrary,
    kind: EntityKind,
    text: &str,
) -> Result<Vec<EntityCandidate>, ExtractorError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut candidates = Vec::new();
    for compiled in library.rules_for(kind)? {
        let rule = compiled.rule();
        for captures in compiled.regex().captures_iter(text) {
            let Some(span) = captures.get(0) else {
                continue;
            };
            let candidate = match rule.capture {
                Capture::Whole => EntityCandidate {
                    kind,
                    span: span.as_str().to_string(),
                    value: None,
                    offset: span.start(),
                },
                Capture::Group(index) => {
                    let Some(value) = captures.get(index) else {
                        continue;
                    };
                    EntityCandidate {
                        kind,
                        span: span.as_str().to_string(),
                        value: Some(value.as_str().to_string()),
                        offset: value.start(),
                    }
                }
            };
            candidates.push(candidate);
        }
    }

    Ok(candidates)
}

/// Aggregate the builtin extractors over `text` with default settings
pub fn aggregate(text: &str) -> ExtractionResult {
    Extractor::builtin().aggregate(text)
}

/// Runs every entity extractor over a document's text
///
/// Stateless between calls: the same text always yields the same result, and
/// one extractor can be shared across threads.
#[derive(Debug, Clone)]
pub struct Extractor {
    library: Arc<CompiledLibrary>,
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an Extractor over the builtin pattern library
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let library = if config.regex_size_limit == DEFAULT_REGEX_SIZE_LIMIT {
            CompiledLibrary::builtin()
        } else {
            Arc::new(CompiledLibrary::compile(
                &PatternLibrary::builtin(),
                config.regex_size_limit,
            ))
        };

        Ok(Self { library, config })
    }

    /// Create an Extractor over a custom pattern library
    ///
    /// Rules that fail to compile disable only their own kind.
    pub fn with_library(
        library: &PatternLibrary,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        let library = Arc::new(CompiledLibrary::compile(library, config.regex_size_limit));
        Ok(Self { library, config })
    }

    /// Builtin library, default configuration
    pub fn builtin() -> Self {
        Self {
            library: CompiledLibrary::builtin(),
            config: ExtractorConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run a single entity extractor
    pub fn extract_kind(
        &self,
        kind: EntityKind,
        text: &str,
    ) -> Result<Vec<EntityCandidate>, ExtractorError> {
        extract(&self.library, kind, text)
    }

    /// Extract every entity kind from `text`
    pub fn aggregate(&self, text: &str) -> ExtractionResult {
        self.aggregate_report(text).result
    }

    /// Extract every entity kind from a document
    ///
    /// An untranscribed document is treated as empty text.
    pub fn aggregate_document(&self, document: &Document) -> ExtractionReport {
        debug!(
            "Extracting document {} ({}, transcribed: {})",
            document.id, document.category, document.transcribed
        );
        self.aggregate_report(document.text())
    }

    /// Extract every entity kind from `text`, reporting failures and metadata
    ///
    /// Each kind runs independently. A kind whose extractor fails contributes
    /// an empty result and an [`ExtractionFailure`]; it never aborts the others.
    pub fn aggregate_report(&self, text: &str) -> ExtractionReport {
        let start_time = Instant::now();
        let (text, truncated) = self.bound_input(text);

        info!("Starting extraction, text length {}", text.len());

        let mut failures = Vec::new();
        let mut candidates_considered = 0;
        let mut result = ExtractionResult::default();

        for kind in EntityKind::ALL {
            let candidates = self.run_isolated(kind, text, &mut failures);
            candidates_considered += candidates.len();

            if let EntityKind::Vital(sign) = kind {
                if let Some(value) = normalize_vital(&candidates) {
                    result.vitals.set(sign, value);
                }
                continue;
            }

            let mut values = normalize(&candidates);
            if values.len() > self.config.max_entries_per_kind {
                debug!(
                    "Capping {} entries for {} at {}",
                    values.len(),
                    kind,
                    self.config.max_entries_per_kind
                );
                values.truncate(self.config.max_entries_per_kind);
            }
            debug!("{}: {} candidates, {} kept", kind, candidates.len(), values.len());

            match kind {
                EntityKind::Medication => result.medications = values,
                EntityKind::Diagnosis => result.diagnoses = values,
                EntityKind::TestResult => result.test_results = values,
                EntityKind::Date => result.dates = values,
                EntityKind::DoctorName => result.doctor_names = values,
                EntityKind::Vital(_) => {}
            }
        }

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        let metadata = ExtractionMetadata {
            text_length: text.len(),
            truncated,
            candidates_considered,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            processing_time_ms,
        };

        if result.is_empty() {
            info!("Extraction complete: no information could be extracted");
        } else {
            info!(
                "Extraction complete: {} medications, {} diagnoses, {} test results, {} vitals, {} dates, {} doctors, {} failed kinds",
                result.medications.len(),
                result.diagnoses.len(),
                result.test_results.len(),
                result.vitals.len(),
                result.dates.len(),
                result.doctor_names.len(),
                failures.len()
            );
        }

        ExtractionReport {
            result,
            failures,
            metadata,
        }
    }

    /// Run one extractor, converting a failure into zero candidates
    fn run_isolated(
        &self,
        kind: EntityKind,
        text: &str,
        failures: &mut Vec<ExtractionFailure>,
    ) -> Vec<EntityCandidate> {
        match self.extract_kind(kind, text) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(kind = %kind, error = %e, "Extractor failed, contributing no entries");
                failures.push(ExtractionFailure {
                    kind,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Cut input to the configured maximum length at a char boundary
    fn bound_input<'a>(&self, text: &'a str) -> (&'a str, bool) {
        let max = self.config.max_text_length;
        if text.len() <= max {
            return (text, false);
        }

        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        warn!(
            "Text length {} exceeds maximum {}, extracting from the first {} bytes",
            text.len(),
            max,
            end
        );
        (&text[..end], true)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::builtin()
    }
}
