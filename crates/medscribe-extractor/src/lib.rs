//! Medscribe Extractor
//!
//! Recovers clinically relevant entities from raw document text.
//!
//! # Overview
//!
//! Given OCR output from a prescription, lab report or consultation note, the
//! extractor finds medications, diagnoses, test results, vital signs, dates and
//! provider names, and structures them for a human reviewer. It is a best-effort
//! structuring aid: nothing it produces is trusted until a reviewer confirms it.
//!
//! # Architecture
//!
//! ```text
//! Text → Entity Extractors → Candidates → Normalizer → ExtractionResult → Review
//!              ↑
//!        Pattern Library (compiled once)
//! ```
//!
//! # Key Features
//!
//! - **Pattern Library**: an enumerable table of rules per entity kind
//! - **Failure Isolation**: a broken rule only blanks its own kind
//! - **Deduplication**: case-insensitive, first occurrence in document order wins
//! - **Deterministic**: the same text always yields the same result
//!
//! # Example Usage
//!
//! ```
//! use medscribe_extractor::aggregate;
//!
//! let result = aggregate("Diagnosis: Migraine headache\nPrescribed: Sumatriptan 50mg");
//! assert_eq!(result.diagnoses, vec!["Migraine headache"]);
//! assert_eq!(result.medications, vec!["Sumatriptan 50mg"]);
//! ```

#![warn(missing_docs)]

mod error;
mod config;
mod types;
mod patterns;
mod compiled;
mod normalize;
mod extractor;


pub use error::ExtractorError;
pub use config::{ExtractorConfig, DEFAULT_REGEX_SIZE_LIMIT};
pub use types::{EntityCandidate, ExtractionFailure, ExtractionMetadata, ExtractionReport};
pub use patterns::{Capture, EntityKind, PatternLibrary, PatternRule};
pub use compiled::{CompiledLibrary, CompiledRule};
pub use normalize::{dedupe, normalize, normalize_vital};
pub use extractor::{aggregate, extract, Extractor};

pub use medscribe_domain::{ExtractionResult, VitalSign, Vitals};
