//! Medscribe Review
//!
//! Keeps machine extraction out of the medical record until a human confirms it.
//!
//! The review crate provides:
//! - Intake: OCR via a [`Transcriber`](medscribe_domain::traits::Transcriber), then extraction
//! - A review gate holding proposals until they are confirmed, amended or rejected
//! - Commit of confirmed proposals through a [`RecordStore`](medscribe_domain::traits::RecordStore)
//! - A mock transcriber and an in-memory store for tests and demos
//!
//! # Examples
//!
//! ```
//! use medscribe_domain::{Document, DocumentCategory, PatientId};
//! use medscribe_extractor::Extractor;
//! use medscribe_review::{InMemoryRecordStore, ReviewDecision, ReviewGate, ReviewOutcome};
//!
//! let document = Document::with_text(DocumentCategory::Prescription, "Prescribed: Amoxicillin 500mg");
//! let report = Extractor::builtin().aggregate_document(&document);
//!
//! let mut gate = ReviewGate::default_config();
//! let mut store = InMemoryRecordStore::new();
//! let id = gate.open(PatientId::new("patient-1"), document, report).unwrap();
//!
//! let decision = ReviewDecision::Confirm { reviewer: "Dr. Ann Lee".to_string() };
//! let outcome = gate.decide(id, decision, &mut store).unwrap();
//! assert!(matches!(outcome, ReviewOutcome::Committed(_)));
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod gate;
mod intake;
mod mock;
mod store;

pub use config::ReviewConfig;
pub use error::ReviewError;
pub use gate::{PendingReview, ReviewDecision, ReviewGate, ReviewId, ReviewOutcome, ReviewStatus};
pub use intake::Intake;
pub use mock::{MockTranscriber, TranscriptionError};
pub use store::{InMemoryRecordStore, StoreError};
