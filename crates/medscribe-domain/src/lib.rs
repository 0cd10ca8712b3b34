//! Medscribe Domain Layer
//!
//! Core value objects and collaborator traits shared by the extraction pipeline
//! and the review gate. Nothing in here performs I/O.
//!
//! ## Key Concepts
//!
//! - **Document**: an uploaded patient document, transcribed by an external OCR step
//! - **ExtractionResult**: the structured entities recovered from a document's text
//! - **MedicalRecordEntry**: a reviewed result committed to a patient's record
//!
//! ## Architecture
//!
//! - Pure value types only
//! - Infrastructure implementations live in other crates
//! - Trait definitions for the OCR provider and the record store

#![warn(missing_docs)]
#![warn(clippy::all)]

mod id;

#[doc(hidden)]
pub use uuid as __uuid;

pub mod document;
pub mod record;
pub mod traits;

pub use document::{Document, DocumentCategory, DocumentId};
pub use record::{ExtractionResult, MedicalRecordEntry, PatientId, RecordId, VitalSign, Vitals};
