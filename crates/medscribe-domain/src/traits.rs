//! Trait definitions for external interactions
//!
//! These traits mark the boundaries of the extraction pipeline. The OCR provider
//! sits upstream of it and the record store sits behind human review.

use crate::{Document, ExtractionResult, MedicalRecordEntry, PatientId};

/// Trait for turning a document image or PDF into raw text
///
/// Implemented by OCR provider integrations. Calls may be slow and may fail
/// with network or provider errors; retrying is the caller's decision.
pub trait Transcriber {
    /// Error type for transcription
    type Error;

    /// Produce raw text for the given document
    fn transcribe(&self, document: &Document) -> Result<String, Self::Error>;
}

/// Trait for persisting reviewed extractions into a patient's medical record
///
/// Only ever invoked after a human has explicitly confirmed the extraction.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Commit a confirmed extraction as a new medical record entry
    fn commit(
        &mut self,
        patient_id: &PatientId,
        document: &Document,
        extraction: &ExtractionResult,
        raw_text: &str,
        reviewed_by: &str,
    ) -> Result<MedicalRecordEntry, Self::Error>;

    /// All entries committed for a patient, oldest first
    fn entries_for(&self, patient_id: &PatientId) -> Result<Vec<MedicalRecordEntry>, Self::Error>;
}
