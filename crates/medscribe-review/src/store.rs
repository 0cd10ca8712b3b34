//! In-memory record store

use medscribe_domain::traits::RecordStore;
use medscribe_domain::{Document, ExtractionResult, MedicalRecordEntry, PatientId, RecordId};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Errors from the in-memory store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Store refused the write
    #[error("Write refused: {0}")]
    WriteRefused(String),
}

/// Record store holding committed entries in memory
///
/// Suitable for tests and the CLI demo; entries are lost on drop.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    entries: Vec<MedicalRecordEntry>,
    refuse_writes: Option<String>,
}

impl InMemoryRecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that refuses every commit with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            refuse_writes: Some(message.into()),
        }
    }

    /// Number of committed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been committed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All committed entries, oldest first
    pub fn entries(&self) -> &[MedicalRecordEntry] {
        &self.entries
    }
}

impl RecordStore for InMemoryRecordStore {
    type Error = StoreError;

    fn commit(
        &mut self,
        patient_id: &PatientId,
        document: &Document,
        extraction: &ExtractionResult,
        raw_text: &str,
        reviewed_by: &str,
    ) -> Result<MedicalRecordEntry, Self::Error> {
        if let Some(message) = &self.refuse_writes {
            return Err(StoreError::WriteRefused(message.clone()));
        }

        let committed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let entry = MedicalRecordEntry {
            id: RecordId::new(),
            patient_id: patient_id.clone(),
            document_id: document.id,
            category: document.category,
            extraction: extraction.clone(),
            raw_text: raw_text.to_string(),
            reviewed_by: reviewed_by.to_string(),
            committed_at,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    fn entries_for(&self, patient_id: &PatientId) -> Result<Vec<MedicalRecordEntry>, Self::Error> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| &entry.patient_id == patient_id)
            .cloned()
            .collect())
    }
}
