//! Mock OCR provider for deterministic testing

use medscribe_domain::traits::Transcriber;
use medscribe_domain::{Document, DocumentCategory, DocumentId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Errors an OCR provider can report
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptionError {
    /// Network or provider communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Document could not be read
    #[error("Unreadable document: {0}")]
    Unreadable(DocumentId),
}

/// Mock transcriber returning canned text without calling any OCR service
///
/// # Examples
///
/// ```
/// use medscribe_domain::traits::Transcriber;
/// use medscribe_domain::{Document, DocumentCategory};
/// use medscribe_review::MockTranscriber;
///
/// let mut ocr = MockTranscriber::new();
/// let document = Document::new(DocumentCategory::Prescription, "image/png");
/// ocr.add_text(document.id, "Prescribed: Amoxicillin 500mg");
///
/// assert_eq!(ocr.transcribe(&document).unwrap(), "Prescribed: Amoxicillin 500mg");
/// assert_eq!(ocr.call_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTranscriber {
    texts: HashMap<DocumentId, String>,
    unreadable: HashSet<DocumentId>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
}

impl MockTranscriber {
    /// Create a transcriber that answers every document with its category sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned OCR output for a document category
    pub fn sample_text(category: DocumentCategory) -> &'static str {
        match category {
            DocumentCategory::Consultation => {
                "Consultation Note\nDate: 14/02/2024\nDr. Meera Shah\nBP: 130/85  Pulse: 78\n\
                 Diagnosis: Essential hypertension\nPrescribed: Amlodipine 5mg"
            }
            DocumentCategory::LabInvestigation => {
                "Lab result: Hemoglobin: 13.2 g/dl\nFasting glucose: 102 mg/dl\nHbA1c: 6.1%\n\
                 Reported on 03/04/2024"
            }
            DocumentCategory::Radiology => {
                "Radiology Report\nChest X-ray dated 21/05/2024\n\
                 Impression: No acute cardiopulmonary disease\nDr. Anil Verma"
            }
            DocumentCategory::Prescription => {
                "Prescription\nDr. Ravi Kumar\nDate: 10/01/2024\n\
                 Paracetamol 500 mg twice daily\nCetirizine 10mg at night"
            }
            DocumentCategory::Insurance => "Policy number: 88231\nClaim date: 02/06/2024",
            DocumentCategory::Other => "No readable clinical content.",
        }
    }

    /// Return specific text for one document
    pub fn add_text(&mut self, document_id: DocumentId, text: impl Into<String>) {
        self.texts.insert(document_id, text.into());
    }

    /// Configure to fail for one document
    pub fn add_error(&mut self, document_id: DocumentId) {
        self.unreadable.insert(document_id);
    }

    /// Block for the given duration on every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of times transcribe was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }
}

impl Transcriber for MockTranscriber {
    type Error = TranscriptionError;

    fn transcribe(&self, document: &Document) -> Result<String, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        if self.unreadable.contains(&document.id) {
            return Err(TranscriptionError::Unreadable(document.id));
        }

        Ok(self
            .texts
            .get(&document.id)
            .cloned()
            .unwrap_or_else(|| Self::sample_text(document.category).to_string()))
    }
}
