//! Document intake: transcription, extraction and opening a review

use crate::{ReviewConfig, ReviewError, ReviewGate, ReviewId};
use medscribe_domain::traits::Transcriber;
use medscribe_domain::{Document, PatientId};
use medscribe_extractor::{ExtractionReport, Extractor};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives a document from upload to a pending review
///
/// The OCR provider is blocking and potentially slow, so each call runs on the
/// blocking pool under the configured timeout.
pub struct Intake<T>
where
    T: Transcriber,
{
    transcriber: Arc<T>,
    extractor: Extractor,
    config: ReviewConfig,
}

impl<T> Intake<T>
where
    T: Transcriber + Send + Sync + 'static,
    T::Error: std::fmt::Display,
{
    /// Create a new intake
    pub fn new(transcriber: Arc<T>, extractor: Extractor, config: ReviewConfig) -> Result<Self, ReviewError> {
        config.validate().map_err(ReviewError::Config)?;
        Ok(Self {
            transcriber,
            extractor,
            config,
        })
    }

    /// The extractor used on transcribed text
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Ensure the document carries OCR text
    ///
    /// Already transcribed documents are left as they are and the provider is not called.
    pub async fn transcribe(&self, document: &mut Document) -> Result<(), ReviewError> {
        if document.transcribed {
            debug!(document_id = %document.id, "Document already transcribed");
            return Ok(());
        }

        info!(
            document_id = %document.id,
            category = %document.category,
            mime_type = %document.mime_type,
            "Transcribing document"
        );

        let text = timeout(self.config.transcription_timeout(), self.call_transcriber(document))
            .await
            .map_err(|_| {
                warn!(document_id = %document.id, "Transcription timed out");
                ReviewError::TranscriptionTimeout
            })??;

        debug!(document_id = %document.id, chars = text.len(), "Transcription finished");
        document.mark_transcribed(text);
        Ok(())
    }

    /// Transcribe and extract without opening a review
    pub async fn process(&self, document: &mut Document) -> Result<ExtractionReport, ReviewError> {
        self.transcribe(document).await?;
        Ok(self.extractor.aggregate_document(document))
    }

    /// Transcribe, extract and hand the result to the review gate
    pub async fn prepare(
        &self,
        gate: &mut ReviewGate,
        patient_id: PatientId,
        mut document: Document,
    ) -> Result<ReviewId, ReviewError> {
        let report = self.process(&mut document).await?;
        if !report.is_clean() {
            warn!(
                document_id = %document.id,
                failed_kinds = report.failures.len(),
                "Extraction incomplete; reviewer will see partial results"
            );
        }
        gate.open(patient_id, document, report)
    }

    async fn call_transcriber(&self, document: &Document) -> Result<String, ReviewError> {
        let transcriber = Arc::clone(&self.transcriber);
        let document = document.clone();

        tokio::task::spawn_blocking(move || {
            transcriber
                .transcribe(&document)
                .map_err(|e| ReviewError::Transcription(e.to_string()))
        })
        .await
        .map_err(|e| ReviewError::Transcription(format!("Task join error: {}", e)))?
    }
}
