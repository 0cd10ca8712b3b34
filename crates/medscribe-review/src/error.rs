//! Review error types

use crate::gate::ReviewId;
use medscribe_domain::DocumentId;
use thiserror::Error;

/// Errors that can occur while preparing, reviewing or committing an extraction
#[derive(Error, Debug)]
pub enum ReviewError {
    /// Document has no OCR text yet
    #[error("Document {0} has not been transcribed")]
    NotTranscribed(DocumentId),

    /// No review with this id
    #[error("Unknown review: {0}")]
    UnknownReview(ReviewId),

    /// Review was already confirmed or rejected
    #[error("Review {0} has already been decided")]
    AlreadyDecided(ReviewId),

    /// Confirmation without a reviewer name
    #[error("A reviewer must be named to confirm review {0}")]
    MissingReviewer(ReviewId),

    /// Upstream OCR provider error
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// OCR did not finish in time
    #[error("Transcription timeout")]
    TranscriptionTimeout,

    /// Record store error
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
