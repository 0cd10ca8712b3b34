//! Human review gate between extraction and the medical record

use crate::{ReviewConfig, ReviewError};
use medscribe_domain::traits::RecordStore;
use medscribe_domain::{Document, ExtractionResult, MedicalRecordEntry, PatientId, RecordId};
use medscribe_extractor::{ExtractionFailure, ExtractionReport};
use std::collections::HashMap;
use tracing::{debug, info};

medscribe_domain::uuid_v7_id! {
    /// Unique identifier for a pending review
    ReviewId
}

/// Where a review stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    /// Awaiting a reviewer's decision
    Pending,

    /// Confirmed and committed as the given record
    Confirmed(RecordId),

    /// Rejected; nothing was committed
    Rejected,
}

/// An extraction proposed to a reviewer
#[derive(Debug, Clone)]
pub struct PendingReview {
    /// Review identifier
    pub id: ReviewId,

    /// Patient the document belongs to
    pub patient_id: PatientId,

    /// The transcribed source document
    pub document: Document,

    /// Proposed structured entities, possibly amended by the reviewer
    pub proposed: ExtractionResult,

    /// Kinds the extractor could not produce
    pub failures: Vec<ExtractionFailure>,

    /// Whether the reviewer has changed the proposal
    pub amended: bool,

    /// Current status
    pub status: ReviewStatus,
}

impl PendingReview {
    /// Whether the review still awaits a decision
    pub fn is_pending(&self) -> bool {
        self.status == ReviewStatus::Pending
    }
}

/// A reviewer's decision on a pending review
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Accept the (possibly amended) proposal
    Confirm {
        /// Name of the confirming reviewer
        reviewer: String,
    },

    /// Discard the proposal
    Reject {
        /// Why the proposal was discarded
        reason: String,
    },
}

/// What a decision resulted in
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewOutcome {
    /// The proposal was committed to the record store
    Committed(MedicalRecordEntry),

    /// The proposal was discarded
    Rejected {
        /// Reason given by the reviewer
        reason: String,
    },

    /// Confirmation refused because the proposal has no entities; the review stays open
    NothingExtracted,
}

/// Holds extractions until a human confirms or rejects them
///
/// No extraction reaches a [`RecordStore`] except through
/// [`ReviewGate::decide`] with [`ReviewDecision::Confirm`].
pub struct ReviewGate {
    config: ReviewConfig,
    reviews: HashMap<ReviewId, PendingReview>,
}

impl ReviewGate {
    /// Create a new gate with the given configuration
    pub fn new(config: ReviewConfig) -> Self {
        Self {
            config,
            reviews: HashMap::new(),
        }
    }

    /// Create a gate with default configuration
    pub fn default_config() -> Self {
        Self::new(ReviewConfig::default())
    }

    /// Get the gate configuration
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Open a review for a transcribed document and its extraction report
    pub fn open(
        &mut self,
        patient_id: PatientId,
        document: Document,
        report: ExtractionReport,
    ) -> Result<ReviewId, ReviewError> {
        if !document.transcribed {
            return Err(ReviewError::NotTranscribed(document.id));
        }

        let id = ReviewId::new();
        info!(
            review_id = %id,
            document_id = %document.id,
            category = %document.category,
            entities = report.result.entity_count(),
            failures = report.failures.len(),
            "Review opened"
        );

        self.reviews.insert(
            id,
            PendingReview {
                id,
                patient_id,
                document,
                proposed: report.result,
                failures: report.failures,
                amended: false,
                status: ReviewStatus::Pending,
            },
        );
        Ok(id)
    }

    /// Look up a review
    pub fn get(&self, id: ReviewId) -> Option<&PendingReview> {
        self.reviews.get(&id)
    }

    /// Reviews still awaiting a decision, oldest first
    pub fn pending(&self) -> Vec<&PendingReview> {
        let mut pending: Vec<&PendingReview> =
            self.reviews.values().filter(|review| review.is_pending()).collect();
        pending.sort_by_key(|review| review.id);
        pending
    }

    /// Drop confirmed and rejected reviews, returning how many were removed
    ///
    /// Decided reviews stay in the gate, with their status, until cleared.
    /// Long-lived gates should call this periodically.
    pub fn clear_decided(&mut self) -> usize {
        let before = self.reviews.len();
        self.reviews.retain(|_, review| review.is_pending());
        let removed = before - self.reviews.len();
        debug!(removed, "Decided reviews cleared");
        removed
    }

    /// Replace the proposal with a reviewer-edited result
    pub fn amend(&mut self, id: ReviewId, result: ExtractionResult) -> Result<(), ReviewError> {
        let review = self.open_review_mut(id)?;
        debug!(review_id = %id, entities = result.entity_count(), "Review amended");
        review.proposed = result;
        review.amended = true;
        Ok(())
    }

    /// Apply a reviewer's decision
    ///
    /// Confirmation commits to `store`; the review is only marked decided once
    /// the store accepts the entry, so a failed commit can be retried.
    pub fn decide<S: RecordStore>(
        &mut self,
        id: ReviewId,
        decision: ReviewDecision,
        store: &mut S,
    ) -> Result<ReviewOutcome, ReviewError>
    where
        S::Error: std::fmt::Display,
    {
        let require_reviewer = self.config.require_reviewer;
        let allow_empty_commit = self.config.allow_empty_commit;
        let review = self.open_review_mut(id)?;

        match decision {
            ReviewDecision::Reject { reason } => {
                review.status = ReviewStatus::Rejected;
                info!(review_id = %id, reason = %reason, "Review rejected");
                Ok(ReviewOutcome::Rejected { reason })
            }
            ReviewDecision::Confirm { reviewer } => {
                let reviewer = reviewer.trim();
                if require_reviewer && reviewer.is_empty() {
                    return Err(ReviewError::MissingReviewer(id));
                }
                if review.proposed.is_empty() && !allow_empty_commit {
                    debug!(review_id = %id, "Confirmation refused: nothing extracted");
                    return Ok(ReviewOutcome::NothingExtracted);
                }

                let entry = store
                    .commit(
                        &review.patient_id,
                        &review.document,
                        &review.proposed,
                        review.document.text(),
                        reviewer,
                    )
                    .map_err(|e| ReviewError::Store(e.to_string()))?;

                review.status = ReviewStatus::Confirmed(entry.id);
                info!(
                    review_id = %id,
                    record_id = %entry.id,
                    reviewer = %reviewer,
                    amended = review.amended,
                    "Review confirmed and committed"
                );
                Ok(ReviewOutcome::Committed(entry))
            }
        }
    }

    fn open_review_mut(&mut self, id: ReviewId) -> Result<&mut PendingReview, ReviewError> {
        let review = self
            .reviews
            .get_mut(&id)
            .ok_or(ReviewError::UnknownReview(id))?;
        if !review.is_pending() {
            return Err(ReviewError::AlreadyDecided(id));
        }
        Ok(review)
    }
}

impl Default for ReviewGate {
    fn default() -> Self {
        Self::default_config()
    }
}
