//! Integration tests for the upload -> review -> commit flow

use medscribe_domain::traits::RecordStore;
use medscribe_domain::{Document, DocumentCategory, PatientId, VitalSign};
use medscribe_extractor::{Capture, EntityKind, Extractor, ExtractorConfig, PatternLibrary, PatternRule};
use medscribe_review::{
    InMemoryRecordStore, Intake, MockTranscriber, ReviewConfig, ReviewDecision, ReviewError, ReviewGate,
    ReviewOutcome, ReviewStatus,
};
use std::sync::Arc;

fn confirm(reviewer: &str) -> ReviewDecision {
    ReviewDecision::Confirm {
        reviewer: reviewer.to_string(),
    }
}

#[tokio::test]
async fn test_upload_review_commit() {
    let ocr = MockTranscriber::new();
    let intake = Intake::new(Arc::new(ocr.clone()), Extractor::builtin(), ReviewConfig::default()).unwrap();
    let mut gate = ReviewGate::default_config();
    let mut store = InMemoryRecordStore::new();
    let patient = PatientId::new("patient-42");

    let document = Document::new(DocumentCategory::Consultation, "image/jpeg");
    let id = intake.prepare(&mut gate, patient.clone(), document).await.unwrap();

    // Nothing reaches the record before confirmation
    assert!(store.entries_for(&patient).unwrap().is_empty());

    let review = gate.get(id).unwrap();
    assert_eq!(review.proposed.diagnoses, vec!["Essential hypertension"]);
    assert_eq!(review.proposed.medications, vec!["Amlodipine 5mg"]);
    assert_eq!(review.proposed.doctor_names, vec!["Meera Shah"]);
    assert_eq!(review.proposed.vitals.get(VitalSign::BloodPressure), Some("130/85"));
    assert_eq!(review.proposed.vitals.get(VitalSign::HeartRate), Some("78"));

    let outcome = gate.decide(id, confirm("Dr. Meera Shah"), &mut store).unwrap();
    let ReviewOutcome::Committed(entry) = outcome else {
        panic!("expected a commit");
    };

    let entries = store.entries_for(&patient).unwrap();
    assert_eq!(entries, vec![entry.clone()]);
    assert_eq!(entry.category, DocumentCategory::Consultation);
    assert_eq!(entry.raw_text, MockTranscriber::sample_text(DocumentCategory::Consultation));
    assert_eq!(gate.get(id).unwrap().status, ReviewStatus::Confirmed(entry.id));
    assert_eq!(ocr.call_count(), 1);
}

#[tokio::test]
async fn test_rejected_upload_leaves_record_untouched() {
    let intake = Intake::new(Arc::new(MockTranscriber::new()), Extractor::builtin(), ReviewConfig::default()).unwrap();
    let mut gate = ReviewGate::default_config();
    let mut store = InMemoryRecordStore::new();
    let patient = PatientId::new("patient-42");

    let document = Document::new(DocumentCategory::Radiology, "image/png");
    let id = intake.prepare(&mut gate, patient.clone(), document).await.unwrap();
    assert_eq!(
        gate.get(id).unwrap().proposed.diagnoses,
        vec!["No acute cardiopulmonary disease"]
    );

    gate.decide(id, ReviewDecision::Reject { reason: "blurred scan".to_string() }, &mut store)
        .unwrap();

    assert!(store.entries_for(&patient).unwrap().is_empty());
    assert!(matches!(
        gate.decide(id, confirm("nurse"), &mut store),
        Err(ReviewError::AlreadyDecided(_))
    ));
}

#[tokio::test]
async fn test_partial_extraction_still_reaches_review() {
    let broken = PatternRule::new(EntityKind::Diagnosis, "unclosed", r"(diagnosis", Capture::Whole);
    let library = PatternLibrary::builtin().with_rules(EntityKind::Diagnosis, vec![broken]);
    let extractor = Extractor::with_library(&library, ExtractorConfig::default()).unwrap();
    let intake = Intake::new(Arc::new(MockTranscriber::new()), extractor, ReviewConfig::default()).unwrap();
    let mut gate = ReviewGate::default_config();

    let document = Document::new(DocumentCategory::Consultation, "image/jpeg");
    let id = intake.prepare(&mut gate, PatientId::new("p"), document).await.unwrap();

    let review = gate.get(id).unwrap();
    assert!(review.proposed.diagnoses.is_empty());
    assert_eq!(review.proposed.medications, vec!["Amlodipine 5mg"]);
    assert_eq!(review.failures.len(), 1);
    assert_eq!(review.failures[0].kind, EntityKind::Diagnosis);
}

#[tokio::test]
async fn test_unreadable_document_opens_no_review() {
    let mut ocr = MockTranscriber::new();
    let document = Document::new(DocumentCategory::Insurance, "application/pdf");
    ocr.add_error(document.id);
    let intake = Intake::new(Arc::new(ocr), Extractor::builtin(), ReviewConfig::default()).unwrap();
    let mut gate = ReviewGate::default_config();

    let result = intake.prepare(&mut gate, PatientId::new("p"), document).await;

    assert!(matches!(result, Err(ReviewError::Transcription(_))));
    assert!(gate.pending().is_empty());
}
