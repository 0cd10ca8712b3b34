//! Demo command implementation.

use crate::cli::DemoArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medscribe_domain::{Document, DocumentCategory, PatientId};
use medscribe_extractor::Extractor;
use medscribe_review::{InMemoryRecordStore, Intake, MockTranscriber, ReviewDecision, ReviewGate};
use std::sync::Arc;

/// Execute the demo command.
///
/// Simulates an upload of the given category: mock OCR, extraction, then the
/// review gate. The proposal is committed to an in-memory record only with `--confirm`.
pub async fn execute_demo(args: DemoArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let category: DocumentCategory = args.category.parse().map_err(CliError::InvalidInput)?;

    let extractor = Extractor::new(config.extractor.clone())?;
    let intake = Intake::new(Arc::new(MockTranscriber::new()), extractor, config.review.clone())?;
    let mut gate = ReviewGate::new(config.review.clone());
    let mut store = InMemoryRecordStore::new();

    let document = Document::new(category, "image/jpeg");
    let id = intake
        .prepare(&mut gate, PatientId::new(args.patient), document)
        .await?;

    let outcome = if args.confirm {
        let decision = ReviewDecision::Confirm {
            reviewer: args.reviewer,
        };
        Some(gate.decide(id, decision, &mut store)?)
    } else {
        None
    };

    let review = gate
        .get(id)
        .ok_or_else(|| CliError::InvalidInput(format!("review {} disappeared", id)))?;
    println!("{}", formatter.format_review(review, outcome.as_ref())?);

    Ok(())
}
