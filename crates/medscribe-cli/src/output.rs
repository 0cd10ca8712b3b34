//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use medscribe_extractor::{Capture, EntityKind, ExtractionReport, ExtractionResult, PatternLibrary, PatternRule};
use medscribe_review::{PendingReview, ReviewOutcome};
use serde_json::json;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// The selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an extraction report.
    ///
    /// JSON output is the bare result so it can be consumed as-is; failures are
    /// only listed in text output.
    pub fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.result)?),
            OutputFormat::Text => {
                let mut lines = vec![self.format_result_table(&report.result)];
                for failure in &report.failures {
                    lines.push(self.warning(&format!("{} extraction failed: {}", failure.kind, failure.reason)));
                }
                if report.metadata.truncated {
                    lines.push(self.warning(&format!(
                        "Input truncated to {} bytes",
                        report.metadata.text_length
                    )));
                }
                lines.push(self.info(&format!(
                    "{} entities from {} bytes ({} candidates, {} ms)",
                    report.result.entity_count(),
                    report.metadata.text_length,
                    report.metadata.candidates_considered,
                    report.metadata.processing_time_ms
                )));
                Ok(lines.join("\n"))
            }
        }
    }

    /// Format the rules of a pattern library, optionally for one kind.
    pub fn format_patterns(&self, library: &PatternLibrary, kind: Option<EntityKind>) -> Result<String> {
        let rules: Vec<&PatternRule> = library
            .iter()
            .filter(|(k, _)| kind.is_none_or(|wanted| wanted == *k))
            .flat_map(|(_, rules)| rules.iter())
            .collect();

        match self.format {
            OutputFormat::Json => {
                let json_rules: Vec<serde_json::Value> = rules
                    .iter()
                    .map(|rule| {
                        json!({
                            "kind": rule.kind.name(),
                            "description": rule.description,
                            "pattern": rule.pattern,
                            "caseSensitive": rule.case_sensitive,
                            "capture": capture_label(rule.capture),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json_rules)?)
            }
            OutputFormat::Text => {
                if rules.is_empty() {
                    return Ok(self.colorize("No rules found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["Kind", "Description", "Pattern", "Case", "Keeps"]);
                for rule in &rules {
                    let case = if rule.case_sensitive { "sensitive" } else { "insensitive" };
                    builder.push_record([
                        rule.kind.name().as_str(),
                        rule.description,
                        rule.pattern,
                        case,
                        capture_label(rule.capture).as_str(),
                    ]);
                }
                Ok(self.render(builder))
            }
        }
    }

    /// Format a pending review and, when a decision was taken, its outcome.
    pub fn format_review(&self, review: &PendingReview, outcome: Option<&ReviewOutcome>) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let failures: Vec<serde_json::Value> = review
                    .failures
                    .iter()
                    .map(|f| json!({ "kind": f.kind.name(), "reason": f.reason }))
                    .collect();
                let value = json!({
                    "reviewId": review.id.to_string(),
                    "patientId": review.patient_id.as_str(),
                    "documentId": review.document.id.to_string(),
                    "category": review.document.category,
                    "rawText": review.document.text(),
                    "proposed": review.proposed,
                    "failures": failures,
                    "outcome": outcome.map(outcome_json),
                });
                Ok(serde_json::to_string_pretty(&value)?)
            }
            OutputFormat::Text => {
                let mut lines = vec![
                    self.info(&format!(
                        "Review {} for patient {} ({} document {})",
                        review.id, review.patient_id, review.document.category, review.document.id
                    )),
                    self.colorize("OCR text:", "cyan"),
                    review.document.text().to_string(),
                    self.colorize("Proposed entries:", "cyan"),
                    self.format_result_table(&review.proposed),
                ];
                for failure in &review.failures {
                    lines.push(self.warning(&format!("{} extraction failed: {}", failure.kind, failure.reason)));
                }
                lines.push(match outcome {
                    Some(outcome) => self.format_outcome(outcome),
                    None => self.info("Review left pending; nothing committed. Pass --confirm to commit."),
                });
                Ok(lines.join("\n"))
            }
        }
    }

    fn format_outcome(&self, outcome: &ReviewOutcome) -> String {
        match outcome {
            ReviewOutcome::Committed(entry) => self.success(&format!(
                "Committed record {} (reviewed by {})",
                entry.id, entry.reviewed_by
            )),
            ReviewOutcome::Rejected { reason } => self.warning(&format!("Rejected: {}", reason)),
            ReviewOutcome::NothingExtracted => {
                self.warning("No information could be extracted; nothing committed.")
            }
        }
    }

    fn format_result_table(&self, result: &ExtractionResult) -> String {
        if result.is_empty() {
            return self.colorize("No information could be extracted.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Kind", "Value"]);
        for kind in EntityKind::ALL {
            let name = kind.name();
            for value in entity_values(result, kind) {
                builder.push_record([name.as_str(), value]);
            }
        }
        self.render(builder)
    }

    fn render(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Values of one kind in a result, in result order.
fn entity_values(result: &ExtractionResult, kind: EntityKind) -> Vec<&str> {
    let list = match kind {
        EntityKind::Medication => &result.medications,
        EntityKind::Diagnosis => &result.diagnoses,
        EntityKind::TestResult => &result.test_results,
        EntityKind::Date => &result.dates,
        EntityKind::DoctorName => &result.doctor_names,
        EntityKind::Vital(sign) => return result.vitals.get(sign).into_iter().collect(),
    };
    list.iter().map(String::as_str).collect()
}

fn capture_label(capture: Capture) -> String {
    match capture {
        Capture::Whole => "match".to_string(),
        Capture::Group(index) => format!("group {}", index),
    }
}

fn outcome_json(outcome: &ReviewOutcome) -> serde_json::Value {
    match outcome {
        ReviewOutcome::Committed(entry) => json!({
            "status": "committed",
            "recordId": entry.id.to_string(),
            "reviewedBy": entry.reviewed_by,
            "committedAt": entry.committed_at,
        }),
        ReviewOutcome::Rejected { reason } => json!({ "status": "rejected", "reason": reason }),
        ReviewOutcome::NothingExtracted => json!({ "status": "nothing_extracted" }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medscribe_domain::{Document, DocumentCategory, PatientId};
    use medscribe_extractor::Extractor;
    use medscribe_review::ReviewGate;

    fn report(text: &str) -> ExtractionReport {
        Extractor::builtin().aggregate_report(text)
    }

    #[test]
    fn test_json_report_uses_contract_names() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_report(&report("BP: 120/80\nDr. Sarah Johnson")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["vitals"]["bloodPressure"], "120/80");
        assert_eq!(value["doctorNames"][0], "Sarah Johnson");
        assert!(value["testResults"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_text_report_lists_entities() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter
            .format_report(&report("Diagnosis: Migraine headache\nPrescribed: Sumatriptan 50mg"))
            .unwrap();
        assert!(output.contains("Migraine headache"));
        assert!(output.contains("medication"));
        assert!(output.contains("2 entities"));
    }

    #[test]
    fn test_text_report_for_empty_result() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_report(&report("")).unwrap();
        assert!(output.contains("No information could be extracted"));
    }

    #[test]
    fn test_patterns_filtered_by_kind() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_patterns(&PatternLibrary::builtin(), Some(EntityKind::Date))
            .unwrap();
        let rules: Vec<serde_json::Value> = serde_json::from_str(&output).unwrap();
        assert!(!rules.is_empty());
        assert!(rules.iter().all(|rule| rule["kind"] == "date"));
    }

    #[test]
    fn test_patterns_table() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_patterns(&PatternLibrary::builtin(), None).unwrap();
        assert!(output.contains("Description"));
        assert!(output.contains("doctor_name"));
        assert!(output.contains("vital:heartRate"));
    }

    #[test]
    fn test_pending_review_json() {
        let document = Document::with_text(DocumentCategory::Prescription, "Prescribed: Aspirin 75mg");
        let report = Extractor::builtin().aggregate_document(&document);
        let mut gate = ReviewGate::default_config();
        let id = gate.open(PatientId::new("p-1"), document, report).unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_review(gate.get(id).unwrap(), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["patientId"], "p-1");
        assert_eq!(value["category"], "prescription");
        assert_eq!(value["proposed"]["medications"][0], "Aspirin 75mg");
        assert!(value["outcome"].is_null());
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
