//! Document module - the uploaded patient document the pipeline reads from

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

crate::uuid_v7_id! {
    /// Unique identifier for an uploaded document
    ///
    /// # Examples
    ///
    /// ```
    /// use medscribe_domain::DocumentId;
    ///
    /// let id = DocumentId::new();
    /// let parsed = DocumentId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    DocumentId
}

/// Category a document was filed under at upload time
///
/// The category only selects which OCR path produced the text upstream.
/// Extraction runs the same recognizers for every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Consultation or clinic note
    Consultation,
    /// Laboratory investigation report
    LabInvestigation,
    /// Radiology report
    Radiology,
    /// Prescription
    Prescription,
    /// Insurance paperwork
    Insurance,
    /// Anything else
    Other,
}

impl DocumentCategory {
    /// All categories in declaration order
    pub const ALL: [DocumentCategory; 6] = [
        DocumentCategory::Consultation,
        DocumentCategory::LabInvestigation,
        DocumentCategory::Radiology,
        DocumentCategory::Prescription,
        DocumentCategory::Insurance,
        DocumentCategory::Other,
    ];

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Consultation => "consultation",
            DocumentCategory::LabInvestigation => "lab_investigation",
            DocumentCategory::Radiology => "radiology",
            DocumentCategory::Prescription => "prescription",
            DocumentCategory::Insurance => "insurance",
            DocumentCategory::Other => "other",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "consultation" => Ok(DocumentCategory::Consultation),
            "lab_investigation" | "lab" => Ok(DocumentCategory::LabInvestigation),
            "radiology" => Ok(DocumentCategory::Radiology),
            "prescription" => Ok(DocumentCategory::Prescription),
            "insurance" => Ok(DocumentCategory::Insurance),
            "other" => Ok(DocumentCategory::Other),
            other => Err(format!("Unknown document category: '{}'", other)),
        }
    }
}

/// A patient document as seen by the pipeline
///
/// Owned by the persistence collaborator. The only state change the pipeline
/// side ever asks for is untranscribed -> transcribed.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,

    /// Category chosen at upload time
    pub category: DocumentCategory,

    /// MIME type hint from the uploader (e.g. `image/jpeg`, `application/pdf`)
    pub mime_type: String,

    /// OCR output, `None` until transcription happens
    pub raw_text: Option<String>,

    /// Whether the OCR step has completed
    pub transcribed: bool,
}

impl Document {
    /// Create an untranscribed document
    pub fn new(category: DocumentCategory, mime_type: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new(),
            category,
            mime_type: mime_type.into(),
            raw_text: None,
            transcribed: false,
        }
    }

    /// Create a document whose text is already known (typed notes, re-imports)
    pub fn with_text(category: DocumentCategory, text: impl Into<String>) -> Self {
        let mut document = Self::new(category, "text/plain");
        document.mark_transcribed(text);
        document
    }

    /// Record the OCR output and flip the transcription flag
    pub fn mark_transcribed(&mut self, text: impl Into<String>) {
        self.raw_text = Some(text.into());
        self.transcribed = true;
    }

    /// The transcribed text, or an empty string if OCR has not run yet
    pub fn text(&self) -> &str {
        self.raw_text.as_deref().unwrap_or("")
    }
}
