//! Extraction output and the committed medical record entry

use crate::document::{DocumentCategory, DocumentId};
use serde::{Deserialize, Serialize};
use std::fmt;

crate::uuid_v7_id! {
    /// Unique identifier for a committed medical record entry
    RecordId
}

/// Identifier of a patient in the hospital's patient registry
///
/// Patient identifiers are issued outside this system, so they are kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Wrap an externally issued patient identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five vital signs the pipeline recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VitalSign {
    /// Systolic/diastolic pressure, e.g. `120/80`
    BloodPressure,
    /// Beats per minute
    HeartRate,
    /// Body temperature
    Temperature,
    /// Body weight with unit
    Weight,
    /// Body height with unit
    Height,
}

impl VitalSign {
    /// All vital signs in output order
    pub const ALL: [VitalSign; 5] = [
        VitalSign::BloodPressure,
        VitalSign::HeartRate,
        VitalSign::Temperature,
        VitalSign::Weight,
        VitalSign::Height,
    ];

    /// Canonical key used in the serialized `vitals` map
    pub fn key(&self) -> &'static str {
        match self {
            VitalSign::BloodPressure => "bloodPressure",
            VitalSign::HeartRate => "heartRate",
            VitalSign::Temperature => "temperature",
            VitalSign::Weight => "weight",
            VitalSign::Height => "height",
        }
    }
}

impl fmt::Display for VitalSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Vital sign readings, at most one per vital sign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Blood pressure, e.g. `120/80`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,

    /// Heart rate, e.g. `72`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<String>,

    /// Temperature, e.g. `98.6`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    /// Weight with unit, e.g. `70 kg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    /// Height with unit, e.g. `175 cm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

impl Vitals {
    /// Reading for a vital sign, if one was found
    pub fn get(&self, sign: VitalSign) -> Option<&str> {
        self.slot(sign).as_deref()
    }

    /// Store a reading, replacing any previous one for the same sign
    pub fn set(&mut self, sign: VitalSign, value: impl Into<String>) {
        *self.slot_mut(sign) = Some(value.into());
    }

    /// Number of vital signs present
    pub fn len(&self) -> usize {
        VitalSign::ALL.iter().filter(|s| self.get(**s).is_some()).count()
    }

    /// Whether no vital sign was found
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present readings in output order
    pub fn iter(&self) -> impl Iterator<Item = (VitalSign, &str)> + '_ {
        VitalSign::ALL
            .into_iter()
            .filter_map(move |sign| self.get(sign).map(|v| (sign, v)))
    }

    fn slot(&self, sign: VitalSign) -> &Option<String> {
        match sign {
            VitalSign::BloodPressure => &self.blood_pressure,
            VitalSign::HeartRate => &self.heart_rate,
            VitalSign::Temperature => &self.temperature,
            VitalSign::Weight => &self.weight,
            VitalSign::Height => &self.height,
        }
    }

    fn slot_mut(&mut self, sign: VitalSign) -> &mut Option<String> {
        match sign {
            VitalSign::BloodPressure => &mut self.blood_pressure,
            VitalSign::HeartRate => &mut self.heart_rate,
            VitalSign::Temperature => &mut self.temperature,
            VitalSign::Weight => &mut self.weight,
            VitalSign::Height => &mut self.height,
        }
    }
}

/// Structured entities recovered from one document's text
///
/// Derived fresh on every extraction run and replaced, never merged, when a
/// document is re-extracted. Within each list no two entries are equal ignoring
/// case, and entries keep the order they appear in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Medication mentions
    #[serde(default)]
    pub medications: Vec<String>,

    /// Diagnosis and impression phrases
    #[serde(default)]
    pub diagnoses: Vec<String>,

    /// Lab and investigation result lines
    #[serde(default)]
    pub test_results: Vec<String>,

    /// Vital sign readings
    #[serde(default)]
    pub vitals: Vitals,

    /// Date tokens, verbatim
    #[serde(default)]
    pub dates: Vec<String>,

    /// Provider names
    #[serde(default)]
    pub doctor_names: Vec<String>,
}

impl ExtractionResult {
    /// Whether nothing at all was extracted
    ///
    /// Callers present this as "no information could be extracted", not as an error.
    pub fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Total number of extracted entries across every kind
    pub fn entity_count(&self) -> usize {
        self.medications.len()
            + self.diagnoses.len()
            + self.test_results.len()
            + self.vitals.len()
            + self.dates.len()
            + self.doctor_names.len()
    }
}

/// A reviewed extraction committed to a patient's medical record
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecordEntry {
    /// Unique identifier
    pub id: RecordId,

    /// Owning patient
    pub patient_id: PatientId,

    /// Document the entry was extracted from
    pub document_id: DocumentId,

    /// Category of the originating document
    pub category: DocumentCategory,

    /// The confirmed structured data
    pub extraction: ExtractionResult,

    /// OCR text the extraction was derived from
    pub raw_text: String,

    /// Who confirmed the entry
    pub reviewed_by: String,

    /// When the entry was committed (seconds since Unix epoch)
    pub committed_at: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ExtractionResult::default();
        assert!(result.is_empty());
        assert_eq!(result.entity_count(), 0);
        assert!(result.vitals.is_empty());
    }

    #[test]
    fn test_entity_count_includes_vitals() {
        let mut result = ExtractionResult::default();
        result.medications.push("Sumatriptan 50mg".to_string());
        result.vitals.set(VitalSign::HeartRate, "72");
        assert_eq!(result.entity_count(), 2);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_vitals_set_replaces() {
        let mut vitals = Vitals::default();
        vitals.set(VitalSign::BloodPressure, "120/80");
        vitals.set(VitalSign::BloodPressure, "130/85");
        assert_eq!(vitals.get(VitalSign::BloodPressure), Some("130/85"));
        assert_eq!(vitals.len(), 1);
    }

    #[test]
    fn test_vitals_iter_order() {
        let mut vitals = Vitals::default();
        vitals.set(VitalSign::Height, "175 cm");
        vitals.set(VitalSign::BloodPressure, "120/80");
        let keys: Vec<_> = vitals.iter().map(|(sign, _)| sign.key()).collect();
        assert_eq!(keys, vec!["bloodPressure", "height"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut result = ExtractionResult::default();
        result.test_results.push("Glucose: 110 mg/dl".to_string());
        result.doctor_names.push("Sarah Johnson".to_string());
        result.vitals.set(VitalSign::BloodPressure, "120/80");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["testResults"][0], "Glucose: 110 mg/dl");
        assert_eq!(json["doctorNames"][0], "Sarah Johnson");
        assert_eq!(json["vitals"]["bloodPressure"], "120/80");
        assert!(json["vitals"].get("heartRate").is_none());
    }

    #[test]
    fn test_deserialize_partial_vitals() {
        let json = r#"{"medications":["Aspirin 75mg"],"vitals":{"heartRate":"72"}}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.medications, vec!["Aspirin 75mg"]);
        assert_eq!(result.vitals.get(VitalSign::HeartRate), Some("72"));
        assert!(result.diagnoses.is_empty());
    }
}
