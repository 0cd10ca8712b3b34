//! The pattern library: recognition rules grouped by entity kind
//!
//! Rules are plain data. Compilation happens once in [`crate::compiled`], and
//! extractors only ever see the compiled form.

use medscribe_domain::VitalSign;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The entity kinds recognized in document text
///
/// Vital signs are keyed per sign so each one runs as its own sub-extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// Medication mentions
    Medication,
    /// Diagnosis and impression phrases
    Diagnosis,
    /// Lab and investigation result lines
    TestResult,
    /// A single named vital sign
    Vital(VitalSign),
    /// Date tokens
    Date,
    /// Provider names
    DoctorName,
}

impl EntityKind {
    /// Every key of the pattern table, in aggregation order
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Medication,
        EntityKind::Diagnosis,
        EntityKind::TestResult,
        EntityKind::Vital(VitalSign::BloodPressure),
        EntityKind::Vital(VitalSign::HeartRate),
        EntityKind::Vital(VitalSign::Temperature),
        EntityKind::Vital(VitalSign::Weight),
        EntityKind::Vital(VitalSign::Height),
        EntityKind::Date,
        EntityKind::DoctorName,
    ];

    /// Stable name, e.g. `medication` or `vital:bloodPressure`
    pub fn name(&self) -> String {
        match self {
            EntityKind::Medication => "medication".to_string(),
            EntityKind::Diagnosis => "diagnosis".to_string(),
            EntityKind::TestResult => "test_result".to_string(),
            EntityKind::Vital(sign) => format!("vital:{}", sign.key()),
            EntityKind::Date => "date".to_string(),
            EntityKind::DoctorName => "doctor_name".to_string(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown entity kind: '{}'", wanted))
    }
}

/// Which part of a match is kept as the entity value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Keep the whole matched span
    Whole,
    /// Keep the given capture group
    Group(usize),
}

/// A single recognition rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    /// Entity kind this rule produces
    pub kind: EntityKind,
    /// Short human-readable description
    pub description: &'static str,
    /// Regular expression source (compiled in multi-line mode)
    pub pattern: &'static str,
    /// Whether matching respects letter case
    pub case_sensitive: bool,
    /// Which part of the match is the value
    pub capture: Capture,
}

impl PatternRule {
    /// A case-insensitive rule keeping the given capture
    pub const fn new(
        kind: EntityKind,
        description: &'static str,
        pattern: &'static str,
        capture: Capture,
    ) -> Self {
        Self {
            kind,
            description,
            pattern,
            case_sensitive: false,
            capture,
        }
    }

    /// Make the rule respect letter case
    pub const fn case_sensitive(mut self) -> Self {
        self.case_sensitive = true;
        self
    }
}

const MEDICATION_RULES: &[PatternRule] = &[
    PatternRule::new(
        EntityKind::Medication,
        "labelled medication line",
        r"\b(?:prescribed|medications?|medicines?|drugs?)[ \t]*:[ \t]*([^\n]+)",
        Capture::Group(1),
    ),
    PatternRule::new(
        EntityKind::Medication,
        "name followed by a dose and dosage-form unit, optionally per day/kg/hr",
        r"\b([a-z][a-z\-]*[ \t]+\d+(?:\.\d+)?[ \t]*(?:mg|ml|tablets?|capsules?|syrup)\b(?:/[a-z]+\b)?)",
        Capture::Group(1),
    ),
];

const DIAGNOSIS_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Diagnosis,
    "labelled diagnosis or impression line",
    r"\b(?:diagnosis|diagnosed[ \t]+with|impression|assessment|condition|disease|disorder)[ \t]*:[ \t]*([^\n]+)",
    Capture::Group(1),
)];

const TEST_RESULT_RULES: &[PatternRule] = &[
    PatternRule::new(
        EntityKind::TestResult,
        "labelled test or investigation line",
        r"\b(?:test[ \t]+results?|lab[ \t]+results?|investigations?)[ \t]*:[ \t]*([^\n]+)",
        Capture::Group(1),
    ),
    PatternRule::new(
        EntityKind::TestResult,
        "name: value with a lab unit",
        r"\b[a-z][a-z0-9 ()\-]*?:[ \t]*\d+(?:\.\d+)?[ \t]*(?:mg/dl|mmol/l|g/dl|iu/ml|%)",
        Capture::Whole,
    ),
];

const BLOOD_PRESSURE_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Vital(VitalSign::BloodPressure),
    "bp / blood pressure systolic/diastolic",
    r"\b(?:bp|blood[ \t]+pressure)[ \t]*:?[ \t]*(\d{2,3}[ \t]*/[ \t]*\d{2,3})\b",
    Capture::Group(1),
)];

const HEART_RATE_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Vital(VitalSign::HeartRate),
    "pulse / heart rate / hr integer",
    r"\b(?:pulse(?:[ \t]+rate)?|heart[ \t]+rate|hr)[ \t]*:?[ \t]*(\d{2,3})(?:\D|$)",
    Capture::Group(1),
)];

const TEMPERATURE_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Vital(VitalSign::Temperature),
    "temp / temperature decimal",
    r"\b(?:temp|temperature)[ \t]*:?[ \t]*(\d{2,3}(?:\.\d+)?)(?:\D|$)",
    Capture::Group(1),
)];

const WEIGHT_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Vital(VitalSign::Weight),
    "weight / wt decimal in kg or lbs",
    r"\b(?:weight|wt)[ \t]*:?[ \t]*(\d+(?:\.\d+)?[ \t]*(?:kg|lbs))\b",
    Capture::Group(1),
)];

const HEIGHT_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Vital(VitalSign::Height),
    "height / ht decimal in cm or ft",
    r"\b(?:height|ht)[ \t]*:?[ \t]*(\d+(?:\.\d+)?[ \t]*(?:cm|ft))\b",
    Capture::Group(1),
)];

const DATE_RULES: &[PatternRule] = &[PatternRule::new(
    EntityKind::Date,
    "day, month and year separated by - or /",
    r"\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b",
    Capture::Whole,
)];

// Names must start with capitals, so only the labels are matched case-insensitively.
// Each name word ends in a lowercase letter (McDonald, O'Brien, Johnson-Smith).
const DOCTOR_NAME_RULES: &[PatternRule] = &[
    PatternRule::new(
        EntityKind::DoctorName,
        "name after Dr. or Doctor",
        r"\b(?i:dr\.?|doctor)[ \t]+([A-Z][A-Za-z'\-]*[a-z][ \t]+[A-Z][A-Za-z'\-]*[a-z])\b",
        Capture::Group(1),
    )
    .case_sensitive(),
    PatternRule::new(
        EntityKind::DoctorName,
        "name after a consultant, physician or specialist label",
        r"\b(?i:consultant|physician|specialist)[ \t]*:[ \t]*(?:(?i:dr\.?)[ \t]+)?([A-Z][A-Za-z'\-]*[a-z][ \t]+[A-Z][A-Za-z'\-]*[a-z])\b",
        Capture::Group(1),
    )
    .case_sensitive(),
];

/// Ordered recognition rules per entity kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternLibrary {
    rules: BTreeMap<EntityKind, Vec<PatternRule>>,
}

impl PatternLibrary {
    /// The builtin rule catalog
    pub fn builtin() -> Self {
        let rules = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, builtin_rules(kind).to_vec()))
            .collect();
        Self { rules }
    }

    /// A library with no rules for any kind
    pub fn empty() -> Self {
        Self {
            rules: EntityKind::ALL.into_iter().map(|kind| (kind, Vec::new())).collect(),
        }
    }

    /// Replace the rules for one kind
    ///
    /// Each rule is re-tagged with `kind` so the table stays consistent.
    pub fn with_rules(mut self, kind: EntityKind, rules: Vec<PatternRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| PatternRule { kind, ..rule })
            .collect();
        self.rules.insert(kind, rules);
        self
    }

    /// Rules for a kind, in the order they are tried
    pub fn rules(&self, kind: EntityKind) -> &[PatternRule] {
        self.rules.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate every kind with its rules
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &[PatternRule])> + '_ {
        self.rules.iter().map(|(kind, rules)| (*kind, rules.as_slice()))
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    /// Whether the library holds no rules at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_rules(kind: EntityKind) -> &'static [PatternRule] {
    match kind {
        EntityKind::Medication => MEDICATION_RULES,
        EntityKind::Diagnosis => DIAGNOSIS_RULES,
        EntityKind::TestResult => TEST_RESULT_RULES,
        EntityKind::Vital(VitalSign::BloodPressure) => BLOOD_PRESSURE_RULES,
        EntityKind::Vital(VitalSign::HeartRate) => HEART_RATE_RULES,
        EntityKind::Vital(VitalSign::Temperature) => TEMPERATURE_RULES,
        EntityKind::Vital(VitalSign::Weight) => WEIGHT_RULES,
        EntityKind::Vital(VitalSign::Height) => HEIGHT_RULES,
        EntityKind::Date => DATE_RULES,
        EntityKind::DoctorName => DOCTOR_NAME_RULES,
    }
}
