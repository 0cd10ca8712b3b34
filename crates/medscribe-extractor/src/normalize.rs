//! Normalization and deduplication of extractor output

use crate::types::EntityCandidate;
use std::collections::HashSet;

/// Normalize candidates of one kind into an ordered, duplicate-free list
///
/// Candidates are ordered by source offset (ties keep rule order), values are
/// trimmed, empty values dropped, and later case-insensitive duplicates discarded.
pub fn normalize(candidates: &[EntityCandidate]) -> Vec<String> {
    let mut ordered: Vec<&EntityCandidate> = candidates.iter().collect();
    ordered.sort_by_key(|candidate| candidate.offset);
    dedupe(ordered.into_iter().map(EntityCandidate::value_text))
}

/// Trim values and keep the first of each case-insensitively equal group
pub fn dedupe<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();

    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            kept.push(trimmed.to_string());
        }
    }

    kept
}

/// Pick the single value for a vital sign: the first match in document order, trimmed
pub fn normalize_vital(candidates: &[EntityCandidate]) -> Option<String> {
    candidates
        .iter()
        .min_by_key(|candidate| candidate.offset)
        .map(|candidate| candidate.value_text().trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::EntityKind;
    use medscribe_domain::VitalSign;

    fn candidate(value: &str, offset: usize) -> EntityCandidate {
        EntityCandidate {
            kind: EntityKind::Medication,
            span: value.to_string(),
            value: None,
            offset,
        }
    }

    #[test]
    fn test_trims_and_dedupes_case_insensitively() {
        let candidates = vec![candidate("  Paracetamol ", 0), candidate("paracetamol", 40)];
        assert_eq!(normalize(&candidates), vec!["Paracetamol"]);
    }

    #[test]
    fn test_orders_by_offset() {
        let candidates = vec![candidate("Ibuprofen", 50), candidate("Aspirin", 10)];
        assert_eq!(normalize(&candidates), vec!["Aspirin", "Ibuprofen"]);
    }

    #[test]
    fn test_first_in_document_order_wins() {
        let candidates = vec![candidate("ASPIRIN", 30), candidate("Aspirin", 5)];
        assert_eq!(normalize(&candidates), vec!["Aspirin"]);
    }

    #[test]
    fn test_drops_blank_values() {
        let candidates = vec![candidate("   ", 0), candidate("\r", 3), candidate("Metformin", 9)];
        assert_eq!(normalize(&candidates), vec!["Metformin"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[]).is_empty());
        assert!(normalize_vital(&[]).is_none());
    }

    #[test]
    fn test_vital_takes_first_in_document_order() {
        let mut first = candidate(" 120/80", 4);
        let mut second = candidate("140/90", 60);
        first.kind = EntityKind::Vital(VitalSign::BloodPressure);
        second.kind = EntityKind::Vital(VitalSign::BloodPressure);
        assert_eq!(normalize_vital(&[second, first]), Some("120/80".to_string()));
    }

    #[test]
    fn test_dedupe_keeps_distinct_strings() {
        let dates = dedupe(["15/03/2024", "03-15-2024"]);
        assert_eq!(dates, vec!["15/03/2024", "03-15-2024"]);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::patterns::EntityKind;
    use proptest::prelude::*;

    fn candidates_strategy() -> impl Strategy<Value = Vec<EntityCandidate>> {
        prop::collection::vec(("[ a-cA-C]{0,6}", 0usize..200), 0..20).prop_map(|items| {
            items
                .into_iter()
                .map(|(span, offset)| EntityCandidate {
                    kind: EntityKind::Medication,
                    span,
                    value: None,
                    offset,
                })
                .collect()
        })
    }

    proptest! {
        /// Property: deduplicating an already deduplicated list changes nothing
        #[test]
        fn test_dedupe_is_idempotent(values in prop::collection::vec("[ a-cA-C]{0,6}", 0..20)) {
            let once = dedupe(&values);
            let twice = dedupe(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalizing the same candidates twice yields the same output
        #[test]
        fn test_normalize_is_deterministic(candidates in candidates_strategy()) {
            prop_assert_eq!(normalize(&candidates), normalize(&candidates));
        }

        /// Property: no two normalized entries are equal ignoring case
        #[test]
        fn test_normalized_entries_are_unique(candidates in candidates_strategy()) {
            let normalized = normalize(&candidates);
            let lowered: HashSet<String> = normalized.iter().map(|v| v.to_lowercase()).collect();
            prop_assert_eq!(lowered.len(), normalized.len());
            prop_assert!(normalized.iter().all(|v| !v.is_empty() && v.trim() == v));
        }
    }
}
