//! Compiled form of a pattern library
//!
//! The builtin library is compiled once per process and shared read-only.

use crate::config::DEFAULT_REGEX_SIZE_LIMIT;
use crate::error::ExtractorError;
use crate::patterns::{Capture, EntityKind, PatternLibrary, PatternRule};
use regex::{Regex, RegexBuilder};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};
use tracing::warn;

static BUILTIN: LazyLock<Arc<CompiledLibrary>> = LazyLock::new(|| {
    Arc::new(CompiledLibrary::compile(
        &PatternLibrary::builtin(),
        DEFAULT_REGEX_SIZE_LIMIT,
    ))
});

/// A rule together with its compiled regex
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: PatternRule,
    regex: Regex,
}

impl CompiledRule {
    /// The source rule
    pub fn rule(&self) -> &PatternRule {
        &self.rule
    }

    /// The compiled matcher
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Every kind's rules, compiled
///
/// A kind whose rules fail to compile keeps the error instead of its rules, so
/// one bad rule only disables its own kind.
#[derive(Debug, Clone)]
pub struct CompiledLibrary {
    kinds: BTreeMap<EntityKind, Result<Vec<CompiledRule>, ExtractorError>>,
}

impl CompiledLibrary {
    /// Shared compiled form of [`PatternLibrary::builtin`]
    pub fn builtin() -> Arc<CompiledLibrary> {
        Arc::clone(&BUILTIN)
    }

    /// Compile a library with the given per-pattern size limit
    pub fn compile(library: &PatternLibrary, size_limit: usize) -> Self {
        let kinds = library
            .iter()
            .map(|(kind, rules)| {
                let compiled = compile_kind(rules, size_limit);
                if let Err(e) = &compiled {
                    warn!(kind = %kind, error = %e, "pattern rules failed to compile");
                }
                (kind, compiled)
            })
            .collect();
        Self { kinds }
    }

    /// Compiled rules for a kind
    ///
    /// Kinds absent from the library have no rules and yield an empty slice.
    pub fn rules_for(&self, kind: EntityKind) -> Result<&[CompiledRule], ExtractorError> {
        match self.kinds.get(&kind) {
            Some(Ok(rules)) => Ok(rules.as_slice()),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(&[]),
        }
    }

    /// Kinds whose rules failed to compile
    pub fn broken_kinds(&self) -> Vec<EntityKind> {
        self.kinds
            .iter()
            .filter(|(_, rules)| rules.is_err())
            .map(|(kind, _)| *kind)
            .collect()
    }
}

fn compile_kind(rules: &[PatternRule], size_limit: usize) -> Result<Vec<CompiledRule>, ExtractorError> {
    rules.iter().map(|rule| compile_rule(rule, size_limit)).collect()
}

fn compile_rule(rule: &PatternRule, size_limit: usize) -> Result<CompiledRule, ExtractorError> {
    let pattern_error = |message: String| ExtractorError::Pattern {
        kind: rule.kind,
        pattern: rule.pattern.to_string(),
        message,
    };

    let regex = RegexBuilder::new(rule.pattern)
        .case_insensitive(!rule.case_sensitive)
        .multi_line(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| pattern_error(e.to_string()))?;

    if let Capture::Group(index) = rule.capture {
        if index == 0 || index >= regex.captures_len() {
            return Err(pattern_error(format!(
                "capture group {} does not exist ({} groups)",
                index,
                regex.captures_len() - 1
            )));
        }
    }

    Ok(CompiledRule { rule: *rule, regex })
}
