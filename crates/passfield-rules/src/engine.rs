#![forbid(unsafe_code)]

//! Ordered, independent-rule evaluation.

use std::sync::Arc;

use crate::catalog::RuleCatalog;
use crate::rule::{RuleConfig, RuleId, Violation};

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// Violation messages for one value, in selection order.
///
/// An empty result means the value satisfies every selected rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    messages: Vec<String>,
}

impl ValidationResult {
    /// Returns `true` when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of failing rule occurrences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Same as [`is_valid`](Self::is_valid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The messages as a slice.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns `true` if `message` is among the violations.
    #[must_use]
    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    /// Consume the result, returning the messages.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

impl From<Vec<Violation>> for ValidationResult {
    fn from(violations: Vec<Violation>) -> Self {
        Self {
            messages: violations.iter().map(Violation::format_message).collect(),
        }
    }
}

impl IntoIterator for ValidationResult {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

// ---------------------------------------------------------------------------
// ValidationEngine
// ---------------------------------------------------------------------------

/// Evaluates a rule selection against a value using a shared catalog.
///
/// Every selected rule is evaluated, in order, regardless of earlier
/// failures. Identifiers the catalog does not know are skipped. Duplicate
/// identifiers are evaluated once per occurrence.
///
/// # Example
///
/// ```rust
/// use passfield_rules::{RuleConfig, RuleId, ValidationEngine};
///
/// let engine = ValidationEngine::default();
/// let rules = [RuleId::LONG_ENOUGH, RuleId::CONTAINS_NUMBER];
/// let cfg = RuleConfig::with_min_characters(5);
///
/// let result = engine.evaluate("ttt", &rules, &cfg);
/// assert_eq!(
///     result.into_vec(),
///     vec![
///         "Password must be at least 5 characters long",
///         "Password must contain at least one number",
///     ]
/// );
/// assert!(engine.evaluate("test1test", &rules, &cfg).is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    catalog: Arc<RuleCatalog>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new(RuleCatalog::shared())
    }
}

impl ValidationEngine {
    /// Create an engine over `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self { catalog }
    }

    /// The catalog rules are looked up in.
    #[must_use]
    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    /// Evaluate `selection` against `value`, returning formatted messages.
    #[must_use]
    pub fn evaluate(
        &self,
        value: &str,
        selection: &[RuleId],
        config: &RuleConfig,
    ) -> ValidationResult {
        ValidationResult::from(self.violations(value, selection, config))
    }

    /// Evaluate `selection` against `value`, returning structured violations.
    #[must_use]
    pub fn violations(
        &self,
        value: &str,
        selection: &[RuleId],
        config: &RuleConfig,
    ) -> Vec<Violation> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "rules_evaluate",
            value_len = value.chars().count(),
            selected = selection.len(),
        )
        .entered();

        let violations: Vec<Violation> = selection
            .iter()
            .filter_map(|id| {
                let Some(rule) = self.catalog.get(id) else {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(rule = %id, "unknown rule skipped");
                    return None;
                };
                rule.check(value, config)
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(failed = violations.len(), "rules evaluated");

        violations
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
