#![forbid(unsafe_code)]

//! Live checklist of password rules.
//!
//! The checklist has one line per known rule in the selection. A line is
//! met when its label is absent from the most recent error list, so the
//! checklist follows whatever the input reports through `on_error`.

use passfield_rules::{RuleCatalog, RuleConfig, RuleId};

/// Marker for a satisfied rule.
pub const MET: &str = "✅";
/// Marker for an unsatisfied rule.
pub const UNMET: &str = "❌";

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    /// Rule this line tracks.
    pub rule: RuleId,
    /// The rule's formatted message, matched against reported errors.
    pub label: String,
}

/// Checklist state driven by error reports.
#[derive(Debug, Clone, Default)]
pub struct PasswordChecklist {
    items: Vec<ChecklistItem>,
    errors: Vec<String>,
}

impl PasswordChecklist {
    /// Build the checklist for `rules`. Unknown identifiers get no line.
    ///
    /// Every item starts unmet.
    #[must_use]
    pub fn new(catalog: &RuleCatalog, rules: &[RuleId], config: &RuleConfig) -> Self {
        let items: Vec<ChecklistItem> = rules
            .iter()
            .filter_map(|id| {
                catalog.message_for(id, config).map(|label| ChecklistItem {
                    rule: id.clone(),
                    label,
                })
            })
            .collect();
        let errors = items.iter().map(|item| item.label.clone()).collect();
        Self { items, errors }
    }

    /// Replace the error list with the latest report.
    pub fn update(&mut self, errors: &[String]) {
        self.errors = errors.to_vec();
    }

    /// The checklist lines, in selection order.
    #[must_use]
    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no selected rule is known to the catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether item `index` is satisfied. Out-of-range indices are unmet.
    #[must_use]
    pub fn is_met(&self, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| !self.errors.contains(&item.label))
    }

    /// Whether every item is satisfied.
    #[must_use]
    pub fn all_met(&self) -> bool {
        (0..self.items.len()).all(|i| self.is_met(i))
    }

    /// Rendered lines: `"✅ label"` or `"❌ label"`.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let mark = if self.is_met(i) { MET } else { UNMET };
                format!("{mark} {}", item.label)
            })
            .collect()
    }
}
