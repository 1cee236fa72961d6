#![forbid(unsafe_code)]

//! The rule table consulted by the validation engine.
//!
//! A [`RuleCatalog`] maps identifiers to rules. It is built once, validated at
//! construction, and read-only afterwards, so a single catalog can be shared
//! by any number of inputs.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::rule::{
    Rule, RuleConfig, RuleId, contains_number, contains_special_character,
    contains_uppercase_character, has_no_consecutive_characters, is_long_enough,
};

/// Message emitted by [`RuleId::LONG_ENOUGH`].
pub const MSG_LONG_ENOUGH: &str = "Password must be at least {min_characters} characters long";
/// Message emitted by [`RuleId::CONTAINS_NUMBER`].
pub const MSG_CONTAINS_NUMBER: &str = "Password must contain at least one number";
/// Message emitted by [`RuleId::CONTAINS_SPECIAL_CHARACTER`].
pub const MSG_CONTAINS_SPECIAL_CHARACTER: &str =
    "Password must contain at least one of these special characters: !@#$%^&*";
/// Message emitted by [`RuleId::CONTAINS_UPPERCASE_CHARACTER`].
pub const MSG_CONTAINS_UPPERCASE_CHARACTER: &str =
    "Password must contain at least one uppercase letter";
/// Message emitted by [`RuleId::NO_CONSECUTIVE_CHARACTERS`].
pub const MSG_NO_CONSECUTIVE_CHARACTERS: &str = "Password must not contain consecutive characters";

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Reasons a catalog is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A rule was registered with an empty identifier.
    EmptyId,
    /// Two rules share an identifier.
    DuplicateId(RuleId),
    /// A rule has an empty message template.
    EmptyMessage(RuleId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "rule identifier must not be empty"),
            Self::DuplicateId(id) => write!(f, "rule `{id}` is registered more than once"),
            Self::EmptyMessage(id) => write!(f, "rule `{id}` has an empty message"),
        }
    }
}

impl std::error::Error for CatalogError {}

// ---------------------------------------------------------------------------
// RuleCatalog
// ---------------------------------------------------------------------------

/// An immutable table of rules keyed by [`RuleId`].
///
/// # Example
///
/// ```rust
/// use passfield_rules::{RuleCatalog, RuleConfig, RuleId};
///
/// let catalog = RuleCatalog::standard();
/// assert_eq!(catalog.len(), 5);
/// assert_eq!(
///     catalog.message_for(&RuleId::LONG_ENOUGH, &RuleConfig::with_min_characters(5)).as_deref(),
///     Some("Password must be at least 5 characters long"),
/// );
/// assert!(catalog.get(&RuleId::from("UNKNOWN")).is_none());
/// ```
pub struct RuleCatalog {
    rules: Vec<Rule>,
    index: HashMap<RuleId, usize>,
}

impl RuleCatalog {
    /// Start building a custom catalog.
    #[must_use]
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// The five built-in password rules, in their canonical order.
    #[must_use]
    pub fn standard() -> Self {
        let rules = standard_rules();
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.id().clone(), i))
            .collect();
        Self { rules, index }
    }

    /// The process-wide standard catalog, built on first use.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<RuleCatalog>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    /// Look up a rule by identifier.
    #[must_use]
    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.index.get(id).map(|&i| &self.rules[i])
    }

    /// Returns `true` if the catalog knows `id`.
    #[must_use]
    pub fn contains(&self, id: &RuleId) -> bool {
        self.index.contains_key(id)
    }

    /// Identifiers in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &RuleId> {
        self.rules.iter().map(Rule::id)
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the catalog has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The formatted message `id` would emit under `config`, if known.
    #[must_use]
    pub fn message_for(&self, id: &RuleId, config: &RuleConfig) -> Option<String> {
        self.get(id).map(|rule| rule.violation(config).format_message())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.ids().map(RuleId::as_str).collect::<Vec<_>>())
            .finish()
    }
}

fn standard_rules() -> Vec<Rule> {
    vec![
        Rule::new(RuleId::LONG_ENOUGH, MSG_LONG_ENOUGH, is_long_enough),
        Rule::new(RuleId::CONTAINS_NUMBER, MSG_CONTAINS_NUMBER, contains_number),
        Rule::new(
            RuleId::CONTAINS_SPECIAL_CHARACTER,
            MSG_CONTAINS_SPECIAL_CHARACTER,
            contains_special_character,
        ),
        Rule::new(
            RuleId::CONTAINS_UPPERCASE_CHARACTER,
            MSG_CONTAINS_UPPERCASE_CHARACTER,
            contains_uppercase_character,
        ),
        Rule::new(
            RuleId::NO_CONSECUTIVE_CHARACTERS,
            MSG_NO_CONSECUTIVE_CHARACTERS,
            has_no_consecutive_characters,
        ),
    ]
}

// ---------------------------------------------------------------------------
// CatalogBuilder
// ---------------------------------------------------------------------------

/// A builder for custom catalogs.
///
/// # Example
///
/// ```rust
/// use passfield_rules::{Rule, RuleCatalog, RuleConfig};
///
/// let catalog = RuleCatalog::builder()
///     .standard_rules()
///     .rule(Rule::new("NO_SPACES", "Password must not contain spaces", |v: &str, _: &RuleConfig| {
///         !v.contains(' ')
///     }))
///     .build()
///     .unwrap();
/// assert_eq!(catalog.len(), 6);
/// ```
#[derive(Default)]
pub struct CatalogBuilder {
    rules: Vec<Rule>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append the five built-in rules.
    #[must_use]
    pub fn standard_rules(mut self) -> Self {
        self.rules.extend(standard_rules());
        self
    }

    /// Validate the table and build the catalog.
    pub fn build(self) -> Result<RuleCatalog, CatalogError> {
        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.id().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if rule.message_template().trim().is_empty() {
                return Err(CatalogError::EmptyMessage(rule.id().clone()));
            }
            if index.insert(rule.id().clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(rule.id().clone()));
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(rules = self.rules.len(), "rule catalog built");

        Ok(RuleCatalog {
            rules: self.rules,
            index,
        })
    }
}

impl fmt::Debug for CatalogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogBuilder")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
