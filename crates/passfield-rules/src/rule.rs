#![forbid(unsafe_code)]

//! Rule identifiers, rule configuration, and the built-in password predicates.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// RuleId
// ---------------------------------------------------------------------------

/// Identifier of a rule in a [`RuleCatalog`](crate::RuleCatalog).
///
/// Identifiers are compared by their string form. The five built-in rules are
/// available as associated constants; custom catalogs may register any other
/// non-empty identifier.
///
/// # Example
///
/// ```rust
/// use passfield_rules::RuleId;
///
/// let id = RuleId::from("CONTAINS_NUMBER");
/// assert_eq!(id, RuleId::CONTAINS_NUMBER);
/// assert_eq!(id.as_str(), "CONTAINS_NUMBER");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleId(Cow<'static, str>);

impl RuleId {
    /// Value must have at least `min_characters` characters.
    pub const LONG_ENOUGH: Self = Self::new_static("LONG_ENOUGH");
    /// Value must contain an ASCII digit.
    pub const CONTAINS_NUMBER: Self = Self::new_static("CONTAINS_NUMBER");
    /// Value must contain one of `!@#$%^&*`.
    pub const CONTAINS_SPECIAL_CHARACTER: Self =
        Self::new_static("CONTAINS_SPECIAL_CHARACTER");
    /// Value must contain an ASCII uppercase letter.
    pub const CONTAINS_UPPERCASE_CHARACTER: Self =
        Self::new_static("CONTAINS_UPPERCASE_CHARACTER");
    /// Value must not repeat a word character back to back.
    pub const NO_CONSECUTIVE_CHARACTERS: Self = Self::new_static("NO_CONSECUTIVE_CHARACTERS");

    /// Create an identifier from a static string.
    #[must_use]
    pub const fn new_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the empty identifier, which no catalog accepts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for RuleId {
    fn from(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }
}

impl From<String> for RuleId {
    fn from(id: String) -> Self {
        Self(Cow::Owned(id))
    }
}

/// Parse a comma-separated rule list such as `"LONG_ENOUGH, CONTAINS_NUMBER"`.
///
/// Whitespace around entries is trimmed and empty entries are dropped.
/// Identifiers are not checked against any catalog.
#[must_use]
pub fn parse_rule_list(list: &str) -> Vec<RuleId> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| RuleId::from(s.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// RuleConfig
// ---------------------------------------------------------------------------

/// Default minimum length used by [`RuleId::LONG_ENOUGH`].
pub const DEFAULT_MIN_CHARACTERS: i64 = 8;

/// Rule-specific parameters shared by every rule in a selection.
///
/// `min_characters` is signed: zero or negative values are accepted and make
/// the length rule always pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleConfig {
    /// Minimum number of characters for [`RuleId::LONG_ENOUGH`].
    pub min_characters: i64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            min_characters: DEFAULT_MIN_CHARACTERS,
        }
    }
}

impl RuleConfig {
    /// Create a config with the given minimum length.
    #[must_use]
    pub const fn with_min_characters(min_characters: i64) -> Self {
        Self { min_characters }
    }

    /// Interpolation parameters exposed to message templates.
    fn params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("min_characters".to_string(), self.min_characters.to_string());
        params
    }
}

// ---------------------------------------------------------------------------
// Violation
// ---------------------------------------------------------------------------

/// One failing rule occurrence, with its message template and parameters.
///
/// # Example
///
/// ```rust
/// use passfield_rules::{RuleId, Violation};
///
/// let v = Violation::new(RuleId::LONG_ENOUGH, "Password must be at least {min_characters} characters long")
///     .with_param("min_characters", 5);
/// assert_eq!(v.format_message(), "Password must be at least 5 characters long");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Rule that produced this violation.
    pub rule: RuleId,
    /// Message template with `{name}` placeholders.
    pub message: Cow<'static, str>,
    /// Parameters substituted into the template.
    pub params: HashMap<String, String>,
}

impl Violation {
    /// Create a violation with no parameters.
    #[must_use]
    pub fn new(rule: RuleId, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            rule,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message, replacing every `{key}` with its parameter value.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.to_string();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_message())
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// Predicate signature: returns `true` when the value satisfies the rule.
pub type Predicate = dyn Fn(&str, &RuleConfig) -> bool + Send + Sync;

/// A rule: identifier, predicate, and the message emitted when it fails.
pub struct Rule {
    id: RuleId,
    message: Cow<'static, str>,
    predicate: Box<Predicate>,
}

impl Rule {
    /// Create a rule.
    ///
    /// `message` may reference `{min_characters}`.
    #[must_use]
    pub fn new(
        id: impl Into<RuleId>,
        message: impl Into<Cow<'static, str>>,
        predicate: impl Fn(&str, &RuleConfig) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The rule's identifier.
    #[must_use]
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// The unformatted message template.
    #[must_use]
    pub fn message_template(&self) -> &str {
        &self.message
    }

    /// Returns `true` when `value` satisfies the rule.
    #[must_use]
    pub fn is_satisfied(&self, value: &str, config: &RuleConfig) -> bool {
        (self.predicate)(value, config)
    }

    /// Check `value`, returning the violation if the rule fails.
    #[must_use]
    pub fn check(&self, value: &str, config: &RuleConfig) -> Option<Violation> {
        if self.is_satisfied(value, config) {
            None
        } else {
            Some(self.violation(config))
        }
    }

    /// The violation this rule reports under `config`.
    #[must_use]
    pub fn violation(&self, config: &RuleConfig) -> Violation {
        Violation {
            rule: self.id.clone(),
            message: self.message.clone(),
            params: config.params(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Built-in predicates
// ---------------------------------------------------------------------------

/// Characters accepted by [`RuleId::CONTAINS_SPECIAL_CHARACTER`].
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

/// Length in UTF-16 code units is at least `min_characters`.
///
/// Characters outside the Basic Multilingual Plane count as two.
#[must_use]
pub fn is_long_enough(value: &str, config: &RuleConfig) -> bool {
    let len = i64::try_from(value.encode_utf16().count()).unwrap_or(i64::MAX);
    len >= config.min_characters
}

/// At least one ASCII digit.
#[must_use]
pub fn contains_number(value: &str, _config: &RuleConfig) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// At least one of [`SPECIAL_CHARACTERS`].
#[must_use]
pub fn contains_special_character(value: &str, _config: &RuleConfig) -> bool {
    value.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
}

/// At least one ASCII uppercase letter.
#[must_use]
pub fn contains_uppercase_character(value: &str, _config: &RuleConfig) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

/// No word character (`[A-Za-z0-9_]`) is immediately followed by itself.
#[must_use]
pub fn has_no_consecutive_characters(value: &str, _config: &RuleConfig) -> bool {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut prev: Option<char> = None;
    for c in value.chars() {
        if prev == Some(c) && is_word(c) {
            return false;
        }
        prev = Some(c);
    }
    true
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
