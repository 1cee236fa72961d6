#![forbid(unsafe_code)]

//! Input configuration.

use passfield_rules::{DEFAULT_MIN_CHARACTERS, RuleConfig, RuleId};

/// Default mask character for password inputs.
pub const DEFAULT_MASK_CHAR: char = '•';

/// The declared kind of an input field.
///
/// Only [`InputKind::Password`] runs validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InputKind {
    /// Plain text (default).
    #[default]
    Text,
    /// Password: masked display and rule validation.
    Password,
    /// Email address.
    Email,
    /// Search box.
    Search,
}

impl InputKind {
    /// Parse an HTML-style `type` attribute. Unrecognized values fall back to
    /// [`InputKind::Text`].
    #[must_use]
    pub fn from_type_attr(attr: &str) -> Self {
        match attr.trim().to_ascii_lowercase().as_str() {
            "password" => Self::Password,
            "email" => Self::Email,
            "search" => Self::Search,
            _ => Self::Text,
        }
    }

    /// Returns `true` when value changes must be validated.
    #[must_use]
    pub const fn requires_validation(self) -> bool {
        matches!(self, Self::Password)
    }

    /// Returns `true` when the value is masked on display.
    #[must_use]
    pub const fn is_masked(self) -> bool {
        matches!(self, Self::Password)
    }

    /// Lowercase name, as accepted by [`from_type_attr`](Self::from_type_attr).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Password => "password",
            Self::Email => "email",
            Self::Search => "search",
        }
    }
}

/// Configuration of an [`InputController`](crate::InputController).
///
/// # Example
///
/// ```rust
/// use passfield_input::{InputConfig, InputKind};
/// use passfield_rules::RuleId;
///
/// let config = InputConfig::password()
///     .with_rules([RuleId::LONG_ENOUGH, RuleId::CONTAINS_NUMBER])
///     .with_min_characters(5);
/// assert_eq!(config.kind, InputKind::Password);
/// assert_eq!(config.rule_config().min_characters, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputConfig {
    /// Declared kind. Validation runs only for passwords.
    pub kind: InputKind,
    /// Ordered rule selection. Duplicates and unknown identifiers are kept.
    pub rules: Vec<RuleId>,
    /// Minimum length for [`RuleId::LONG_ENOUGH`].
    pub min_characters: i64,
    /// Whether the rendering layer shows error messages. Does not affect
    /// validation.
    pub show_error_display: bool,
    /// Optional label shown above the field.
    pub label: Option<String>,
    /// Placeholder shown while the value is empty.
    pub placeholder: String,
    /// Maximum length in graphemes (None = unlimited).
    pub max_length: Option<usize>,
    /// Mask character for password display.
    pub mask_char: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kind: InputKind::Text,
            rules: vec![RuleId::LONG_ENOUGH],
            min_characters: DEFAULT_MIN_CHARACTERS,
            show_error_display: true,
            label: None,
            placeholder: String::new(),
            max_length: None,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl InputConfig {
    /// Plain text input with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Password input with default settings.
    #[must_use]
    pub fn password() -> Self {
        Self::default().with_kind(InputKind::Password)
    }

    /// Set the kind (builder).
    #[must_use]
    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the rule selection (builder).
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = RuleId>) -> Self {
        self.rules = rules.into_iter().collect();
        self
    }

    /// Set the minimum length (builder).
    #[must_use]
    pub fn with_min_characters(mut self, min_characters: i64) -> Self {
        self.min_characters = min_characters;
        self
    }

    /// Set whether error messages are displayed (builder).
    #[must_use]
    pub fn with_show_error_display(mut self, show: bool) -> Self {
        self.show_error_display = show;
        self
    }

    /// Set the label (builder).
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the placeholder (builder).
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the maximum length in graphemes (builder).
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set the mask character (builder).
    #[must_use]
    pub fn with_mask_char(mut self, mask: char) -> Self {
        self.mask_char = mask;
        self
    }

    /// Parameters passed to the rule predicates.
    #[must_use]
    pub fn rule_config(&self) -> RuleConfig {
        RuleConfig::with_min_characters(self.min_characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = InputConfig::default();
        assert_eq!(cfg.kind, InputKind::Text);
        assert_eq!(cfg.rules, vec![RuleId::LONG_ENOUGH]);
        assert_eq!(cfg.min_characters, 8);
        assert!(cfg.show_error_display);
        assert!(cfg.label.is_none());
        assert!(cfg.max_length.is_none());
        assert_eq!(cfg.mask_char, DEFAULT_MASK_CHAR);
    }

    #[test]
    fn kind_from_type_attr() {
        assert_eq!(InputKind::from_type_attr("password"), InputKind::Password);
        assert_eq!(InputKind::from_type_attr(" PASSWORD "), InputKind::Password);
        assert_eq!(InputKind::from_type_attr("email"), InputKind::Email);
        assert_eq!(InputKind::from_type_attr("date"), InputKind::Text);
        assert_eq!(InputKind::from_type_attr(""), InputKind::Text);
    }

    #[test]
    fn only_password_validates() {
        assert!(InputKind::Password.requires_validation());
        assert!(!InputKind::Text.requires_validation());
        assert!(!InputKind::Email.requires_validation());
        assert!(!InputKind::Search.requires_validation());
    }

    #[test]
    fn kind_as_str_round_trips() {
        for kind in [
            InputKind::Text,
            InputKind::Password,
            InputKind::Email,
            InputKind::Search,
        ] {
            assert_eq!(InputKind::from_type_attr(kind.as_str()), kind);
        }
    }

    #[test]
    fn builder_chain() {
        let cfg = InputConfig::password()
            .with_rules([RuleId::CONTAINS_NUMBER, RuleId::CONTAINS_NUMBER])
            .with_min_characters(-2)
            .with_show_error_display(false)
            .with_label("Password")
            .with_placeholder("secret")
            .with_max_length(64)
            .with_mask_char('*');
        assert_eq!(cfg.rules.len(), 2);
        assert_eq!(cfg.rule_config(), RuleConfig::with_min_characters(-2));
        assert!(!cfg.show_error_display);
        assert_eq!(cfg.label.as_deref(), Some("Password"));
        assert_eq!(cfg.placeholder, "secret");
        assert_eq!(cfg.max_length, Some(64));
        assert_eq!(cfg.mask_char, '*');
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_partial_config() {
        let cfg: InputConfig = serde_json::from_str(
            r#"{"kind": "password", "rules": ["CONTAINS_NUMBER", "BOGUS"], "min_characters": 5}"#,
        )
        .unwrap();
        assert_eq!(cfg.kind, InputKind::Password);
        assert_eq!(cfg.rules[0], RuleId::CONTAINS_NUMBER);
        assert_eq!(cfg.rules[1].as_str(), "BOGUS");
        assert_eq!(cfg.min_characters, 5);
        assert!(cfg.show_error_display);

        let empty: InputConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, InputConfig::default());
    }
}
