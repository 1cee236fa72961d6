#![forbid(unsafe_code)]

//! Login form screen: a password field wired to a rule checklist.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use passfield_input::{Event, InputConfig, InputController};
use passfield_rules::{RuleId, ValidationEngine};

use crate::checklist::PasswordChecklist;

/// Title row.
pub const TITLE: &str = "Create your password";

/// Row of the password field in [`LoginForm::render`] output.
pub const FIELD_ROW: u16 = 3;

/// Rules checked by the default form.
pub const LOGIN_RULES: [RuleId; 4] = [
    RuleId::CONTAINS_NUMBER,
    RuleId::CONTAINS_SPECIAL_CHARACTER,
    RuleId::CONTAINS_UPPERCASE_CHARACTER,
    RuleId::NO_CONSECUTIVE_CHARACTERS,
];

/// A password form whose checklist tracks the field's error reports.
#[derive(Debug)]
pub struct LoginForm {
    input: InputController,
    checklist: Rc<RefCell<PasswordChecklist>>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    /// The default form configuration: password kind, [`LOGIN_RULES`],
    /// inline errors hidden in favor of the checklist.
    #[must_use]
    pub fn default_config() -> InputConfig {
        InputConfig::password()
            .with_rules(LOGIN_RULES)
            .with_show_error_display(false)
            .with_label("Password")
            .with_placeholder("Enter a password")
    }

    /// Form with [`default_config`](Self::default_config).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Self::default_config())
    }

    /// Build a form around an arbitrary input configuration.
    ///
    /// The checklist lists the configured rules. It only moves when the
    /// field validates, which means a non-password kind leaves it unmet.
    #[must_use]
    pub fn with_config(config: InputConfig) -> Self {
        let engine = ValidationEngine::default();
        let checklist = Rc::new(RefCell::new(PasswordChecklist::new(
            engine.catalog(),
            &config.rules,
            &config.rule_config(),
        )));

        let sink = Rc::clone(&checklist);
        let input = InputController::new(config)
            .with_engine(engine)
            .with_focused(true)
            .with_on_error(move |errors| sink.borrow_mut().update(errors));

        Self { input, checklist }
    }

    /// Forward an event to the password field.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        self.input.handle_event(event)
    }

    /// Replace the password (one value change).
    pub fn set_password(&mut self, password: &str) {
        self.input.set_value(password);
    }

    /// The password field.
    #[must_use]
    pub fn input(&self) -> &InputController {
        &self.input
    }

    /// Borrow the checklist. Drop the guard before the next event.
    #[must_use]
    pub fn checklist(&self) -> Ref<'_, PasswordChecklist> {
        self.checklist.borrow()
    }

    /// Whether every checklist rule is satisfied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.checklist.borrow().all_met()
    }

    /// Terminal cell of the text cursor, as `(column, row)`.
    #[must_use]
    pub fn cursor_position(&self) -> (u16, u16) {
        let column = 1 + self.input.cursor_column();
        (u16::try_from(column).unwrap_or(u16::MAX), FIELD_ROW)
    }

    /// Render the form as plain lines.
    ///
    /// Layout: title, blank, label, `[field]`, visible errors, blank,
    /// checklist.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let config = self.input.config();
        let field = if self.input.value().is_empty() {
            config.placeholder.clone()
        } else {
            self.input.display_value()
        };

        let mut lines = vec![
            TITLE.to_string(),
            String::new(),
            config.label.clone().unwrap_or_default(),
            format!("[{field}]"),
        ];
        lines.extend(self.input.visible_errors().iter().map(|e| format!("  ! {e}")));
        lines.push(String::new());
        lines.extend(self.checklist.borrow().lines());
        lines
    }
}
