#![forbid(unsafe_code)]

//! Validating single-line input controller.
//!
//! [`InputController`] owns the value of one text field and the most recent
//! validation result. Every change to the value (typed, pasted, deleted, or
//! set programmatically) is one value-change event: the value is replaced,
//! password inputs re-run their rule selection, and the full error list is
//! handed to the `on_error` callback before the event returns.
//!
//! Editing is grapheme-cluster aware: cursor positions and `max_length`
//! count user-perceived characters.

use std::fmt;

use passfield_rules::ValidationEngine;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::config::InputConfig;
use crate::event::{Event, KeyCode, KeyEvent, KeyEventKind, PasteEvent};

/// Receives the full error list after each validated value change.
pub type ErrorCallback = Box<dyn FnMut(&[String])>;

/// Receives the new value after each value change, for every input kind.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

// ---------------------------------------------------------------------------
// InputState
// ---------------------------------------------------------------------------

/// Current value and the errors computed for the last validated change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    value: String,
    errors: Vec<String>,
}

impl InputState {
    /// The current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Errors from the most recent validation, in rule-selection order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns `true` when the last validation reported no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// InputController
// ---------------------------------------------------------------------------

/// A single-line input with rule-based validation.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use passfield_input::{InputConfig, InputController};
/// use passfield_rules::RuleId;
///
/// let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
/// let sink = Rc::clone(&seen);
///
/// let mut input = InputController::new(
///     InputConfig::password()
///         .with_rules([RuleId::LONG_ENOUGH])
///         .with_min_characters(5),
/// )
/// .with_on_error(move |errors| sink.borrow_mut().push(errors.to_vec()));
///
/// input.set_value("test");
/// input.set_value("testtest");
///
/// let seen = seen.borrow();
/// assert_eq!(seen[0], vec!["Password must be at least 5 characters long"]);
/// assert!(seen[1].is_empty());
/// ```
pub struct InputController {
    config: InputConfig,
    engine: ValidationEngine,
    state: InputState,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Selection anchor (grapheme index). When set, selection spans from anchor to cursor.
    selection_anchor: Option<usize>,
    focused: bool,
    on_error: Option<ErrorCallback>,
    on_change: Option<ChangeCallback>,
}

impl InputController {
    /// Create a controller using the shared standard rule catalog.
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            engine: ValidationEngine::default(),
            state: InputState::default(),
            cursor: 0,
            selection_anchor: None,
            focused: false,
            on_error: None,
            on_change: None,
        }
    }

    // --- Builder methods ---

    /// Validate against a different engine (builder).
    #[must_use]
    pub fn with_engine(mut self, engine: ValidationEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Register the error callback (builder).
    #[must_use]
    pub fn with_on_error(mut self, callback: impl FnMut(&[String]) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Register the change callback (builder).
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the initial value without validating it (builder).
    ///
    /// The error list stays empty until the first value change.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.state.value = value.into();
        self.cursor = self.grapheme_count();
        self.selection_anchor = None;
        self
    }

    /// Set whether the input is focused (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Replace the error callback.
    pub fn set_on_error(&mut self, callback: impl FnMut(&[String]) + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    // --- Access ---

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// The engine used for validation.
    #[must_use]
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    /// Value and last error list.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// The current value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.state.value
    }

    /// Errors from the most recent validated change.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.state.errors
    }

    /// Errors the rendering layer should show: the error list when
    /// `show_error_display` is set, nothing otherwise.
    #[must_use]
    pub fn visible_errors(&self) -> &[String] {
        if self.config.show_error_display {
            &self.state.errors
        } else {
            &[]
        }
    }

    /// Returns `true` when the last validation reported no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    /// Cursor position (grapheme index).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the input has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let anchor = self.selection_anchor?;
        let (start, end) = self.selection_range(anchor);
        let byte_start = self.grapheme_byte_offset(start);
        let byte_end = self.grapheme_byte_offset(end);
        Some(&self.state.value[byte_start..byte_end])
    }

    /// The value as it should be displayed: masked for passwords.
    #[must_use]
    pub fn display_value(&self) -> String {
        if self.config.kind.is_masked() {
            std::iter::repeat_n(self.config.mask_char, self.grapheme_count()).collect()
        } else {
            self.state.value.clone()
        }
    }

    /// Display column of the cursor, in terminal cells.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.state
            .value
            .graphemes(true)
            .take(self.cursor)
            .map(|g| self.grapheme_width(g))
            .sum()
    }

    // --- Value changes ---

    /// Replace the value. This is a value-change event even when the new
    /// value equals the old one.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.state.value = value.into();
        self.cursor = self.cursor.min(self.grapheme_count());
        self.selection_anchor = None;
        self.value_changed();
    }

    /// Clear the value (a value-change event).
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.set_value(String::new());
    }

    /// Apply the value-change transition to the current value.
    fn value_changed(&mut self) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "input_value_change",
            kind = self.config.kind.as_str(),
            value_len = self.grapheme_count(),
        )
        .entered();

        if self.config.kind.requires_validation() {
            let result = self.engine.evaluate(
                &self.state.value,
                &self.config.rules,
                &self.config.rule_config(),
            );
            self.state.errors = result.into_vec();

            #[cfg(feature = "tracing")]
            tracing::debug!(errors = self.state.errors.len(), "input validated");

            if let Some(on_error) = self.on_error.as_mut() {
                on_error(&self.state.errors);
            }
        }

        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.state.value);
        }
    }

    // --- Event handling ---

    /// Handle an input event.
    ///
    /// Returns `true` if the event was consumed (value, cursor, selection,
    /// or focus changed).
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Paste(paste) => self.handle_paste(paste),
            Event::Focus(focused) => {
                let changed = self.focused != *focused;
                self.focused = *focused;
                changed
            }
            Event::Key(_) => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.ctrl();
        let shift = key.shift();

        match key.code {
            KeyCode::Char(c) if !ctrl => {
                let deleted = self.delete_selection();
                let inserted = self.insert_str(c.encode_utf8(&mut [0; 4]));
                if deleted || inserted {
                    self.value_changed();
                }
                true
            }
            // Ctrl+A: select all
            KeyCode::Char('a') if ctrl => {
                self.select_all();
                true
            }
            KeyCode::Backspace => {
                let changed = if self.selection_anchor.is_some() {
                    self.delete_selection()
                } else if ctrl {
                    self.delete_word_back()
                } else {
                    self.delete_char_back()
                };
                if changed {
                    self.value_changed();
                }
                true
            }
            KeyCode::Delete => {
                let changed = if self.selection_anchor.is_some() {
                    self.delete_selection()
                } else if ctrl {
                    self.delete_word_forward()
                } else {
                    self.delete_char_forward()
                };
                if changed {
                    self.value_changed();
                }
                true
            }
            KeyCode::Left => {
                if ctrl {
                    self.move_word(Direction::Left, shift);
                } else if shift {
                    self.ensure_selection_anchor();
                    self.cursor = self.cursor.saturating_sub(1);
                } else if let Some(anchor) = self.selection_anchor.take() {
                    self.cursor = self.cursor.min(anchor);
                } else {
                    self.cursor = self.cursor.saturating_sub(1);
                }
                true
            }
            KeyCode::Right => {
                let max = self.grapheme_count();
                if ctrl {
                    self.move_word(Direction::Right, shift);
                } else if shift {
                    self.ensure_selection_anchor();
                    self.cursor = (self.cursor + 1).min(max);
                } else if let Some(anchor) = self.selection_anchor.take() {
                    self.cursor = self.cursor.max(anchor);
                } else {
                    self.cursor = (self.cursor + 1).min(max);
                }
                true
            }
            KeyCode::Home => {
                self.update_anchor(shift);
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.update_anchor(shift);
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    fn handle_paste(&mut self, paste: &PasteEvent) -> bool {
        let text: String = paste
            .text
            .chars()
            .filter(|c| *c != '\n' && *c != '\r')
            .collect();
        let deleted = self.delete_selection();
        let inserted = self.insert_str(&text);
        if deleted || inserted {
            self.value_changed();
        }
        true
    }

    // --- Editing operations (return `true` if the value changed) ---

    fn insert_str(&mut self, text: &str) -> bool {
        let room = match self.config.max_length {
            Some(max) => max.saturating_sub(self.grapheme_count()),
            None => usize::MAX,
        };
        let accepted: String = text.graphemes(true).take(room).collect();
        if accepted.is_empty() {
            return false;
        }

        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.state.value.insert_str(byte_offset, &accepted);
        // Joiners and combining marks can merge graphemes around the cursor.
        let end = byte_offset + accepted.len();
        self.cursor = self.state.value[..end].graphemes(true).count();
        true
    }

    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end {
            return false;
        }
        let byte_start = self.grapheme_byte_offset(start);
        let byte_end = self.grapheme_byte_offset(end);
        self.state.value.drain(byte_start..byte_end);
        self.cursor = start;
        true
    }

    fn delete_char_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.delete_range(self.cursor - 1, self.cursor)
    }

    fn delete_char_forward(&mut self) -> bool {
        let cursor = self.cursor;
        if cursor >= self.grapheme_count() {
            return false;
        }
        self.delete_range(cursor, cursor + 1)
    }

    fn delete_word_back(&mut self) -> bool {
        let end = self.cursor;
        let start = word_boundary_left(&self.graphemes(), end);
        self.delete_range(start, end)
    }

    fn delete_word_forward(&mut self) -> bool {
        let start = self.cursor;
        let end = word_boundary_right(&self.graphemes(), start);
        self.delete_range(start, end)
    }

    // --- Selection ---

    /// Select all text.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.grapheme_count();
    }

    /// Delete selected text. No-op if no selection.
    fn delete_selection(&mut self) -> bool {
        match self.selection_anchor.take() {
            Some(anchor) => {
                let (start, end) = self.selection_range(anchor);
                self.delete_range(start, end)
            }
            None => false,
        }
    }

    fn ensure_selection_anchor(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
    }

    fn update_anchor(&mut self, extend: bool) {
        if extend {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }
    }

    fn selection_range(&self, anchor: usize) -> (usize, usize) {
        if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        }
    }

    fn move_word(&mut self, direction: Direction, extend: bool) {
        self.update_anchor(extend);
        let graphemes = self.graphemes();
        self.cursor = match direction {
            Direction::Left => word_boundary_left(&graphemes, self.cursor),
            Direction::Right => word_boundary_right(&graphemes, self.cursor),
        };
    }

    // --- Internal helpers ---

    fn graphemes(&self) -> Vec<&str> {
        self.state.value.graphemes(true).collect()
    }

    fn grapheme_count(&self) -> usize {
        self.state.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.state
            .value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.state.value.len(), |(i, _)| i)
    }

    fn grapheme_width(&self, g: &str) -> usize {
        if self.config.kind.is_masked() {
            1
        } else {
            UnicodeWidthStr::width(g)
        }
    }
}

impl fmt::Debug for InputController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputController")
            .field("kind", &self.config.kind)
            .field("rules", &self.config.rules)
            .field("value_len", &self.grapheme_count())
            .field("errors", &self.state.errors)
            .field("cursor", &self.cursor)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Word boundaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Space,
    Word,
    Punct,
}

fn char_class(g: &str) -> CharClass {
    if g.chars().all(char::is_whitespace) {
        CharClass::Space
    } else if g.chars().any(char::is_alphanumeric) {
        CharClass::Word
    } else {
        CharClass::Punct
    }
}

/// Start of the run of same-class graphemes ending at `pos`.
fn word_boundary_left(graphemes: &[&str], pos: usize) -> usize {
    let mut pos = pos.min(graphemes.len());
    if pos == 0 {
        return 0;
    }
    let target = char_class(graphemes[pos - 1]);
    while pos > 0 && char_class(graphemes[pos - 1]) == target {
        pos -= 1;
    }
    pos
}

/// End of the run of same-class graphemes starting at `pos`.
fn word_boundary_right(graphemes: &[&str], pos: usize) -> usize {
    let max = graphemes.len();
    let mut pos = pos;
    if pos >= max {
        return max;
    }
    let target = char_class(graphemes[pos]);
    while pos < max && char_class(graphemes[pos]) == target {
        pos += 1;
    }
    pos
}
