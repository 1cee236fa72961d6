#![forbid(unsafe_code)]

//! Property tests for the input controller.
//!
//! - Errors always equal a fresh evaluation of the current value
//! - Exactly one error report per value-changing edit
//! - Cursor stays within the value
//! - `max_length` is never exceeded

use std::cell::RefCell;
use std::rc::Rc;

use passfield_input::{
    Event, InputConfig, InputController, KeyCode, KeyEvent, Modifiers, PasteEvent,
};
use passfield_rules::{RuleId, ValidationEngine};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

fn all_rules() -> Vec<RuleId> {
    vec![
        RuleId::LONG_ENOUGH,
        RuleId::CONTAINS_NUMBER,
        RuleId::CONTAINS_SPECIAL_CHARACTER,
        RuleId::CONTAINS_UPPERCASE_CHARACTER,
        RuleId::NO_CONSECUTIVE_CHARACTERS,
    ]
}

fn event_strategy() -> impl Strategy<Value = Event> {
    let modifiers = prop_oneof![
        Just(Modifiers::NONE),
        Just(Modifiers::SHIFT),
        Just(Modifiers::CTRL),
        Just(Modifiers::CTRL | Modifiers::SHIFT),
    ];
    let code = prop_oneof![
        4 => prop::char::range('!', '~').prop_map(KeyCode::Char),
        1 => Just(KeyCode::Char('é')),
        1 => Just(KeyCode::Char(' ')),
        1 => Just(KeyCode::Char('\u{200D}')),
        1 => Just(KeyCode::Char('\u{0301}')),
        1 => Just(KeyCode::Char('👨')),
        1 => Just(KeyCode::Backspace),
        1 => Just(KeyCode::Delete),
        1 => Just(KeyCode::Left),
        1 => Just(KeyCode::Right),
        1 => Just(KeyCode::Home),
        1 => Just(KeyCode::End),
    ];
    prop_oneof![
        8 => (code, modifiers)
            .prop_map(|(code, mods)| Event::Key(KeyEvent::new(code).with_modifiers(mods))),
        1 => "[a-zA-Z0-9!@# ]{0,12}".prop_map(|s| Event::Paste(PasteEvent::bracketed(s))),
        1 => Just(Event::Paste(PasteEvent::bracketed("\u{200D}👩"))),
    ]
}

proptest! {
    #[test]
    fn errors_match_fresh_evaluation(
        events in prop::collection::vec(event_strategy(), 0..40),
        min in -2i64..12,
    ) {
        let config = InputConfig::password()
            .with_rules(all_rules())
            .with_min_characters(min);
        let rules = config.rules.clone();
        let rule_config = config.rule_config();
        let mut input = InputController::new(config);
        let engine = ValidationEngine::default();
        let mut touched = false;

        for event in &events {
            let before = input.value().to_owned();
            input.handle_event(event);
            touched |= before != input.value();
            if touched {
                let expected = engine.evaluate(input.value(), &rules, &rule_config).into_vec();
                prop_assert_eq!(input.errors(), expected.as_slice());
            }
        }
    }

    #[test]
    fn one_report_per_value_change(events in prop::collection::vec(event_strategy(), 0..40)) {
        let reports = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&reports);
        let mut input = InputController::new(InputConfig::password().with_rules(all_rules()))
            .with_on_error(move |_| *sink.borrow_mut() += 1);

        let mut changes = 0usize;
        for event in &events {
            let before = input.value().to_owned();
            let before_reports = *reports.borrow();
            input.handle_event(event);
            if before != input.value() {
                changes += 1;
                prop_assert_eq!(*reports.borrow(), before_reports + 1);
            }
        }
        // Replacing a selection with the same text is a change with no diff.
        prop_assert!(*reports.borrow() >= changes);
    }

    #[test]
    fn cursor_stays_in_bounds(events in prop::collection::vec(event_strategy(), 0..60)) {
        let mut input = InputController::new(InputConfig::default());
        for event in &events {
            input.handle_event(event);
            let len = input.value().graphemes(true).count();
            prop_assert!(input.cursor() <= len, "cursor {} > len {}", input.cursor(), len);
            if let Some(sel) = input.selected_text() {
                prop_assert!(input.value().contains(sel));
            }
        }
    }

    #[test]
    fn max_length_is_respected(
        events in prop::collection::vec(event_strategy(), 0..60),
        max in 0usize..10,
    ) {
        let mut input = InputController::new(InputConfig::default().with_max_length(max));
        for event in &events {
            input.handle_event(event);
            prop_assert!(input.value().graphemes(true).count() <= max);
        }
    }

    #[test]
    fn masked_display_has_one_cell_per_grapheme(value in "\\PC{0,24}") {
        let input = InputController::new(InputConfig::password()).with_value(value.clone());
        prop_assert_eq!(
            input.display_value().chars().count(),
            value.graphemes(true).count()
        );
    }
}
