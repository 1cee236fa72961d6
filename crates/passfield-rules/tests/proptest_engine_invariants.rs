#![forbid(unsafe_code)]

//! Property-based invariant tests for the validation engine.
//!
//! 1. Evaluation is deterministic.
//! 2. The result never has more messages than the selection has entries.
//! 3. An empty selection always yields an empty result.
//! 4. Appending an unknown identifier changes nothing.
//! 5. A value that satisfies every rule yields an empty result regardless of
//!    what was evaluated before (no hysteresis).
//! 6. Each message corresponds to a failing rule at the same relative position.

use passfield_rules::{RuleCatalog, RuleConfig, RuleId, ValidationEngine};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn known_id() -> impl Strategy<Value = RuleId> {
    prop_oneof![
        Just(RuleId::LONG_ENOUGH),
        Just(RuleId::CONTAINS_NUMBER),
        Just(RuleId::CONTAINS_SPECIAL_CHARACTER),
        Just(RuleId::CONTAINS_UPPERCASE_CHARACTER),
        Just(RuleId::NO_CONSECUTIVE_CHARACTERS),
    ]
}

fn any_id() -> impl Strategy<Value = RuleId> {
    prop_oneof![
        4 => known_id(),
        1 => "[A-Z_]{0,12}".prop_map(RuleId::from),
    ]
}

fn unknown_id() -> impl Strategy<Value = RuleId> {
    "[a-z]{1,10}".prop_map(|s| RuleId::from(format!("x_{s}")))
}

fn selection() -> impl Strategy<Value = Vec<RuleId>> {
    prop::collection::vec(any_id(), 0..12)
}

fn config() -> impl Strategy<Value = RuleConfig> {
    (-4i64..24).prop_map(RuleConfig::with_min_characters)
}

fn value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9!@#$%^&*_ -]{0,24}",
        any::<String>(),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn evaluation_is_deterministic(v in value(), s in selection(), cfg in config()) {
        let engine = ValidationEngine::default();
        let first = engine.evaluate(&v, &s, &cfg);
        let second = engine.evaluate(&v, &s, &cfg);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Length bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn result_never_longer_than_selection(v in value(), s in selection(), cfg in config()) {
        let engine = ValidationEngine::default();
        prop_assert!(engine.evaluate(&v, &s, &cfg).len() <= s.len());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Empty selection
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn empty_selection_is_always_valid(v in value(), cfg in config()) {
        let engine = ValidationEngine::default();
        prop_assert!(engine.evaluate(&v, &[], &cfg).is_valid());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Unknown identifiers are inert
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unknown_identifier_is_inert(
        v in value(),
        s in selection(),
        x in unknown_id(),
        cfg in config(),
    ) {
        let engine = ValidationEngine::default();
        prop_assume!(!engine.catalog().contains(&x));

        let base = engine.evaluate(&v, &s, &cfg);
        let mut extended = s.clone();
        extended.push(x.clone());
        prop_assert_eq!(&engine.evaluate(&v, &extended, &cfg), &base);

        let mut prefixed = vec![x];
        prefixed.extend(s);
        prop_assert_eq!(&engine.evaluate(&v, &prefixed, &cfg), &base);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. No hysteresis
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn satisfying_value_clears_regardless_of_history(
        history in prop::collection::vec(value(), 0..6),
        s in prop::collection::vec(known_id(), 0..8),
    ) {
        let engine = ValidationEngine::default();
        let cfg = RuleConfig::with_min_characters(5);
        for v in &history {
            let _ = engine.evaluate(v, &s, &cfg);
        }
        prop_assert!(engine.evaluate("testTest1*", &s, &cfg).is_valid());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Messages follow the failing rules in order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn messages_match_failing_rules_in_order(v in value(), s in selection(), cfg in config()) {
        let engine = ValidationEngine::default();
        let catalog = RuleCatalog::shared();
        let expected: Vec<String> = s
            .iter()
            .filter_map(|id| catalog.get(id))
            .filter(|rule| !rule.is_satisfied(&v, &cfg))
            .map(|rule| rule.violation(&cfg).format_message())
            .collect();
        prop_assert_eq!(engine.evaluate(&v, &s, &cfg).into_vec(), expected);
    }
}
