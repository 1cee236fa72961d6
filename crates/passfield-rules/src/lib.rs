#![forbid(unsafe_code)]

//! Password rule catalog and validation engine.
//!
//! This crate provides:
//! - [`RuleCatalog`]: an immutable identifier → rule table, validated at
//!   construction and shareable across inputs
//! - [`ValidationEngine`]: evaluates an ordered rule selection against a value
//!   and returns one message per failing occurrence, in selection order
//! - The five built-in password rules (length, digit, special character,
//!   uppercase letter, no repeated word characters)
//!
//! # Example
//!
//! ```rust
//! use passfield_rules::{RuleConfig, RuleId, ValidationEngine};
//!
//! let engine = ValidationEngine::default();
//! let rules = [
//!     RuleId::LONG_ENOUGH,
//!     RuleId::CONTAINS_NUMBER,
//!     RuleId::CONTAINS_SPECIAL_CHARACTER,
//!     RuleId::CONTAINS_UPPERCASE_CHARACTER,
//!     RuleId::NO_CONSECUTIVE_CHARACTERS,
//! ];
//! let cfg = RuleConfig::with_min_characters(5);
//!
//! assert_eq!(engine.evaluate("ttt", &rules, &cfg).len(), 5);
//! assert!(engine.evaluate("testTest1*", &rules, &cfg).is_valid());
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `tracing` | Debug spans around rule evaluation |
//! | `serde` | `Deserialize`/`Serialize` for [`RuleId`] and [`RuleConfig`] |

pub mod catalog;
pub mod engine;
pub mod rule;

pub use catalog::{
    CatalogBuilder, CatalogError, MSG_CONTAINS_NUMBER, MSG_CONTAINS_SPECIAL_CHARACTER,
    MSG_CONTAINS_UPPERCASE_CHARACTER, MSG_LONG_ENOUGH, MSG_NO_CONSECUTIVE_CHARACTERS, RuleCatalog,
};
pub use engine::{ValidationEngine, ValidationResult};
pub use rule::{
    DEFAULT_MIN_CHARACTERS, Predicate, Rule, RuleConfig, RuleId, SPECIAL_CHARACTERS, Violation,
    parse_rule_list,
};
