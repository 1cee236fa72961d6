#![forbid(unsafe_code)]

//! Single-line input controller with rule-based password validation.
//!
//! An [`InputController`] holds the value of one field. Each value change
//! on a [`InputKind::Password`] field re-evaluates the configured rule
//! selection through a [`passfield_rules::ValidationEngine`] and reports the
//! complete error list to the `on_error` callback. Other kinds never
//! validate.
//!
//! # Feature Flags
//!
//! | Feature     | Enables                                               |
//! |-------------|-------------------------------------------------------|
//! | `tracing`   | Spans around value changes (and rule evaluation)      |
//! | `crossterm` | [`Event::from_crossterm`] for terminal front ends     |
//! | `serde`     | `Deserialize` for [`InputConfig`] and [`InputKind`]   |

pub mod config;
pub mod controller;
pub mod event;

pub use config::{DEFAULT_MASK_CHAR, InputConfig, InputKind};
pub use controller::{ChangeCallback, ErrorCallback, InputController, InputState};
pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
