#![forbid(unsafe_code)]

//! Terminal demo for the password field: a login form whose checklist
//! turns green as the rules are satisfied.

pub mod checklist;
pub mod cli;
pub mod error;
pub mod logging;
pub mod login_form;
pub mod session;

pub use checklist::{ChecklistItem, PasswordChecklist};
pub use error::DemoError;
pub use login_form::LoginForm;
