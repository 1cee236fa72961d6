#![forbid(unsafe_code)]

//! Log subscriber setup.
//!
//! Logs go to stderr so they never mix with line-mode output. Events carry
//! lengths and counts only, never the password itself.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "PASSFIELD_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from `directives`, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global fmt subscriber. A second call is a no-op.
pub fn init() {
    let directives = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
