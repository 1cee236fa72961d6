#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `PASSFIELD_DEMO_*` prefix.

use std::fs;
use std::path::{Path, PathBuf};

use passfield_input::InputConfig;
use passfield_rules::{RuleId, parse_rule_list};

use crate::error::DemoError;
use crate::login_form::LoginForm;

/// Crate version, printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Usage text printed by `--help`.
pub const HELP_TEXT: &str = "\
passfield-demo: password field with a live rule checklist

USAGE:
    passfield-demo [OPTIONS]

OPTIONS:
    --rules=ID,ID        Rules to check, in order (default: the four
                         character rules)
    --min-characters=N   Minimum length for LONG_ENOUGH (default: 8)
    --show-errors        Print error messages under the field
    --config=PATH        Load the field configuration from a JSON file
    --stdin              Read one password per line from stdin
    --help, -h           Show this help message
    --version, -V        Show version

RULES:
    LONG_ENOUGH                   At least N characters
    CONTAINS_NUMBER               At least one digit
    CONTAINS_SPECIAL_CHARACTER    One of !@#$%^&*
    CONTAINS_UPPERCASE_CHARACTER  At least one uppercase letter
    NO_CONSECUTIVE_CHARACTERS     No character repeated back to back

KEYBINDINGS:
    Esc / Ctrl+C    Quit

ENVIRONMENT VARIABLES:
    PASSFIELD_DEMO_RULES           Override --rules
    PASSFIELD_DEMO_MIN_CHARACTERS  Override --min-characters
    PASSFIELD_DEMO_SHOW_ERRORS     Set to 1 to show errors
    PASSFIELD_DEMO_CONFIG          Override --config
    PASSFIELD_DEMO_STDIN           Set to 1 for line mode
    PASSFIELD_LOG                  Log filter (default: warn)";

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo with these options.
    Run(Opts),
    /// Print [`HELP_TEXT`] and exit.
    Help,
    /// Print the version and exit.
    Version,
}

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    /// Rule selection override.
    pub rules: Option<Vec<RuleId>>,
    /// Minimum length override.
    pub min_characters: Option<i64>,
    /// Show inline error messages.
    pub show_errors: bool,
    /// JSON config file.
    pub config_path: Option<PathBuf>,
    /// Line mode instead of the interactive terminal.
    pub stdin: bool,
}

impl Opts {
    /// Parse the process arguments and environment.
    pub fn parse() -> Result<Command, DemoError> {
        parse_from(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Resolve the field configuration: config file (or the login form
    /// default), then the explicit overrides.
    pub fn input_config(&self) -> Result<InputConfig, DemoError> {
        let mut config = match &self.config_path {
            Some(path) => load_config(path)?,
            None => LoginForm::default_config(),
        };
        if let Some(rules) = &self.rules {
            config.rules = rules.clone();
        }
        if let Some(min) = self.min_characters {
            config.min_characters = min;
        }
        if self.show_errors {
            config.show_error_display = true;
        }
        Ok(config)
    }
}

/// Parse `args` with `env` as the environment lookup.
///
/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags.
pub fn parse_from<I, F>(args: I, env: F) -> Result<Command, DemoError>
where
    I: IntoIterator<Item = String>,
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(val) = env("PASSFIELD_DEMO_RULES") {
        opts.rules = Some(parse_rule_list(&val));
    }
    if let Some(val) = env("PASSFIELD_DEMO_MIN_CHARACTERS")
        && let Ok(n) = val.trim().parse()
    {
        opts.min_characters = Some(n);
    }
    if let Some(val) = env("PASSFIELD_DEMO_SHOW_ERRORS") {
        opts.show_errors = is_truthy(&val);
    }
    if let Some(val) = env("PASSFIELD_DEMO_CONFIG")
        && !val.is_empty()
    {
        opts.config_path = Some(PathBuf::from(val));
    }
    if let Some(val) = env("PASSFIELD_DEMO_STDIN") {
        opts.stdin = is_truthy(&val);
    }

    // Parse command-line args (override env vars)
    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--show-errors" => opts.show_errors = true,
            "--stdin" => opts.stdin = true,
            other => {
                if let Some(val) = other.strip_prefix("--rules=") {
                    opts.rules = Some(parse_rule_list(val));
                } else if let Some(val) = other.strip_prefix("--min-characters=") {
                    match val.parse() {
                        Ok(n) => opts.min_characters = Some(n),
                        Err(_) => {
                            return Err(DemoError::Config(format!(
                                "invalid --min-characters value: {val}"
                            )));
                        }
                    }
                } else if let Some(val) = other.strip_prefix("--config=") {
                    opts.config_path = Some(PathBuf::from(val));
                } else {
                    return Err(DemoError::Config(format!(
                        "unknown argument: {other} (run with --help for usage)"
                    )));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

/// Read an [`InputConfig`] from a JSON file.
pub fn load_config(path: &Path) -> Result<InputConfig, DemoError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text).map_err(|e| match e {
        DemoError::Config(msg) => DemoError::Config(format!("{}: {msg}", path.display())),
        other => other,
    })
}

/// Parse an [`InputConfig`] from JSON. Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<InputConfig, DemoError> {
    serde_json::from_str(text).map_err(|e| DemoError::Config(e.to_string()))
}

fn is_truthy(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use passfield_input::InputKind;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run_opts(cmd: Command) -> Opts {
        match cmd {
            Command::Run(opts) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run_opts(parse_from(args(&[]), no_env).unwrap());
        assert_eq!(opts, Opts::default());
        assert!(opts.rules.is_none());
        assert!(!opts.stdin);
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_rules() {
        for id in [
            "LONG_ENOUGH",
            "CONTAINS_NUMBER",
            "CONTAINS_SPECIAL_CHARACTER",
            "CONTAINS_UPPERCASE_CHARACTER",
            "NO_CONSECUTIVE_CHARACTERS",
        ] {
            assert!(HELP_TEXT.contains(id), "{id} missing from help");
        }
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse_from(args(&["-h"]), no_env).unwrap(), Command::Help);
        assert_eq!(
            parse_from(args(&["--stdin", "--version"]), no_env).unwrap(),
            Command::Version
        );
    }

    #[test]
    fn flags_parse() {
        let opts = run_opts(
            parse_from(
                args(&[
                    "--rules=LONG_ENOUGH, CONTAINS_NUMBER",
                    "--min-characters=12",
                    "--show-errors",
                    "--config=field.json",
                    "--stdin",
                ]),
                no_env,
            )
            .unwrap(),
        );
        assert_eq!(
            opts.rules,
            Some(vec![RuleId::LONG_ENOUGH, RuleId::CONTAINS_NUMBER])
        );
        assert_eq!(opts.min_characters, Some(12));
        assert!(opts.show_errors);
        assert_eq!(opts.config_path, Some(PathBuf::from("field.json")));
        assert!(opts.stdin);
    }

    #[test]
    fn bad_values_are_config_errors() {
        let err = parse_from(args(&["--min-characters=lots"]), no_env).unwrap_err();
        assert!(matches!(err, DemoError::Config(msg) if msg.contains("lots")));

        let err = parse_from(args(&["--frobnicate"]), no_env).unwrap_err();
        assert!(err.to_string().contains("--frobnicate"));
    }

    #[test]
    fn env_overrides_and_flag_precedence() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("PASSFIELD_DEMO_RULES", "CONTAINS_NUMBER"),
            ("PASSFIELD_DEMO_MIN_CHARACTERS", "3"),
            ("PASSFIELD_DEMO_SHOW_ERRORS", "true"),
            ("PASSFIELD_DEMO_STDIN", "1"),
        ]);
        let lookup = |key: &str| env.get(key).map(|v| v.to_string());

        let opts = run_opts(parse_from(args(&[]), lookup).unwrap());
        assert_eq!(opts.rules, Some(vec![RuleId::CONTAINS_NUMBER]));
        assert_eq!(opts.min_characters, Some(3));
        assert!(opts.show_errors);
        assert!(opts.stdin);

        let opts = run_opts(parse_from(args(&["--min-characters=9"]), lookup).unwrap());
        assert_eq!(opts.min_characters, Some(9));
    }

    #[test]
    fn invalid_env_number_is_ignored() {
        let lookup = |key: &str| (key == "PASSFIELD_DEMO_MIN_CHARACTERS").then(|| "x".to_string());
        let opts = run_opts(parse_from(args(&[]), lookup).unwrap());
        assert!(opts.min_characters.is_none());
    }

    #[test]
    fn input_config_defaults_to_login_form() {
        let config = Opts::default().input_config().unwrap();
        assert_eq!(config, LoginForm::default_config());
    }

    #[test]
    fn input_config_applies_overrides() {
        let opts = Opts {
            rules: Some(vec![RuleId::LONG_ENOUGH]),
            min_characters: Some(4),
            show_errors: true,
            ..Opts::default()
        };
        let config = opts.input_config().unwrap();
        assert_eq!(config.rules, vec![RuleId::LONG_ENOUGH]);
        assert_eq!(config.min_characters, 4);
        assert!(config.show_error_display);
        assert_eq!(config.kind, InputKind::Password);
    }

    #[test]
    fn parse_config_json() {
        let config = parse_config(r#"{"kind": "password", "rules": ["LONG_ENOUGH"], "mask_char": "*"}"#)
            .unwrap();
        assert_eq!(config.kind, InputKind::Password);
        assert_eq!(config.mask_char, '*');
        assert_eq!(config.min_characters, 8);

        assert!(matches!(parse_config("{not json"), Err(DemoError::Config(_))));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, DemoError::Io(_)));
    }
}
