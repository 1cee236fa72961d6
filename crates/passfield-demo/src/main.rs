#![forbid(unsafe_code)]

//! passfield-demo binary entry point.

use std::io;
use std::process;

use passfield_demo::cli::{self, Command, Opts};
use passfield_demo::{DemoError, LoginForm, logging, session};

fn main() {
    if let Err(e) = run() {
        eprintln!("passfield-demo: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let opts = match Opts::parse()? {
        Command::Help => {
            println!("{}", cli::HELP_TEXT);
            return Ok(());
        }
        Command::Version => {
            println!("passfield-demo {}", cli::VERSION);
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    logging::init();

    let config = opts.input_config()?;
    tracing::info!(
        kind = config.kind.as_str(),
        rules = config.rules.len(),
        min_characters = config.min_characters,
        stdin = opts.stdin,
        "starting demo"
    );
    let mut form = LoginForm::with_config(config);

    if opts.stdin {
        let stdin = io::stdin();
        let lines = session::run_lines(&mut form, stdin.lock(), io::stdout().lock())?;
        tracing::info!(lines, "line mode finished");
        Ok(())
    } else {
        session::run_interactive(&mut form)
    }
}
