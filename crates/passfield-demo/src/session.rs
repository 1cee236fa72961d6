#![forbid(unsafe_code)]

//! Demo front ends: line mode over any reader/writer, and the interactive
//! terminal.

use std::io::{self, BufRead, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self as cte, DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste,
    EnableFocusChange, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use passfield_input::Event;

use crate::error::DemoError;
use crate::login_form::LoginForm;

/// Feed each input line to `form` as one value change and write the
/// rendered checklist after it.
///
/// Returns the number of lines processed.
pub fn run_lines<R, W>(form: &mut LoginForm, reader: R, mut writer: W) -> Result<usize, DemoError>
where
    R: BufRead,
    W: Write,
{
    let mut count = 0;
    for line in reader.lines() {
        let line = line?;
        let password = line.strip_suffix('\r').unwrap_or(&line);
        form.set_password(password);
        count += 1;

        tracing::debug!(
            line = count,
            complete = form.is_complete(),
            "password checked"
        );

        for visible in form.input().visible_errors() {
            writeln!(writer, "  ! {visible}")?;
        }
        for item in form.checklist().lines() {
            writeln!(writer, "{item}")?;
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(count)
}

/// Restores the terminal when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableBracketedPaste,
            EnableFocusChange
        )?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableBracketedPaste,
            Show,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the form in the terminal until Esc or Ctrl+C.
pub fn run_interactive(form: &mut LoginForm) -> Result<(), DemoError> {
    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    draw(&mut stdout, form)?;

    loop {
        let raw = cte::read()?;
        if is_quit(&raw) {
            tracing::info!(complete = form.is_complete(), "demo closed");
            return Ok(());
        }
        if let Some(event) = Event::from_crossterm(raw)
            && form.handle_event(&event)
        {
            draw(&mut stdout, form)?;
        }
    }
}

fn is_quit(event: &cte::Event) -> bool {
    let cte::Event::Key(key) = event else {
        return false;
    };
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn draw<W: Write>(out: &mut W, form: &LoginForm) -> io::Result<()> {
    queue!(out, Hide, Clear(ClearType::All))?;
    for (row, line) in form.render().iter().enumerate() {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(out, MoveTo(0, row), Print(line))?;
    }
    let (column, row) = form.cursor_position();
    queue!(out, MoveTo(column, row), Show)?;
    out.flush()
}
