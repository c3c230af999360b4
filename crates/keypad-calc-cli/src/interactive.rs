//! Raw-mode keyboard front end

use crate::error::{CliError, CliResult};
use crate::output::render_text;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use keypad_calc::driver::{DisplaySink, Session};
use keypad_calc::engine::Display;
use keypad_calc::input::InputEvent;
use std::io::{self, Write};
use tracing::{debug, trace};

const HELP: &str = "0-9 . + - * / %   Enter =   Backspace   Esc clear   q quit";

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Leave interactive mode
    Quit,
    /// Send an event to the engine
    Input(InputEvent),
    /// Not a calculator key
    Ignore,
}

/// Maps a terminal key event.
///
/// Key releases and chords with Ctrl/Alt/Meta are ignored, except Ctrl-C.
#[must_use]
pub fn key_command(event: KeyEvent) -> KeyCommand {
    let KeyEvent {
        code,
        modifiers,
        kind,
        ..
    } = event;

    if kind == KeyEventKind::Release {
        return KeyCommand::Ignore;
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => KeyCommand::Quit,
            _ => KeyCommand::Ignore,
        };
    }
    if modifiers.intersects(KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER) {
        return KeyCommand::Ignore;
    }

    let name = match code {
        KeyCode::Char('q' | 'Q') => return KeyCommand::Quit,
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        _ => return KeyCommand::Ignore,
    };
    InputEvent::from_key(&name).map_or(KeyCommand::Ignore, KeyCommand::Input)
}

/// Draws frames at the top of an alternate screen
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    show_help: bool,
    use_color: bool,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSink<W> {
    /// Create a sink over a raw-mode terminal writer
    #[must_use]
    pub fn new(out: W, show_help: bool, use_color: bool) -> Self {
        Self {
            out,
            show_help,
            use_color,
            error: None,
        }
    }

    /// Takes the first drawing error, if any
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn draw(&mut self, display: &Display) -> io::Result<()> {
        queue!(self.out, MoveTo(0, 0), terminal::Clear(ClearType::All))?;
        for (row, line) in render_text(display, self.use_color).lines().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        if self.show_help {
            queue!(self.out, MoveTo(0, 3), Print(HELP))?;
        }
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn render(&mut self, display: &Display) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.draw(display) {
            self.error = Some(err);
        }
    }
}

/// Restores the terminal when dropped, including on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> CliResult<Self> {
        enable_raw_mode().map_err(|e| CliError::terminal(format!("cannot enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(CliError::terminal(format!("cannot enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Runs the keyboard loop until `q` or Ctrl-C
pub fn run_interactive(show_help: bool, use_color: bool) -> CliResult<Display> {
    let _guard = RawModeGuard::enter()?;
    let mut session = Session::new(TerminalSink::new(io::stdout(), show_help, use_color));

    loop {
        if let Some(err) = session.sink_mut().take_error() {
            return Err(err.into());
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        match key_command(key) {
            KeyCommand::Quit => break,
            KeyCommand::Input(input) => {
                session.handle(input);
            }
            KeyCommand::Ignore => trace!(?key, "ignored key"),
        }
    }

    debug!(memory = session.engine().memory(), "leaving interactive mode");
    Ok(session.display())
}
