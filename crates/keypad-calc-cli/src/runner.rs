//! Script runner for the `run` command

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{FrameMode, FramePrinter};
use keypad_calc::driver::Session;
use keypad_calc::engine::Display;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Where script tokens come from
#[derive(Debug)]
pub enum ScriptSource<R: BufRead> {
    /// Tokens given on the command line
    Args(Vec<String>),
    /// Whitespace-separated tokens, read line by line
    Lines(R),
}

/// Feeds a script through a session and prints the display
#[derive(Debug)]
pub struct ScriptRunner {
    config: CliConfig,
    mode: FrameMode,
}

impl ScriptRunner {
    /// Create a runner that prints only the final display
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        Self {
            config,
            mode: FrameMode::Last,
        }
    }

    /// Print every frame instead of only the last
    #[must_use]
    pub const fn with_trace_frames(mut self, trace: bool) -> Self {
        self.mode = if trace {
            FrameMode::Every
        } else {
            FrameMode::Last
        };
        self
    }

    /// Runs the script, writing frames to `out`, and returns the final display.
    ///
    /// Stops at the first unknown token; frames printed so far stay printed.
    pub fn run<R: BufRead, W: Write>(
        &self,
        source: ScriptSource<R>,
        out: W,
    ) -> CliResult<Display> {
        let printer = FramePrinter::new(out, self.config.format, self.mode, self.config.use_color());
        let mut session = Session::new(printer);

        let fed: CliResult<()> = match source {
            ScriptSource::Args(tokens) => tokens
                .iter()
                .try_for_each(|token| session.feed_token(token).map_err(Into::into)),
            ScriptSource::Lines(reader) => Self::feed_lines(&mut session, reader),
        };

        let display = session.display();
        let engine = session.engine();
        info!(
            memory = engine.memory(),
            last_result = ?engine.last_result(),
            power_pending = engine.is_power_pending(),
            "script finished"
        );
        // Flush what was shown even when the script stopped early
        session.into_sink().finish()?;
        fed?;
        Ok(display)
    }

    fn feed_lines<R: BufRead, W: Write>(
        session: &mut Session<FramePrinter<W>>,
        reader: R,
    ) -> CliResult<()> {
        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            debug!(line = number + 1, %line, "feeding script line");
            session.feed_script(&line)?;
        }
        Ok(())
    }
}
