//! Frame formatting and printing

use console::style;
use keypad_calc::driver::DisplaySink;
use keypad_calc::engine::Display;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Output format for display frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable display lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Which frames a [`FramePrinter`] writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameMode {
    /// Every frame as it is rendered
    Every,
    /// Only the final frame, on [`FramePrinter::finish`]
    #[default]
    Last,
}

/// Renders a frame as text: the expression line (when there is one) above
/// the operand line. The error marker is red when `use_color` is set.
#[must_use]
pub fn render_text(display: &Display, use_color: bool) -> String {
    let current = if use_color && display.is_error() {
        style(&display.current_input).red().bold().to_string()
    } else if use_color {
        style(&display.current_input).bold().to_string()
    } else {
        display.current_input.clone()
    };

    if display.expression.is_empty() {
        current
    } else if use_color {
        format!("{}\n{current}", style(&display.expression).dim())
    } else {
        format!("{}\n{current}", display.expression)
    }
}

/// Renders a frame as a single JSON line
pub fn render_json(display: &Display) -> serde_json::Result<String> {
    serde_json::to_string(display)
}

/// Display sink that prints frames to a writer
///
/// Rendering cannot fail through [`DisplaySink`], so the first write error
/// is kept and returned by [`FramePrinter::finish`].
#[derive(Debug)]
pub struct FramePrinter<W: Write> {
    out: W,
    format: OutputFormat,
    mode: FrameMode,
    use_color: bool,
    pending: Option<Display>,
    frames_written: usize,
    error: Option<io::Error>,
}

impl<W: Write> FramePrinter<W> {
    /// Create a printer
    #[must_use]
    pub fn new(out: W, format: OutputFormat, mode: FrameMode, use_color: bool) -> Self {
        Self {
            out,
            format,
            mode,
            use_color,
            pending: None,
            frames_written: 0,
            error: None,
        }
    }

    /// Number of frames written so far
    #[must_use]
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Writes the held frame (in [`FrameMode::Last`]) and hands back the writer
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(display) = self.pending.take() {
            self.write_frame(&display);
        }
        if let Some(err) = self.error {
            return Err(err);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_frame(&mut self, display: &Display) {
        if self.error.is_some() {
            return;
        }
        let line = match self.format {
            OutputFormat::Text => render_text(display, self.use_color),
            OutputFormat::Json => match render_json(display) {
                Ok(line) => line,
                Err(err) => {
                    self.error = Some(err.into());
                    return;
                }
            },
        };
        let separator = if self.format == OutputFormat::Text && self.frames_written > 0 {
            "\n"
        } else {
            ""
        };
        match writeln!(self.out, "{separator}{line}") {
            Ok(()) => self.frames_written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}

impl<W: Write> DisplaySink for FramePrinter<W> {
    fn render(&mut self, display: &Display) {
        match self.mode {
            FrameMode::Every => self.write_frame(display),
            FrameMode::Last => self.pending = Some(display.clone()),
        }
    }
}
