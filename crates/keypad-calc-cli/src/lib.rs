//! keypad-calc CLI library
//!
//! Command-line and keyboard front ends for the keypad calculator engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod interactive;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, FormatArg, InteractiveArgs, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use interactive::{key_command, run_interactive, KeyCommand, TerminalSink};
pub use output::{render_json, render_text, FrameMode, FramePrinter, OutputFormat};
pub use runner::{ScriptRunner, ScriptSource};
