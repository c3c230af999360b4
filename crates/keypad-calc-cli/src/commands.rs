//! CLI command definitions using clap

use crate::config::ColorChoice;
use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// keypad-calc: drive the keypad calculator from a script or the keyboard
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys from a script and print the display
    ///
    /// Tokens are key names (`7`, `+`, `=`), multi-digit literals (`123`,
    /// `4.5`), button actions (`sqrt`, `memory-add`) or aliases (`C`, `CE`,
    /// `MR`, `M+`, `neg`, `bs`, `pow`). With no tokens, stdin is read line
    /// by line.
    Run(RunArgs),

    /// Use the calculator from the keyboard
    Interactive(InteractiveArgs),
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Key tokens to press, in order
    #[arg(allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Print every display frame, not just the last one
    #[arg(long)]
    pub trace_frames: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the interactive command
#[derive(Parser, Debug)]
pub struct InteractiveArgs {
    /// Hide the key help line
    #[arg(long)]
    pub no_help: bool,
}

/// Frame output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum FormatArg {
    /// Display lines
    #[default]
    Text,
    /// One JSON object per frame
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color choice argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
