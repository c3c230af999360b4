//! keypad-calc: keypad calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! keypad-calc run 12 '*' 3 =           # prints 36
//! keypad-calc run 2 pow 10 =           # prints 1024
//! echo "9 sqrt M+ C MR" | keypad-calc run
//! keypad-calc run --trace-frames -f json 1 + 2 =
//! keypad-calc interactive
//! ```

use clap::Parser;
use keypad_calc_cli::{
    run_interactive, Cli, CliConfig, CliResult, Commands, InteractiveArgs, RunArgs, ScriptRunner,
    ScriptSource, Verbosity,
};
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Run(args) => run_script(config, args),
        Commands::Interactive(args) => run_keyboard(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_count(cli.verbose)
    };

    let format = match &cli.command {
        Commands::Run(args) => args.format.into(),
        Commands::Interactive(_) => keypad_calc_cli::OutputFormat::Text,
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
        .with_format(format)
}

/// Logs go to stderr so frames on stdout stay machine-readable.
/// `RUST_LOG` wins over `-v`.
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn run_script(config: CliConfig, args: RunArgs) -> CliResult<()> {
    console::set_colors_enabled(config.use_color());
    let runner = ScriptRunner::new(config).with_trace_frames(args.trace_frames);
    let source = if args.tokens.is_empty() {
        ScriptSource::Lines(io::stdin().lock())
    } else {
        ScriptSource::Args(args.tokens)
    };
    runner.run(source, io::stdout().lock())?;
    Ok(())
}

fn run_keyboard(config: &CliConfig, args: &InteractiveArgs) -> CliResult<()> {
    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    let display = run_interactive(!args.no_help, use_color)?;
    if !config.verbosity.is_quiet() {
        println!("{}", display.current_input);
    }
    Ok(())
}
