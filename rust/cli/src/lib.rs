//! # BloodGamble CLI Library
//!
//! Command-line front end for the BloodGamble engine: play against three AI
//! seats, simulate AI-only games, inspect a deal, list the cheat catalog and
//! show the resolved configuration.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments and executes the subcommand, reading the
//! human's input from stdin. [`run_with_input`] takes the input stream
//! explicitly.
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["bloodgamble", "deal", "--seed", "42"];
//! let code = bloodgamble_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play [--seed N] [--hands N] [--no-color]`: Interactive session against the AI
//! - `sim [--seed N] [--hands N] [--json]`: AI-only games, optionally as JSON lines
//! - `deal [--seed N]`: Deal one hand face up and evaluate it
//! - `cheats`: Show the cheat catalog
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::{BufRead, Write};
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod human;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{BloodGambleCli, COMMANDS, Commands};
use commands::{
    handle_cfg_command, handle_cheats_command, handle_deal_command, handle_play_command,
    handle_sim_command,
};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, &mut stdin_lock, out, err)
}

/// [`run`] with an explicit input stream for `play`.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// let mut input = Cursor::new("q\n");
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = bloodgamble_cli::run_with_input(
///     ["bloodgamble", "play", "--seed", "3", "--no-color"],
///     &mut input,
///     &mut out,
///     &mut err,
/// );
/// assert_eq!(code, 0);
/// assert!(String::from_utf8_lossy(&out).contains("Session ended."));
/// ```
pub fn run_with_input<I, S>(
    args: I,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match BloodGambleCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    tracing::debug!(command = cli.cmd.name(), "dispatching");
    let result = match cli.cmd {
        Commands::Play {
            seed,
            hands,
            no_color,
        } => handle_play_command(seed, hands, no_color, out, err, input),
        Commands::Sim { seed, hands, json } => handle_sim_command(seed, hands, json, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Cheats => handle_cheats_command(out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            let mut usage = || -> std::io::Result<()> {
                writeln!(err, "{}", e)?;
                writeln!(err)?;
                writeln!(err, "BloodGamble CLI")?;
                writeln!(err, "Usage: bloodgamble <command> [options]\n")?;
                writeln!(err, "Commands:")?;
                for c in COMMANDS {
                    writeln!(err, "  {}", c)?;
                }
                writeln!(err, "\nFor full help, run: bloodgamble --help")
            };
            let _ = usage();
            exit_code::ERROR
        }
    }
}
