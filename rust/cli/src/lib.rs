//! # Pachisim CLI Library
//!
//! This library provides the command-line interface for the pachisim
//! pachislot engine. It exposes subcommands for playing interactive
//! sessions, running batch spin simulations, and inspecting configuration.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["pachisim", "sim", "--spins", "100", "--seed", "42"];
//! let code = pachisim_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Interactive session driven by stdin command tokens
//! - `sim`: Scripted launch-flow session with summary and JSONL records
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod ui;

use cli::{Commands, PachiCli};

use commands::{handle_cfg_command, handle_play_command, handle_sim_command};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate
/// subcommand handler.
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
    const COMMANDS: &[&str] = &["play", "sim", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = PachiCli::try_parse_from(&argv);
    match parsed {
        Err(e) => {
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
                    // Print clap error first
                    if writeln!(err, "{}", e).is_err()
                        || writeln!(err).is_err()
                        || writeln!(err, "Pachisim CLI").is_err()
                        || writeln!(err, "Usage: pachisim <command> [options]\n").is_err()
                        || writeln!(err, "Commands:").is_err()
                    {
                        return exit_code::ERROR;
                    }
                    for c in COMMANDS {
                        if writeln!(err, "  {}", c).is_err() {
                            return exit_code::ERROR;
                        }
                    }
                    if writeln!(err, "\nFor full help, run: pachisim --help").is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            }
        }
        Ok(cli) => match cli.cmd {
            Commands::Play { balls, seed } => {
                // Use stdin for real input (supports both TTY and piped stdin)
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                match handle_play_command(balls, seed, out, err, &mut stdin_lock) {
                    Ok(()) => exit_code::SUCCESS,
                    Err(e) => {
                        if writeln!(err, "Error: {}", e).is_err() {
                            return exit_code::ERROR;
                        }
                        exit_code::ERROR
                    }
                }
            }
            Commands::Sim {
                spins,
                seed,
                output,
            } => match handle_sim_command(spins, seed, output, out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
            Commands::Cfg => match handle_cfg_command(out, err) {
                Ok(()) => exit_code::SUCCESS,
                Err(e) => {
                    if writeln!(err, "Error: {}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::ERROR
                }
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_help_exits_zero_on_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["pachisim", "--help"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(String::from_utf8(out).unwrap().contains("pachisim"));
    }

    #[test]
    fn test_unknown_command_exits_two_with_usage() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["pachisim", "nonsense"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
        let errors = String::from_utf8(err).unwrap();
        assert!(errors.contains("Usage: pachisim"));
        assert!(errors.contains("sim"));
    }

    #[test]
    #[serial]
    fn test_sim_subcommand_runs_end_to_end() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(
            ["pachisim", "sim", "--spins", "20", "--seed", "3"],
            &mut out,
            &mut err,
        );
        assert_eq!(code, exit_code::SUCCESS);
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("sim: spins=20 seed=3"));
    }

    #[test]
    #[serial]
    fn test_sim_rejects_zero_spins() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["pachisim", "sim", "--spins", "0"], &mut out, &mut err);
        assert_eq!(code, exit_code::ERROR);
    }

    #[test]
    #[serial]
    fn test_cfg_subcommand_prints_json() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(["pachisim", "cfg"], &mut out, &mut err);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(String::from_utf8(out).unwrap().contains("init_balls"));
    }
}
