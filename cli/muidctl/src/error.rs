//! Error handling and display for the CLI.

use colored::Colorize;
use muid::{ConfigError, MuidError};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Engine(#[from] MuidError),

    #[error("Could not parse '{0}'")]
    Unparseable(String),

    #[error("{invalid} of {total} identifiers are invalid")]
    Invalid { invalid: usize, total: usize },
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        match cli_err {
            CliError::Config(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Check the MUID_* environment variables.".yellow()
                );
            }
            CliError::Engine(MuidError::UnknownStrategy(_)) => {
                eprintln!(
                    "\n{}",
                    "Hint: Run `muid strategies` to list the available strategies.".yellow()
                );
            }
            CliError::Unparseable(_) => {
                eprintln!(
                    "\n{}",
                    "Hint: Pass --strategy if the body is ambiguous.".yellow()
                );
            }
            _ => {}
        }
    }
}
