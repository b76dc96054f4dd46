//! CLI commands.

mod generate;
mod parse;
mod strategies;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use muid::{MuidConfig, MuidFactory, Strategy};
use tracing::debug;

use crate::error::CliError;
use crate::output::OutputFormat;

/// muid - Generate, parse, and validate prefixed identifiers.
#[derive(Debug, Parser)]
#[command(name = "muid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate new identifiers.
    Generate(generate::GenerateCommand),

    /// Break an identifier into its components.
    Parse(parse::ParseCommand),

    /// Check identifiers; exits non-zero if any is invalid.
    Validate(validate::ValidateCommand),

    /// List the available strategies.
    Strategies,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let config = MuidConfig::from_env().map_err(CliError::from)?;
        debug!(
            strategy = %config.default_strategy,
            encoding = %config.encoding,
            signed = config.signature.enabled,
            "loaded configuration"
        );
        let factory = MuidFactory::new(config).map_err(CliError::from)?;

        let ctx = CommandContext {
            factory,
            format: self.format,
        };

        match self.command {
            Commands::Generate(cmd) => cmd.run(ctx),
            Commands::Parse(cmd) => cmd.run(ctx),
            Commands::Validate(cmd) => cmd.run(ctx),
            Commands::Strategies => strategies::run(ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub factory: MuidFactory,
    pub format: OutputFormat,
}

/// Resolve an optional `--strategy` flag.
fn parse_strategy(name: Option<&str>) -> Result<Option<Strategy>> {
    name.map(|name| name.parse::<Strategy>().map_err(CliError::from))
        .transpose()
        .map_err(Into::into)
}
