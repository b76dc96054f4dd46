//! Identifier generation.

use anyhow::Result;
use clap::Args;
use muid::{ConfigError, LengthTier};

use crate::error::CliError;
use crate::output::print_lines;

use super::{parse_strategy, CommandContext};

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Entity prefix, e.g. `usr`.
    prefix: String,

    /// Strategy name (ordered, incremental, padded).
    #[arg(long, short)]
    strategy: Option<String>,

    /// Maximum total length.
    #[arg(long, short, conflicts_with = "tier")]
    length: Option<usize>,

    /// Named length tier (tiny, small, standard).
    #[arg(long, value_parser = parse_tier)]
    tier: Option<LengthTier>,

    /// Number of identifiers to generate.
    #[arg(long, short = 'n', default_value = "1")]
    count: usize,
}

fn parse_tier(s: &str) -> Result<LengthTier, String> {
    s.parse().map_err(|e: ConfigError| e.to_string())
}

impl GenerateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let strategy = parse_strategy(self.strategy.as_deref())?;
        let max_length = self
            .length
            .or_else(|| self.tier.map(|tier| ctx.factory.config().lengths.get(tier)));

        let muids = (0..self.count)
            .map(|_| ctx.factory.generate(&self.prefix, strategy, max_length))
            .collect::<Result<Vec<_>, _>>()
            .map_err(CliError::from)?;

        print_lines(&muids, ctx.format);
        Ok(())
    }
}
