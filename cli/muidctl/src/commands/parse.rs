//! Identifier inspection.

use anyhow::Result;
use clap::Args;
use muid::Components;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{display_option, print_output, print_single, OutputFormat};

use super::{parse_strategy, CommandContext};

#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Identifier to parse.
    muid: String,

    /// Strategy name; detected from the body when omitted.
    #[arg(long, short)]
    strategy: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ComponentsRow {
    #[tabled(rename = "Strategy")]
    strategy: String,

    #[tabled(rename = "Prefix")]
    prefix: String,

    #[tabled(rename = "Body")]
    body: String,

    #[tabled(rename = "Timestamp", display = "display_option")]
    timestamp: Option<String>,

    #[tabled(rename = "Random", display = "display_option")]
    random: Option<String>,

    #[tabled(rename = "Signature", display = "display_option")]
    signature: Option<String>,

    #[tabled(rename = "Sequence", display = "display_option")]
    sequence: Option<u64>,
}

impl From<&Components> for ComponentsRow {
    fn from(c: &Components) -> Self {
        Self {
            strategy: c.strategy().to_string(),
            prefix: c.prefix().to_string(),
            body: c.body().to_string(),
            timestamp: c.datetime().map(|dt| dt.to_rfc3339()),
            random: c.random().map(str::to_string),
            signature: c.signature().map(str::to_string),
            sequence: c.sequence(),
        }
    }
}

impl ParseCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let strategy = parse_strategy(self.strategy.as_deref())?;
        let components = ctx
            .factory
            .parse(&self.muid, strategy)
            .ok_or_else(|| CliError::Unparseable(self.muid.clone()))?;

        match ctx.format {
            OutputFormat::Table => print_output(&[ComponentsRow::from(&components)], ctx.format),
            OutputFormat::Json => print_single(&components),
        }
        Ok(())
    }
}
