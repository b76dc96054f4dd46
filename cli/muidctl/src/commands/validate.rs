//! Identifier validation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{display_valid, print_output};

use super::{parse_strategy, CommandContext};

#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Identifiers to check.
    #[arg(required = true)]
    muids: Vec<String>,

    /// Require this prefix.
    #[arg(long, short)]
    prefix: Option<String>,

    /// Strategy name; detected per identifier when omitted.
    #[arg(long, short)]
    strategy: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct ValidityRow {
    #[tabled(rename = "MUID")]
    muid: String,

    #[tabled(rename = "Result", display = "display_valid")]
    valid: bool,
}

impl ValidateCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        let strategy = parse_strategy(self.strategy.as_deref())?;
        let rows: Vec<ValidityRow> = self
            .muids
            .iter()
            .map(|muid| ValidityRow {
                valid: ctx
                    .factory
                    .is_valid(muid, self.prefix.as_deref(), strategy),
                muid: muid.clone(),
            })
            .collect();

        print_output(&rows, ctx.format);

        let invalid = rows.iter().filter(|row| !row.valid).count();
        if invalid > 0 {
            return Err(CliError::Invalid {
                invalid,
                total: rows.len(),
            }
            .into());
        }
        Ok(())
    }
}
