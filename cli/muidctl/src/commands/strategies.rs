//! Strategy listing.

use anyhow::Result;
use muid::Strategy;
use serde::Serialize;
use tabled::Tabled;

use crate::output::print_output;

use super::CommandContext;

#[derive(Debug, Serialize, Tabled)]
struct StrategyRow {
    #[tabled(rename = "Name")]
    name: &'static str,

    #[tabled(rename = "Default")]
    default: bool,

    #[tabled(rename = "Sequential")]
    sequential: bool,

    #[tabled(rename = "Example")]
    example: &'static str,
}

fn example(strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Ordered => "usr_0OjWdK4g7Hq2ZkP9mXbT1sVaRc3eLnQ2",
        Strategy::Incremental => "ord_42",
        Strategy::Padded => "inv_0000042",
    }
}

pub fn run(ctx: CommandContext) -> Result<()> {
    let default = ctx.factory.config().default_strategy;
    let rows: Vec<StrategyRow> = ctx
        .factory
        .available_strategies()
        .iter()
        .map(|&strategy| StrategyRow {
            name: strategy.as_str(),
            default: strategy == default,
            sequential: strategy.is_sequential(),
            example: example(strategy),
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}
