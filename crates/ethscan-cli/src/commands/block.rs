//! Block commands

use clap::Subcommand;

use super::{client, format_units, ETHER_DECIMALS};
use crate::{config::Config, output::Output, CliError};

/// Block subcommands
#[derive(Debug, Subcommand)]
pub enum BlockCommand {
    /// Show the mining reward of a block
    Reward {
        /// Block number
        number: u64,
    },
}

impl BlockCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            BlockCommand::Reward { number } => block_reward(config, number, json).await,
        }
    }
}

async fn block_reward(config: &Config, number: u64, json: bool) -> Result<(), CliError> {
    let reward = client(config)?.block_reward(number).await?;

    let mut out = Output::new(json)
        .field_json("block", &reward)?
        .message(&format!(
            "Block {} mined by {}: {} ETH ({} uncles)",
            reward.block_number,
            reward.block_miner,
            format_units(&reward.block_reward, ETHER_DECIMALS),
            reward.uncles.len()
        ));
    for uncle in &reward.uncles {
        out = out.line(format!(
            "  uncle #{} {}: {} ETH",
            uncle.uncle_position,
            uncle.miner,
            format_units(&uncle.block_reward, ETHER_DECIMALS)
        ));
    }
    out.print();

    Ok(())
}
