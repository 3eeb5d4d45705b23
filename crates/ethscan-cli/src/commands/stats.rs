//! Network statistics commands

use clap::Subcommand;

use super::{client, format_units, ETHER_DECIMALS};
use crate::{config::Config, output::Output, CliError};

/// Stats subcommands
#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Total supply of ether
    Supply,
    /// Last ether price
    Price,
    /// Total supply of an ERC-20 token
    TokenSupply {
        /// Token contract address
        contract: String,
    },
}

impl StatsCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let client = client(config)?;
        match self {
            StatsCommand::Supply => {
                let supply = client.total_supply().await?;
                let eth_str = format_units(&supply, ETHER_DECIMALS);
                Output::new(json)
                    .field("supply_wei", &supply.to_string())
                    .field("supply_eth", &eth_str)
                    .message(&format!("Total supply: {} ETH", eth_str))
                    .print();
            }
            StatsCommand::Price => {
                let quote = client.last_price().await?;
                Output::new(json)
                    .field_json("price", &quote)?
                    .message(&format!(
                        "ETH/USD: {} (at {})\nETH/BTC: {} (at {})",
                        quote.eth_usd, quote.eth_usd_timestamp, quote.eth_btc, quote.eth_btc_timestamp
                    ))
                    .print();
            }
            StatsCommand::TokenSupply { contract } => {
                let supply = client.token_supply(&contract).await?;
                Output::new(json)
                    .field("contract", &contract)
                    .field("supply", &supply.to_string())
                    .message(&format!("Token supply: {}", supply))
                    .print();
            }
        }
        Ok(())
    }
}
