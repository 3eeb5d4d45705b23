//! Contract commands

use clap::Subcommand;

use super::client;
use crate::{config::Config, output::Output, CliError};

/// Contract subcommands
#[derive(Debug, Subcommand)]
pub enum ContractCommand {
    /// Print the ABI of a verified contract
    Abi {
        /// Contract address
        address: String,
    },
}

impl ContractCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            ContractCommand::Abi { address } => {
                let abi = client(config)?.contract_abi(&address).await?;
                let parsed: serde_json::Value = serde_json::from_str(&abi)?;

                Output::new(json)
                    .field("address", &address)
                    .field_json("abi", &parsed)?
                    .message(&abi)
                    .print();

                Ok(())
            }
        }
    }
}
