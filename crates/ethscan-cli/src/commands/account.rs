//! Account commands

use clap::{Args, Subcommand};
use ethscan_sdk::Transaction;

use super::{client, format_units, ETHER_DECIMALS};
use crate::{config::Config, output::Output, CliError};

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Get the ether balance of an address
    Balance {
        /// Address to query
        address: String,
    },
    /// List normal transactions of an address
    Txs(ListArgs),
    /// List ERC-20 token transfers of an address
    TokenTxs(ListArgs),
    /// List internal transactions of an address
    InternalTxs(ListArgs),
    /// Get the ERC-20 token balance of an address
    TokenBalance {
        /// Token contract address
        contract: String,
        /// Holder address
        address: String,
    },
}

/// Paging arguments shared by the listing commands
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Address to query
    address: String,
    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Records per page
    #[arg(long, default_value_t = 10)]
    offset: u32,
}

impl AccountCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            AccountCommand::Balance { address } => get_balance(config, &address, json).await,
            AccountCommand::Txs(args) => list(config, ListKind::Normal, args, json).await,
            AccountCommand::TokenTxs(args) => list(config, ListKind::Token, args, json).await,
            AccountCommand::InternalTxs(args) => list(config, ListKind::Internal, args, json).await,
            AccountCommand::TokenBalance { contract, address } => {
                get_token_balance(config, &contract, &address, json).await
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ListKind {
    Normal,
    Token,
    Internal,
}

async fn get_balance(config: &Config, address: &str, json: bool) -> Result<(), CliError> {
    let balance = client(config)?.balance(address).await?;
    let eth_str = format_units(&balance, ETHER_DECIMALS);

    Output::new(json)
        .field("address", address)
        .field("balance_wei", &balance.to_string())
        .field("balance_eth", &eth_str)
        .message(&format!("Balance: {} ETH", eth_str))
        .print();

    Ok(())
}

async fn get_token_balance(
    config: &Config,
    contract: &str,
    address: &str,
    json: bool,
) -> Result<(), CliError> {
    let balance = client(config)?.token_balance(contract, address).await?;

    Output::new(json)
        .field("contract", contract)
        .field("address", address)
        .field("balance", &balance.to_string())
        .message(&format!("Token balance: {}", balance))
        .print();

    Ok(())
}

async fn list(config: &Config, kind: ListKind, args: ListArgs, json: bool) -> Result<(), CliError> {
    let client = client(config)?;
    let txs = match kind {
        ListKind::Normal => client.transactions(&args.address, args.page, args.offset).await?,
        ListKind::Token => {
            client
                .token_transfers(&args.address, args.page, args.offset)
                .await?
        }
        ListKind::Internal => {
            client
                .internal_transactions(&args.address, args.page, args.offset)
                .await?
        }
    };

    let mut out = Output::new(json)
        .field("address", &args.address)
        .field_u64("count", txs.len() as u64)
        .field_json("transactions", &txs)?
        .message(&format!("Found {} transactions", txs.len()));
    for tx in &txs {
        out = out.line(summarize(tx));
    }
    out.print();

    Ok(())
}

fn summarize(tx: &Transaction) -> String {
    let block = tx
        .block
        .as_ref()
        .map(|b| b.number.to_string())
        .unwrap_or_else(|| "pending".to_string());
    let amount = match &tx.token {
        Some(token) => format!("{} {}", format_units(&tx.value, token.decimals), token.symbol),
        None => format!("{} ETH", format_units(&tx.value, ETHER_DECIMALS)),
    };
    let status = if tx.is_error { " [failed]" } else { "" };
    format!("  {} {} {} -> {} {}{}", block, tx.hash, tx.from, tx.to, amount, status)
}
