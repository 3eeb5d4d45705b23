//! # ethscan-cli
//!
//! Command-line interface for the Etherscan block explorer API.
//!
//! ## Usage
//!
//! ```bash
//! # Account commands
//! ethscan account balance 0xddbd2b932c763ba5b1b7ae3b362eac3e8d40121a
//! ethscan account txs 0xddbd2b932c763ba5b1b7ae3b362eac3e8d40121a --page 1 --offset 10
//! ethscan account token-balance 0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2 0x...
//!
//! # Blocks, logs, contracts
//! ethscan block reward 2165403
//! ethscan logs --from-block 379224 --address 0x33990122638b9132ca29c723bdf037f1a891a70c
//! ethscan contract abi 0xBB9bc244D798123fDe783fCc1C72d3Bb8C189413
//!
//! # Stats
//! ethscan stats supply
//! ethscan stats price
//!
//! # Persist settings
//! ethscan config --set-network rinkeby --set-api-key YOUR-KEY
//! ```

use clap::{Parser, Subcommand};
use ethscan_sdk::Network;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Etherscan CLI
#[derive(Parser, Debug)]
#[command(name = "ethscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Network to query (mainnet, ropsten, kovan, rinkeby)
    #[arg(long, global = true)]
    network: Option<String>,

    /// API key, overrides the configured one
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Account balances and transaction history
    #[command(subcommand)]
    Account(commands::account::AccountCommand),
    /// Block rewards
    #[command(subcommand)]
    Block(commands::block::BlockCommand),
    /// Query event logs
    Logs(commands::logs::LogsCommand),
    /// Verified contract data
    #[command(subcommand)]
    Contract(commands::contract::ContractCommand),
    /// Supply and price statistics
    #[command(subcommand)]
    Stats(commands::stats::StatsCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the default network
        #[arg(long)]
        set_network: Option<String>,
        /// Set the API key
        #[arg(long)]
        set_api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    init_tracing(&cli.log_level)?;

    let mut config = Config::load();

    // Flags override the config file
    if let Some(network) = &cli.network {
        config.network = network.parse()?;
    }
    if let Some(key) = cli.api_key {
        config.api_key = Some(key);
    }

    match cli.command {
        Commands::Account(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Block(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Logs(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Contract(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Stats(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Config {
            show,
            set_network,
            set_api_key,
        } => handle_config(show, set_network, set_api_key, cli.json),
    }
}

fn init_tracing(level: &str) -> Result<(), CliError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| CliError::InvalidInput(format!("log level {:?}: {}", level, e)))?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn handle_config(
    show: bool,
    set_network: Option<String>,
    set_api_key: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    // Edit the stored file, not the flag-overridden view
    let mut config = Config::load();
    let mut modified = false;

    if let Some(network) = set_network {
        config.network = network.parse::<Network>()?;
        modified = true;
    }

    if let Some(key) = set_api_key {
        config.api_key = Some(key);
        modified = true;
    }

    if modified {
        let path = config.save()?;
        tracing::debug!("configuration written to {}", path.display());
        Output::new(json)
            .field("status", "saved")
            .field("path", &path.display().to_string())
            .message("Configuration saved")
            .print();
    } else if show {
        let key_state = if config.api_key.is_some() { "set" } else { "not set" };
        Output::new(json)
            .field("network", config.network.name())
            .field("endpoint", config.network.endpoint())
            .field("api_key", key_state)
            .field_u64("timeout_secs", config.timeout_secs)
            .message(&format!(
                "Network: {}\nEndpoint: {}\nAPI key: {}\nTimeout: {}s",
                config.network,
                config.network.endpoint(),
                key_state,
                config.timeout_secs
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-network/--set-api-key to modify")
            .print();
    }

    Ok(())
}
