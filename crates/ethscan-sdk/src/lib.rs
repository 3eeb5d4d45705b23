//! # ethscan-sdk
//!
//! Typed Rust client for the Etherscan block explorer API.
//!
//! ## Features
//!
//! - **ScanClient**: one async method per read-only endpoint
//! - **EventLogFilter**: positional topic filters for log queries
//! - **Transport**: pluggable request execution (`reqwest` by default, mock for tests)
//! - Arbitrary-precision amounts (`BigUint`, `BigDecimal`) for every monetary field
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ethscan_sdk::{ClientConfig, Network, ScanClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new(Network::Mainnet).with_api_key("YOUR-API-KEY");
//!     let client = ScanClient::new(config)?;
//!
//!     let address = "0x5A0b54D5dc17e0AadC383d2db43B0a0D3E029c4c";
//!     let balance = client.balance(address).await?;
//!     println!("{} Balance: {} wei", address, balance);
//!
//!     for tx in client.transactions(address, 1, 10).await? {
//!         println!("{} -> {}: {}", tx.from, tx.to, tx.value);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Event Logs
//!
//! ```rust,no_run
//! use ethscan_sdk::{EventLogFilter, ScanClient, TopicOperator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScanClient::new(Default::default())?;
//!
//!     // topic0 AND (topic1 OR topic2)
//!     let filter = EventLogFilter::new(379224)
//!         .address("0x33990122638b9132ca29c723bdf037f1a891a70c")
//!         .add_topic("0xf63780e752c6a54a94fc52715dbc5518a3b4c3c2833d301a204226548a2a8545")
//!         .add_topic_with_operator(
//!             "0x72657075746174696f6e00000000000000000000000000000000000000000000",
//!             TopicOperator::Or,
//!         )
//!         .add_topic("0x000000000000000000000000d9b2f59f3b5c7b3c67047d2f03c3e8052470be92");
//!
//!     for log in client.event_logs(&filter).await? {
//!         println!("block {} tx {}", log.block_number, log.transaction_hash);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
pub mod coerce;
mod config;
pub mod envelope;
mod error;
pub mod parse;
pub mod query;
mod transport;
pub mod types;

// Re-export main types
pub use client::ScanClient;
pub use config::{ClientConfig, Network};
pub use error::{ScanError, TxError};
pub use query::{EventLogFilter, TopicOperator};
pub use transport::{ApiRequest, MockTransport};

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use types::{BlockRef, BlockReward, EventLog, InternalCall, PriceQuote, Token, Transaction, Uncle};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export numeric types for convenience
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigUint;
