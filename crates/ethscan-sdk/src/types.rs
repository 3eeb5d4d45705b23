//! SDK types
//!
//! Strict domain model produced by the parsers. Every value is owned by the
//! caller; the client keeps no reference to anything it returns.

use bigdecimal::BigDecimal;
use bytes::Bytes;
use num_bigint::BigUint;
use serde::{Serialize, Serializer};
use std::fmt::Display;

use crate::{ScanError, TxError};

/// Reward paid for a mined block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReward {
    /// Block number
    pub block_number: u64,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Address of the miner
    pub block_miner: String,
    /// Reward paid to the miner, in wei
    #[serde(serialize_with = "as_display")]
    pub block_reward: BigUint,
    /// Extra reward for including uncles, in wei
    #[serde(serialize_with = "as_display")]
    pub uncle_inclusion_reward: BigUint,
    /// Uncles referenced by this block, in wire order
    pub uncles: Vec<Uncle>,
}

/// Uncle block referenced by a canonical block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Uncle {
    /// Address of the uncle's miner
    pub miner: String,
    /// Position among the block's uncles (0-based)
    pub uncle_position: u64,
    /// Reward paid to the uncle's miner, in wei
    #[serde(serialize_with = "as_display")]
    pub block_reward: BigUint,
}

/// Contract event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventLog {
    /// Emitting contract
    pub address: String,
    /// Indexed topics, in wire order
    pub topics: Vec<String>,
    /// Non-indexed data, hex encoded
    pub data: String,
    /// Block containing the log
    pub block_number: u64,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Gas price of the emitting transaction, in wei
    #[serde(serialize_with = "as_display")]
    pub gas_price: BigUint,
    /// Gas used by the emitting transaction
    pub gas_used: u64,
    /// Index of the log within the block
    pub log_index: u64,
    /// Hash of the emitting transaction
    pub transaction_hash: String,
    /// Index of the emitting transaction within the block
    pub transaction_index: u64,
}

impl EventLog {
    /// Decode the hex data blob
    pub fn data_bytes(&self) -> Result<Bytes, ScanError> {
        decode_hex_blob(&self.data)
    }
}

/// Block a transaction was mined in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRef {
    /// Block number
    pub number: u64,
    /// Block hash; internal-transaction listings omit it
    pub hash: Option<String>,
}

/// ERC-20 token involved in a transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Token name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Number of decimal places used by this token
    pub decimals: u32,
}

/// Metadata of a value transfer executed by contract code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalCall {
    /// Call kind, e.g. `call`, `create`, `delegatecall`
    pub call_type: String,
    /// Position in the call trace, e.g. `0_1`
    pub trace_id: String,
}

/// A transaction as listed by the explorer
///
/// The optional parts are attached only when the listing carries them:
/// `block` once the transaction is mined, `token` for token-transfer listings,
/// `internal` for internal-transaction listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Containing block, once mined
    pub block: Option<BlockRef>,
    /// Token moved, for token-transfer listings
    pub token: Option<Token>,
    /// Call metadata, for internal-transaction listings
    pub internal: Option<InternalCall>,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Transaction hash
    pub hash: String,
    /// Sender nonce
    pub nonce: u64,
    /// Index of this transaction in the block
    pub index: u64,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Address of the contract created by this transaction, if any
    pub contract_address: Option<String>,
    /// Amount transferred, in wei or token base units
    #[serde(serialize_with = "as_display")]
    pub value: BigUint,
    /// Gas limit
    pub gas_limit: u64,
    /// Gas used by this transaction
    pub gas_used: u64,
    /// Gas used by the block up to and including this transaction
    pub cumulative_gas_used: u64,
    /// Gas price in wei
    #[serde(serialize_with = "as_display")]
    pub gas_price: BigUint,
    /// Execution failed
    pub is_error: bool,
    /// Receipt status, when the listing reports one
    pub receipt_status: Option<bool>,
    /// Detailed error reported for this record
    pub error: Option<TxError>,
    /// Blocks mined on top of this one
    pub confirmations: u64,
    /// Call data, hex encoded
    pub input: String,
}

impl Transaction {
    /// True once the transaction is part of a block
    pub fn is_confirmed(&self) -> bool {
        self.block.is_some()
    }

    /// Decode the hex call data
    pub fn input_bytes(&self) -> Result<Bytes, ScanError> {
        decode_hex_blob(&self.input)
    }
}

/// Last known ether price
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    /// ETH/BTC rate
    #[serde(serialize_with = "as_display")]
    pub eth_btc: BigDecimal,
    /// Unix timestamp of the ETH/BTC rate
    pub eth_btc_timestamp: u64,
    /// ETH/USD rate
    #[serde(serialize_with = "as_display")]
    pub eth_usd: BigDecimal,
    /// Unix timestamp of the ETH/USD rate
    pub eth_usd_timestamp: u64,
}

fn decode_hex_blob(s: &str) -> Result<Bytes, ScanError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(Bytes::new());
    }
    let bytes = hex::decode(s)?;
    Ok(Bytes::from(bytes))
}

// Arbitrary-precision numbers go out as decimal strings.
fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
