//! Per-operation response parsers
//!
//! Each parser takes the raw response body, opens the envelope and maps the
//! wire records into the types in [`crate::types`].

mod account;
mod block;
mod contract;
mod logs;
mod stats;

pub use account::{parse_balance, parse_token_balance, parse_transactions};
pub use block::parse_block_reward;
pub use contract::parse_contract_abi;
pub use logs::parse_event_logs;
pub use stats::{parse_last_price, parse_token_supply, parse_total_supply};
