//! Account endpoints: balances and transaction listings

use num_bigint::BigUint;
use serde::Deserialize;

use crate::coerce::{
    parse_biguint_lenient, parse_biguint_strict, parse_bool_lenient, parse_u64_lenient,
};
use crate::envelope::{from_result, Envelope};
use crate::types::{BlockRef, InternalCall, Token, Transaction};
use crate::{ScanError, TxError};

/// Parse an `account/balance` response
pub fn parse_balance(body: &[u8]) -> Result<BigUint, ScanError> {
    let result = Envelope::open_required(body, "balance")?;
    let raw: String = from_result(result)?;
    parse_biguint_strict("balance", &raw)
}

/// Parse an `account/tokenbalance` response
pub fn parse_token_balance(body: &[u8]) -> Result<BigUint, ScanError> {
    let result = Envelope::open_required(body, "token balance")?;
    let raw: String = from_result(result)?;
    parse_biguint_strict("token balance", &raw)
}

/// One record of `txlist`, `tokentx` or `txlistinternal`
///
/// The three listings share most fields; whatever a listing leaves out decodes
/// as an empty string.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTransaction {
    block_number: String,
    block_hash: String,
    time_stamp: String,
    hash: String,
    nonce: String,
    transaction_index: String,
    from: String,
    to: String,
    value: String,
    gas: String,
    gas_price: String,
    gas_used: String,
    cumulative_gas_used: String,
    is_error: String,
    #[serde(rename = "txreceipt_status")]
    receipt_status: String,
    input: String,
    contract_address: String,
    confirmations: String,
    token_name: String,
    token_symbol: String,
    token_decimal: String,
    #[serde(rename = "type")]
    call_type: String,
    trace_id: String,
    err_code: String,
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

impl RawTransaction {
    fn into_transaction(self) -> Transaction {
        let block = if self.block_number.is_empty() {
            None
        } else {
            Some(BlockRef {
                number: parse_u64_lenient(&self.block_number),
                hash: non_empty(self.block_hash),
            })
        };

        let token = if self.token_symbol.is_empty() {
            None
        } else {
            Some(Token {
                name: self.token_name,
                symbol: self.token_symbol,
                decimals: u32::try_from(parse_u64_lenient(&self.token_decimal)).unwrap_or(0),
            })
        };

        let internal = if self.call_type.is_empty() {
            None
        } else {
            Some(InternalCall {
                call_type: self.call_type,
                trace_id: self.trace_id,
            })
        };

        let receipt_status = if self.receipt_status.is_empty() {
            None
        } else {
            Some(parse_bool_lenient(&self.receipt_status))
        };

        Transaction {
            block,
            token,
            internal,
            timestamp: parse_u64_lenient(&self.time_stamp),
            hash: self.hash,
            nonce: parse_u64_lenient(&self.nonce),
            index: parse_u64_lenient(&self.transaction_index),
            from: self.from,
            to: self.to,
            contract_address: non_empty(self.contract_address),
            value: parse_biguint_lenient(&self.value),
            gas_limit: parse_u64_lenient(&self.gas),
            gas_used: parse_u64_lenient(&self.gas_used),
            cumulative_gas_used: parse_u64_lenient(&self.cumulative_gas_used),
            gas_price: parse_biguint_lenient(&self.gas_price),
            is_error: parse_bool_lenient(&self.is_error),
            receipt_status,
            error: non_empty(self.err_code).map(TxError::new),
            confirmations: parse_u64_lenient(&self.confirmations),
            input: self.input,
        }
    }
}

/// Parse any of the transaction listing responses
pub fn parse_transactions(body: &[u8]) -> Result<Vec<Transaction>, ScanError> {
    let result = Envelope::open(body)?;
    let records: Option<Vec<RawTransaction>> = from_result(result)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(RawTransaction::into_transaction)
        .collect())
}
