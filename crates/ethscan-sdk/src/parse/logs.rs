//! Event log endpoint
//!
//! Unlike every other endpoint, `logs/getLogs` encodes its numbers in base 16.

use serde::Deserialize;

use crate::coerce::{parse_biguint_hex, parse_u64_hex};
use crate::envelope::{from_result, Envelope};
use crate::types::EventLog;
use crate::ScanError;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawEventLog {
    address: String,
    topics: Vec<String>,
    data: String,
    block_number: String,
    time_stamp: String,
    gas_price: String,
    gas_used: String,
    log_index: String,
    transaction_hash: String,
    transaction_index: String,
}

impl From<RawEventLog> for EventLog {
    fn from(raw: RawEventLog) -> Self {
        EventLog {
            address: raw.address,
            topics: raw.topics,
            data: raw.data,
            block_number: parse_u64_hex(&raw.block_number),
            timestamp: parse_u64_hex(&raw.time_stamp),
            gas_price: parse_biguint_hex(&raw.gas_price),
            gas_used: parse_u64_hex(&raw.gas_used),
            log_index: parse_u64_hex(&raw.log_index),
            transaction_hash: raw.transaction_hash,
            transaction_index: parse_u64_hex(&raw.transaction_index),
        }
    }
}

/// Parse a `logs/getLogs` response
pub fn parse_event_logs(body: &[u8]) -> Result<Vec<EventLog>, ScanError> {
    let result = Envelope::open(body)?;
    let records: Option<Vec<RawEventLog>> = from_result(result)?;
    Ok(records
        .unwrap_or_default()
        .into_iter()
        .map(EventLog::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn test_numbers_are_hex() {
        let body = br#"{"status":"1","message":"OK","result":[{
            "address":"0x01","topics":[],"data":"0x",
            "blockNumber":"0x10","timeStamp":"10","gasPrice":"0x0100",
            "gasUsed":"0x0","logIndex":"0x1","transactionHash":"0xaa","transactionIndex":"0xa"}]}"#;
        let log = &parse_event_logs(body).unwrap()[0];
        assert_eq!(log.block_number, 16);
        // no prefix, still base 16
        assert_eq!(log.timestamp, 16);
        assert_eq!(log.gas_price, BigUint::from(256u32));
        assert_eq!(log.log_index, 1);
        assert_eq!(log.transaction_index, 10);
    }

    #[test]
    fn test_bare_prefix_is_zero() {
        let body = br#"{"status":"1","message":"OK","result":[{"logIndex":"0x","transactionIndex":"0x"}]}"#;
        let log = &parse_event_logs(body).unwrap()[0];
        assert_eq!(log.log_index, 0);
        assert_eq!(log.transaction_index, 0);
    }

    #[test]
    fn test_null_members_do_not_fail_listing() {
        let body = br#"{"status":"1","message":"OK","result":[
            {"address":"0x01","topics":null,"data":null,"blockNumber":"0x10","gasPrice":null},
            {"address":"0x02","topics":["0xaa"],"data":"0x","blockNumber":"0x11"}]}"#;
        let logs = parse_event_logs(body).unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs[0].topics.is_empty());
        assert_eq!(logs[0].data, "");
        assert_eq!(logs[0].block_number, 16);
        assert_eq!(logs[0].gas_price, BigUint::default());
        assert_eq!(logs[1].topics, vec!["0xaa".to_string()]);
    }

    #[test]
    fn test_api_error() {
        let body = br#"{"status":"0","message":"No records found","result":[]}"#;
        match parse_event_logs(body) {
            Err(ScanError::Api { message, .. }) => assert_eq!(message, "No records found"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}
