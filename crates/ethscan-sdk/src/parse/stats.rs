//! Supply and price statistics

use num_bigint::BigUint;
use serde::Deserialize;

use crate::coerce::{parse_biguint_strict, parse_decimal_lenient, parse_u64_lenient};
use crate::envelope::{from_result, Envelope};
use crate::types::PriceQuote;
use crate::ScanError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLastPrice {
    ethbtc: String,
    ethbtc_timestamp: String,
    ethusd: String,
    ethusd_timestamp: String,
}

/// Parse a `stats/ethsupply` response
pub fn parse_total_supply(body: &[u8]) -> Result<BigUint, ScanError> {
    let result = Envelope::open_required(body, "total supply")?;
    let raw: String = from_result(result)?;
    parse_biguint_strict("total supply", &raw)
}

/// Parse a `stats/tokensupply` response
pub fn parse_token_supply(body: &[u8]) -> Result<BigUint, ScanError> {
    let result = Envelope::open_required(body, "token supply")?;
    let raw: String = from_result(result)?;
    parse_biguint_strict("token supply", &raw)
}

/// Parse a `stats/ethprice` response
pub fn parse_last_price(body: &[u8]) -> Result<PriceQuote, ScanError> {
    let result = Envelope::open_required(body, "last price")?;
    let raw: RawLastPrice = from_result(result)?;
    Ok(PriceQuote {
        eth_btc: parse_decimal_lenient(&raw.ethbtc),
        eth_btc_timestamp: parse_u64_lenient(&raw.ethbtc_timestamp),
        eth_usd: parse_decimal_lenient(&raw.ethusd),
        eth_usd_timestamp: parse_u64_lenient(&raw.ethusd_timestamp),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    #[test]
    fn test_total_supply() {
        let body = br#"{"status":"1","message":"OK","result":"102935195936600000000000000"}"#;
        let total = parse_total_supply(body).unwrap();
        assert_eq!(total.to_string(), "102935195936600000000000000");
    }

    #[test]
    fn test_total_supply_garbage() {
        let body = br#"{"status":"1","message":"OK","result":"1e27"}"#;
        assert!(parse_total_supply(body).unwrap_err().is_field_parse());
    }

    #[test]
    fn test_last_price() {
        let body = br#"{"status":"1","message":"OK","result":{
            "ethbtc":"0.03118","ethbtc_timestamp":"1541092070",
            "ethusd":"197.48","ethusd_timestamp":"1541092064"}}"#;
        let quote = parse_last_price(body).unwrap();
        assert_eq!(quote.eth_btc, BigDecimal::from_str("0.03118").unwrap());
        assert_eq!(quote.eth_btc_timestamp, 1541092070);
        assert_eq!(quote.eth_usd, BigDecimal::from_str("197.48").unwrap());
        assert_eq!(quote.eth_usd_timestamp, 1541092064);
    }

    #[test]
    fn test_last_price_missing() {
        let body = br#"{"status":"1","message":"OK","result":null}"#;
        assert!(parse_last_price(body).unwrap_err().is_empty_result());
    }
}
