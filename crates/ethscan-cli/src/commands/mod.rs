//! Subcommand implementations

pub mod account;
pub mod block;
pub mod contract;
pub mod logs;
pub mod stats;

use ethscan_sdk::{BigUint, ScanClient};

use crate::{config::Config, CliError};

/// Decimals of ether amounts expressed in wei
pub const ETHER_DECIMALS: u32 = 18;

/// Build an HTTP client from the effective configuration
pub fn client(config: &Config) -> Result<ScanClient, CliError> {
    Ok(ScanClient::new(config.client_config())?)
}

/// Render an integer amount of base units with `decimals` fractional digits
///
/// Trailing zeros are trimmed and at most six fractional digits are shown.
pub fn format_units(amount: &BigUint, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = BigUint::from(10u32).pow(decimals);
    let whole = amount / &divisor;
    let remainder = amount % &divisor;

    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let shown = fraction[..fraction.len().min(6)].trim_end_matches('0');
    if shown.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units() {
        let one_eth = BigUint::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_units(&one_eth, ETHER_DECIMALS), "1");

        let half_eth = BigUint::from(500_000_000_000_000_000u64);
        assert_eq!(format_units(&half_eth, ETHER_DECIMALS), "0.5");

        let usdt = BigUint::from(1_234_567u64);
        assert_eq!(format_units(&usdt, 6), "1.234567");

        let dust = BigUint::from(1u32);
        assert_eq!(format_units(&dust, ETHER_DECIMALS), "0");

        assert_eq!(format_units(&BigUint::from(42u32), 0), "42");
    }
}
