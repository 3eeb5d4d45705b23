//! Client configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ScanError;

/// Network served by the explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Ethereum mainnet
    #[default]
    Mainnet,
    /// Ropsten testnet
    Ropsten,
    /// Kovan testnet
    Kovan,
    /// Rinkeby testnet
    Rinkeby,
}

impl Network {
    /// Every supported network
    pub const ALL: [Network; 4] = [
        Network::Mainnet,
        Network::Ropsten,
        Network::Kovan,
        Network::Rinkeby,
    ];

    /// Lower-case name
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Ropsten => "ropsten",
            Network::Kovan => "kovan",
            Network::Rinkeby => "rinkeby",
        }
    }

    /// API endpoint for this network
    pub fn endpoint(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://api.etherscan.io/api",
            Network::Ropsten => "https://api-ropsten.etherscan.io/api",
            Network::Kovan => "https://api-kovan.etherscan.io/api",
            Network::Rinkeby => "https://api-rinkeby.etherscan.io/api",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let supported: Vec<&str> = Network::ALL.iter().map(Network::name).collect();
                ScanError::Config(format!(
                    "Invalid network: {}. Network must be one of {}",
                    s,
                    supported.join(",")
                ))
            })
    }
}

/// Client configuration
///
/// Built once and moved into [`crate::ScanClient`]; every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Network to query
    #[serde(default)]
    pub network: Network,
    /// API key sent as `apikey`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// `User-Agent` header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Endpoint override, replaces the network's endpoint
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    format!("ethscan-rs/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            base_url: None,
        }
    }
}

impl ClientConfig {
    /// Default configuration for `network`
    pub fn new(network: Network) -> Self {
        Self {
            network,
            ..Default::default()
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the endpoint URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    ///
    /// Stored at millisecond precision; a non-zero timeout below one
    /// millisecond rounds up to one.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = if millis == 0 && !timeout.is_zero() { 1 } else { millis };
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.network.endpoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.network, Network::Mainnet);
        assert_eq!(config.endpoint(), "https://api.etherscan.io/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.starts_with("ethscan-rs/"));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("ropsten".parse::<Network>().unwrap(), Network::Ropsten);
        assert_eq!("Rinkeby".parse::<Network>().unwrap(), Network::Rinkeby);
    }

    #[test]
    fn test_unknown_network() {
        let err = "fakenet".parse::<Network>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("fakenet"));
        assert!(msg.contains("mainnet,ropsten,kovan,rinkeby"));
    }

    #[test]
    fn test_base_url_override() {
        let config = ClientConfig::new(Network::Kovan).with_base_url("http://127.0.0.1:9000/api");
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000/api");
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Duration::from_millis(500));

        let config = ClientConfig::default().with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Duration::from_millis(1));

        let config = ClientConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout_ms, 5_000);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"network":"kovan","api_key":"KEY"}"#).unwrap();
        assert_eq!(config.network, Network::Kovan);
        assert_eq!(config.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.timeout_ms, 30_000);
    }
}
