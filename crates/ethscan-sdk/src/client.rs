//! ScanClient - main API client

use bytes::Bytes;
use num_bigint::BigUint;
use url::Url;

use crate::config::ClientConfig;
use crate::parse;
use crate::query::{self, EventLogFilter, Query, TxListKind};
use crate::transport::{ApiRequest, MockTransport, Transport};
use crate::types::{BlockReward, EventLog, PriceQuote, Transaction};
use crate::ScanError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Explorer API client
///
/// Holds read-only configuration and a transport. Methods take `&self` and keep
/// no per-call state, so one client can serve concurrent callers.
pub struct ScanClient {
    transport: Box<dyn Transport>,
    config: ClientConfig,
}

impl ScanClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn new(config: ClientConfig) -> Result<Self, ScanError> {
        Self::with_transport(config, HttpTransport::new())
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self {
            transport: Box::new(MockTransport::new()),
            config: ClientConfig::default(),
        }
    }

    /// Create a client with a custom transport
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ScanError> {
        // endpoint override must be a valid URL
        Url::parse(config.endpoint())?;
        Ok(Self {
            transport: Box::new(transport),
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Turn validated query parameters into a request description
    pub fn build_request(&self, query: &Query) -> Result<ApiRequest, ScanError> {
        if query.module().is_empty() {
            return Err(ScanError::validation("missing required parameter: module"));
        }
        if query.action().is_empty() {
            return Err(ScanError::validation("missing required parameter: action"));
        }

        let mut url = Url::parse(self.config.endpoint())?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.params() {
                pairs.append_pair(key, value);
            }
            if let Some(key) = &self.config.api_key {
                if query.get("apikey").is_none() {
                    pairs.append_pair("apikey", key);
                }
            }
        }

        Ok(ApiRequest {
            method: "GET",
            url,
            user_agent: self.config.user_agent.clone(),
            timeout: self.config.timeout(),
        })
    }

    /// Helper method to send a query and return the raw body
    async fn send(&self, query: Query) -> Result<Bytes, ScanError> {
        let request = self.build_request(&query)?;
        tracing::debug!(
            module = query.module(),
            action = query.action(),
            url = %request.redacted_url(),
            "dispatching explorer request"
        );
        self.transport.execute(&request).await
    }

    // ==================== Account Queries ====================

    /// Get the balance of an address, in wei
    pub async fn balance(&self, address: &str) -> Result<BigUint, ScanError> {
        let body = self.send(query::balance(address)?).await?;
        parse::parse_balance(&body)
    }

    /// Get the balance an address holds of an ERC-20 token, in base units
    pub async fn token_balance(&self, contract: &str, address: &str) -> Result<BigUint, ScanError> {
        let body = self.send(query::token_balance(contract, address)?).await?;
        parse::parse_token_balance(&body)
    }

    /// List transactions to/from an address, newest first
    pub async fn transactions(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, ScanError> {
        self.list(TxListKind::Normal, address, page, offset).await
    }

    /// List ERC-20 transfers to/from an address, newest first
    pub async fn token_transfers(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, ScanError> {
        self.list(TxListKind::TokenTransfers, address, page, offset).await
    }

    /// List internal transactions to/from an address, newest first
    pub async fn internal_transactions(
        &self,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, ScanError> {
        self.list(TxListKind::Internal, address, page, offset).await
    }

    async fn list(
        &self,
        kind: TxListKind,
        address: &str,
        page: u32,
        offset: u32,
    ) -> Result<Vec<Transaction>, ScanError> {
        let body = self
            .send(query::transactions(kind, address, page, offset)?)
            .await?;
        parse::parse_transactions(&body)
    }

    // ==================== Block Queries ====================

    /// Get the reward paid for a block
    pub async fn block_reward(&self, block: u64) -> Result<BlockReward, ScanError> {
        let body = self.send(query::block_reward(block)).await?;
        parse::parse_block_reward(&body)
    }

    // ==================== Logs ====================

    /// Get event logs matching a filter
    pub async fn event_logs(&self, filter: &EventLogFilter) -> Result<Vec<EventLog>, ScanError> {
        let body = self.send(query::event_logs(filter)?).await?;
        parse::parse_event_logs(&body)
    }

    // ==================== Contracts ====================

    /// Get the raw, undecoded ABI of a verified contract
    pub async fn contract_abi(&self, address: &str) -> Result<String, ScanError> {
        let body = self.send(query::contract_abi(address)?).await?;
        parse::parse_contract_abi(&body)
    }

    // ==================== Stats ====================

    /// Get the total supply of ether, in wei
    pub async fn total_supply(&self) -> Result<BigUint, ScanError> {
        let body = self.send(query::total_supply()).await?;
        parse::parse_total_supply(&body)
    }

    /// Get the total supply of an ERC-20 token, in base units
    pub async fn token_supply(&self, contract: &str) -> Result<BigUint, ScanError> {
        let body = self.send(query::token_supply(contract)?).await?;
        parse::parse_token_supply(&body)
    }

    /// Get the last ether price
    pub async fn last_price(&self) -> Result<PriceQuote, ScanError> {
        let body = self.send(query::last_price()).await?;
        parse::parse_last_price(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;

    #[tokio::test]
    async fn test_client_mock_balance() {
        let client = ScanClient::new_mock();
        let balance = client
            .balance("0x5A0b54D5dc17e0AadC383d2db43B0a0D3E029c4c")
            .await
            .unwrap();
        assert_eq!(balance, BigUint::from(1_000_000_000_000_000_000u64)); // 1 ETH
    }

    #[tokio::test]
    async fn test_client_mock_total_supply() {
        let client = ScanClient::new_mock();
        let total = client.total_supply().await.unwrap();
        assert_eq!(total.to_string(), "102935195936600000000000000");
    }

    #[tokio::test]
    async fn test_client_mock_last_price() {
        let client = ScanClient::new_mock();
        let quote = client.last_price().await.unwrap();
        assert_eq!(quote.eth_usd_timestamp, 1541092064);
    }

    #[test]
    fn test_build_request() {
        let config = ClientConfig::default().with_api_key("test123");
        let client = ScanClient::with_transport(config, MockTransport::new()).unwrap();
        let mut q = Query::new("account", "balance");
        q.set("address", "0x123");

        let req = client.build_request(&q).unwrap();
        let url = req.url.to_string();
        assert_eq!(req.method, "GET");
        assert!(url.starts_with("https://api.etherscan.io/api?"));
        assert!(url.contains("module=account"));
        assert!(url.contains("action=balance"));
        assert!(url.contains("apikey=test123"));
        assert!(url.contains("address=0x123"));
        assert!(req.user_agent.starts_with("ethscan-rs/"));
    }

    #[test]
    fn test_build_request_without_key() {
        let client = ScanClient::new_mock();
        let req = client.build_request(&query::total_supply()).unwrap();
        assert_eq!(req.param("apikey"), None);
    }

    #[test]
    fn test_build_request_requires_module_and_action() {
        let client = ScanClient::new_mock();
        let err = client.build_request(&Query::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_network_endpoint() {
        let client =
            ScanClient::with_transport(ClientConfig::new(Network::Ropsten), MockTransport::new())
                .unwrap();
        let req = client.build_request(&query::last_price()).unwrap();
        assert_eq!(req.url.host_str(), Some("api-ropsten.etherscan.io"));
    }

    #[test]
    fn test_bad_base_url() {
        let config = ClientConfig::default().with_base_url("not a url");
        let err = ScanClient::with_transport(config, MockTransport::new()).err().unwrap();
        assert!(matches!(err, ScanError::Config(_)));
    }
}
