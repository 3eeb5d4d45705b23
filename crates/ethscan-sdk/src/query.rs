//! Outbound query parameters
//!
//! Each operation has a builder that validates its inputs and returns the
//! ordered parameter list. Nothing here touches the network: a validation
//! failure is reported before a request exists.

use std::fmt;

use crate::ScanError;

/// Highest number of topic constraints the log endpoint accepts (`topic0`..`topic3`)
pub const MAX_TOPICS: usize = 4;

/// Ordered query parameters of one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Start a query for `module` / `action`
    pub fn new(module: &str, action: &str) -> Self {
        let mut query = Self::default();
        query.set("module", module);
        query.set("action", action);
        query
    }

    /// Set a parameter, replacing an earlier value for the same key in place
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    /// Value of a parameter, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `module` parameter
    pub fn module(&self) -> &str {
        self.get("module").unwrap_or_default()
    }

    /// `action` parameter
    pub fn action(&self) -> &str {
        self.get("action").unwrap_or_default()
    }

    /// Parameters in insertion order
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Boolean combinator linking a topic constraint to the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicOperator {
    /// Both topics must match
    #[default]
    And,
    /// Either topic may match
    Or,
}

impl TopicOperator {
    /// Wire spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicOperator::And => "and",
            TopicOperator::Or => "or",
        }
    }
}

impl fmt::Display for TopicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter for the event-log endpoint
///
/// Topics are positional: the Nth added topic becomes `topicN`, and its operator
/// is written as `topicN_(N+1)_opr`, linking it to the topic added after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLogFilter {
    from_block: u64,
    to_block: Option<u64>,
    address: Option<String>,
    topics: Vec<(String, String)>,
}

impl EventLogFilter {
    /// Create a filter starting at `from_block`; the range ends at the latest block
    pub fn new(from_block: u64) -> Self {
        Self {
            from_block,
            ..Default::default()
        }
    }

    /// Set the last block of the range
    pub fn to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }

    /// Only return logs emitted by this contract
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Append a topic constraint joined to the next one with AND
    pub fn add_topic(self, topic: impl Into<String>) -> Self {
        self.add_topic_with_operator(topic, TopicOperator::And)
    }

    /// Append a topic constraint joined to the next one with `op`
    pub fn add_topic_with_operator(mut self, topic: impl Into<String>, op: TopicOperator) -> Self {
        let position = self.topics.len() / 2;
        self.topics.push((format!("topic{}", position), topic.into()));
        self.topics.push((
            format!("topic{}_{}_opr", position, position + 1),
            op.as_str().to_string(),
        ));
        self
    }

    /// First block of the range
    pub fn from_block_number(&self) -> u64 {
        self.from_block
    }

    /// Number of topic constraints added so far
    pub fn topic_count(&self) -> usize {
        self.topics.len() / 2
    }

    /// Encoded topic entries, in the order they were added
    pub fn topic_params(&self) -> &[(String, String)] {
        &self.topics
    }

    fn validate(&self) -> Result<(), ScanError> {
        if self.from_block == 0 {
            return Err(ScanError::validation("from block required"));
        }
        if let Some(to) = self.to_block {
            if to < self.from_block {
                return Err(ScanError::validation(format!(
                    "to block {} is before from block {}",
                    to, self.from_block
                )));
            }
        }
        if self.address.as_deref().map_or(true, str::is_empty) && self.topics.is_empty() {
            return Err(ScanError::validation("address or topics required"));
        }
        if let Some(address) = &self.address {
            check_address(address)?;
        }
        if self.topic_count() > MAX_TOPICS {
            return Err(ScanError::validation(format!(
                "at most {} topics supported, got {}",
                MAX_TOPICS,
                self.topic_count()
            )));
        }
        Ok(())
    }
}

/// Reject addresses that are not `0x`-prefixed
pub fn check_address(address: &str) -> Result<(), ScanError> {
    if !address.starts_with("0x") {
        return Err(ScanError::validation(format!(
            "address must begin with 0x: {:?}",
            address
        )));
    }
    Ok(())
}

fn check_page(page: u32) -> Result<(), ScanError> {
    if page == 0 {
        return Err(ScanError::validation("page param must be >= 1"));
    }
    Ok(())
}

/// `account/balance`
pub fn balance(address: &str) -> Result<Query, ScanError> {
    check_address(address)?;
    let mut query = Query::new("account", "balance");
    query.set("tag", "latest").set("address", address);
    Ok(query)
}

/// `account/tokenbalance`
pub fn token_balance(contract: &str, address: &str) -> Result<Query, ScanError> {
    check_address(contract)?;
    check_address(address)?;
    let mut query = Query::new("account", "tokenbalance");
    query
        .set("contractaddress", contract)
        .set("address", address)
        .set("tag", "latest");
    Ok(query)
}

/// Which transaction listing to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxListKind {
    /// Plain value transfers (`txlist`)
    Normal,
    /// ERC-20 token transfers (`tokentx`)
    TokenTransfers,
    /// Transfers executed by contract code (`txlistinternal`)
    Internal,
}

impl TxListKind {
    fn action(&self) -> &'static str {
        match self {
            TxListKind::Normal => "txlist",
            TxListKind::TokenTransfers => "tokentx",
            TxListKind::Internal => "txlistinternal",
        }
    }
}

/// `account/txlist` and friends, newest first
pub fn transactions(
    kind: TxListKind,
    address: &str,
    page: u32,
    offset: u32,
) -> Result<Query, ScanError> {
    check_address(address)?;
    check_page(page)?;
    let mut query = Query::new("account", kind.action());
    query
        .set("address", address)
        .set("sort", "desc")
        .set("page", page.to_string())
        .set("offset", offset.to_string());
    Ok(query)
}

/// `block/getblockreward`
pub fn block_reward(block: u64) -> Query {
    let mut query = Query::new("block", "getblockreward");
    query.set("blockno", block.to_string());
    query
}

/// `logs/getLogs`
pub fn event_logs(filter: &EventLogFilter) -> Result<Query, ScanError> {
    filter.validate()?;
    let mut query = Query::new("logs", "getLogs");
    query.set("fromBlock", filter.from_block.to_string());
    match filter.to_block {
        Some(to) => query.set("toBlock", to.to_string()),
        None => query.set("toBlock", "latest"),
    };
    if let Some(address) = &filter.address {
        query.set("address", address.as_str());
    }
    for (key, value) in &filter.topics {
        query.set(key, value.as_str());
    }
    Ok(query)
}

/// `contract/getabi`
pub fn contract_abi(address: &str) -> Result<Query, ScanError> {
    check_address(address)?;
    let mut query = Query::new("contract", "getabi");
    query.set("address", address);
    Ok(query)
}

/// `stats/ethsupply`
pub fn total_supply() -> Query {
    Query::new("stats", "ethsupply")
}

/// `stats/tokensupply`
pub fn token_supply(contract: &str) -> Result<Query, ScanError> {
    check_address(contract)?;
    let mut query = Query::new("stats", "tokensupply");
    query.set("contractaddress", contract);
    Ok(query)
}

/// `stats/ethprice`
pub fn last_price() -> Query {
    Query::new("stats", "ethprice")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xddbd2b932c763ba5b1b7ae3b362eac3e8d40121a";

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_topic_encoding_is_pairwise_and_ordered() {
        let filter = EventLogFilter::new(1)
            .add_topic("1")
            .add_topic_with_operator("2", TopicOperator::Or)
            .add_topic("3");

        assert_eq!(filter.topic_count(), 3);
        assert_eq!(
            filter.topic_params(),
            pairs(&[
                ("topic0", "1"),
                ("topic0_1_opr", "and"),
                ("topic1", "2"),
                ("topic1_2_opr", "or"),
                ("topic2", "3"),
                ("topic2_3_opr", "and"),
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_event_logs_query() {
        let filter = EventLogFilter::new(379224)
            .address("0x33990122638b9132ca29c723bdf037f1a891a70c")
            .add_topic("0xf63780e752c6a54a94fc52715dbc5518a3b4c3c2833d301a204226548a2a8545");
        let query = event_logs(&filter).unwrap();
        assert_eq!(query.module(), "logs");
        assert_eq!(query.action(), "getLogs");
        assert_eq!(query.get("fromBlock"), Some("379224"));
        assert_eq!(query.get("toBlock"), Some("latest"));
        assert_eq!(
            query.get("address"),
            Some("0x33990122638b9132ca29c723bdf037f1a891a70c")
        );
        assert_eq!(query.get("topic0_1_opr"), Some("and"));
    }

    #[test]
    fn test_event_logs_explicit_to_block() {
        let filter = EventLogFilter::new(10).to_block(20).add_topic("0x01");
        let query = event_logs(&filter).unwrap();
        assert_eq!(query.get("toBlock"), Some("20"));
        assert_eq!(query.get("address"), None);
    }

    #[test]
    fn test_event_logs_rejects_zero_from_block() {
        let filter = EventLogFilter::new(0).address(ADDR);
        assert!(event_logs(&filter).unwrap_err().is_validation());
    }

    #[test]
    fn test_event_logs_requires_address_or_topic() {
        let err = event_logs(&EventLogFilter::new(5)).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: address or topics required");
    }

    #[test]
    fn test_event_logs_rejects_inverted_range() {
        let filter = EventLogFilter::new(10).to_block(9).address(ADDR);
        assert!(event_logs(&filter).unwrap_err().is_validation());
    }

    #[test]
    fn test_event_logs_topic_limit() {
        let mut filter = EventLogFilter::new(1);
        for i in 0..MAX_TOPICS {
            filter = filter.add_topic(format!("0x{:02x}", i));
        }
        assert!(event_logs(&filter).is_ok());
        let filter = filter.add_topic("0xff");
        assert!(event_logs(&filter).unwrap_err().is_validation());
    }

    #[test]
    fn test_balance_query() {
        let query = balance(ADDR).unwrap();
        assert_eq!(
            query.params(),
            pairs(&[
                ("module", "account"),
                ("action", "balance"),
                ("tag", "latest"),
                ("address", ADDR),
            ])
            .as_slice()
        );
    }

    #[test]
    fn test_address_prefix_required() {
        assert!(balance("ddbd2b932c763ba5b1b7ae3b362eac3e8d40121a")
            .unwrap_err()
            .is_validation());
        assert!(contract_abi("").unwrap_err().is_validation());
        assert!(token_supply("abc").unwrap_err().is_validation());
    }

    #[test]
    fn test_transactions_query() {
        let query = transactions(TxListKind::Normal, ADDR, 2, 10).unwrap();
        assert_eq!(query.action(), "txlist");
        assert_eq!(query.get("sort"), Some("desc"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("offset"), Some("10"));

        let query = transactions(TxListKind::Internal, ADDR, 1, 10).unwrap();
        assert_eq!(query.action(), "txlistinternal");
        let query = transactions(TxListKind::TokenTransfers, ADDR, 1, 10).unwrap();
        assert_eq!(query.action(), "tokentx");
    }

    #[test]
    fn test_transactions_rejects_page_zero() {
        let err = transactions(TxListKind::Normal, ADDR, 0, 10).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_block_reward_query() {
        let query = block_reward(2165403);
        assert_eq!(query.module(), "block");
        assert_eq!(query.get("blockno"), Some("2165403"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut query = Query::new("stats", "ethprice");
        query.set("action", "ethsupply");
        assert_eq!(query.params().len(), 2);
        assert_eq!(query.action(), "ethsupply");
    }
}
