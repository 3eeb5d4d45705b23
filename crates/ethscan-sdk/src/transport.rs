//! Transport layer for API requests

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;

use crate::ScanError;

/// Fully-formed outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method; always `GET` for this API
    pub method: &'static str,
    /// Target URL including the encoded query string
    pub url: Url,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Deadline for the whole round trip
    pub timeout: Duration,
}

impl ApiRequest {
    /// Value of a query parameter
    pub fn param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// URL with the API key masked, for logs
    pub fn redacted_url(&self) -> String {
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "apikey" { "***".to_string() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

/// Transport trait for executing requests (object-safe)
///
/// Implementations own retries, TLS and pooling. Cancelling a call is done by
/// dropping its future.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a request and return the raw response body
    async fn execute(&self, request: &ApiRequest) -> Result<Bytes, ScanError>;
}

/// Mock transport for testing
///
/// Answers from canned bodies keyed by `module/action` and records every
/// request it receives.
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Bytes>>>,
    default_responses: Arc<Mutex<HashMap<String, Bytes>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "account/balance".to_string(),
            ok_body("\"1000000000000000000\""), // 1 ETH
        );
        defaults.insert(
            "stats/ethsupply".to_string(),
            ok_body("\"102935195936600000000000000\""),
        );
        defaults.insert(
            "stats/ethprice".to_string(),
            ok_body(
                r#"{"ethbtc":"0.03118","ethbtc_timestamp":"1541092070","ethusd":"197.48","ethusd_timestamp":"1541092064"}"#,
            ),
        );

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set the response body for `module/action`
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, endpoint: &str, body: impl Into<Bytes>) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(endpoint.to_string(), body.into());
    }

    /// Clear custom responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }

    /// Requests received so far, oldest first
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .expect("MockTransport mutex poisoned")
            .clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MockTransport {
    /// Clones share responses and the request log
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            default_responses: Arc::clone(&self.default_responses),
            requests: Arc::clone(&self.requests),
        }
    }
}

fn ok_body(result: &str) -> Bytes {
    Bytes::from(format!(
        r#"{{"status":"1","message":"OK","result":{}}}"#,
        result
    ))
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Bytes, ScanError> {
        self.requests
            .lock()
            .map_err(|_| ScanError::Transport("MockTransport mutex poisoned".to_string()))?
            .push(request.clone());

        let key = format!(
            "{}/{}",
            request.param("module").unwrap_or_default(),
            request.param("action").unwrap_or_default()
        );

        // Check custom responses first
        let custom_response = self
            .responses
            .lock()
            .map_err(|_| ScanError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&key)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        // Fall back to defaults
        let default_response = self
            .default_responses
            .lock()
            .map_err(|_| ScanError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&key)
            .cloned();

        default_response.ok_or_else(|| ScanError::Transport(format!("no mock response for {}", key)))
    }
}

/// HTTP transport backed by `reqwest`
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport on top of an existing `reqwest` client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<Bytes, ScanError> {
        let response = self
            .client
            .get(request.url.clone())
            .header(reqwest::header::USER_AGENT, request.user_agent.as_str())
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| ScanError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScanError::Transport(format!("HTTP status {}", status)));
        }

        response
            .bytes()
            .await
            .map_err(|e| ScanError::Transport(e.to_string()))
    }
}
