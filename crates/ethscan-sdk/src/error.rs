//! SDK error types

use serde::Serialize;
use thiserror::Error;

/// SDK error type
///
/// Every variant aborts the call that produced it. Problems confined to a single
/// transaction record are reported through [`TxError`] instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Malformed or missing input, raised before any request is built
    #[error("Validation error: {0}")]
    Validation(String),

    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-success status
    #[error("API error: {message}")]
    Api {
        /// Upstream `message` field, verbatim
        message: String,
        /// Upstream `result` text, when the API put an explanation there
        detail: Option<String>,
    },

    /// Success status, but the payload the operation needs is absent
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// A load-bearing numeric field could not be parsed
    #[error("Could not parse {field}: {value:?}")]
    FieldParse {
        /// Wire name of the field
        field: &'static str,
        /// Offending raw value
        value: String,
    },

    /// Response body is not the expected JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid client configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl ScanError {
    /// Build a validation error
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ScanError::Validation(msg.into())
    }

    /// Returns true for input validation failures
    pub fn is_validation(&self) -> bool {
        matches!(self, ScanError::Validation(_))
    }

    /// Returns true for transport-level failures
    pub fn is_transport(&self) -> bool {
        matches!(self, ScanError::Transport(_))
    }

    /// Returns true when the API reported a failure status
    pub fn is_api(&self) -> bool {
        matches!(self, ScanError::Api { .. })
    }

    /// Returns true when the API succeeded without a usable payload
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ScanError::EmptyResult(_))
    }

    /// Returns true when a critical numeric field failed to parse
    pub fn is_field_parse(&self) -> bool {
        matches!(self, ScanError::FieldParse { .. })
    }
}

impl From<hex::FromHexError> for ScanError {
    fn from(e: hex::FromHexError) -> Self {
        ScanError::InvalidHex(e.to_string())
    }
}

impl From<serde_json::Error> for ScanError {
    fn from(e: serde_json::Error) -> Self {
        ScanError::Serialization(e.to_string())
    }
}

impl From<url::ParseError> for ScanError {
    fn from(e: url::ParseError) -> Self {
        ScanError::Config(format!("invalid endpoint URL: {}", e))
    }
}

/// Error code reported by the API for a single transaction record
///
/// Carried as data on the record; it never fails the listing it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("transaction error: {code}")]
pub struct TxError {
    /// Raw `errCode` value
    pub code: String,
}

impl TxError {
    /// Create a new record error
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
