//! Response envelope decoding
//!
//! Every endpoint answers `{"status": "1"|"0", "message": ..., "result": ...}`.
//! This module checks the status and hands `result` back untouched; its shape is
//! up to the per-operation parser.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::ScanError;

const STATUS_SUCCESS: &str = "1";

/// Outcome carried in the `status` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// `"1"`
    Success,
    /// Anything else
    Failure,
}

/// Decoded response envelope
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Request outcome
    pub status: Status,
    /// Upstream message, e.g. `"OK"` or `"NOTOK"`
    pub message: String,
    /// Operation-specific payload
    pub result: Value,
}

#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    result: Value,
}

impl Envelope {
    /// Decode a raw body without judging its status
    pub fn decode(body: &[u8]) -> Result<Self, ScanError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ScanError::Transport("empty response body".to_string()));
        }
        let mut value: Value = serde_json::from_slice(body)?;
        if let Value::Object(map) = &mut value {
            map.retain(|_, v| !v.is_null());
        }
        let raw: RawEnvelope = serde_json::from_value(value)?;
        let status = if raw.status == STATUS_SUCCESS {
            Status::Success
        } else {
            Status::Failure
        };
        Ok(Self {
            status,
            message: raw.message,
            result: raw.result,
        })
    }

    /// Decode a body and fail with [`ScanError::Api`] unless the status is success
    pub fn open(body: &[u8]) -> Result<Value, ScanError> {
        Self::decode(body)?.into_result()
    }

    /// Decode a body whose payload must not be null or empty
    pub fn open_required(body: &[u8], what: &str) -> Result<Value, ScanError> {
        let result = Self::open(body)?;
        if is_empty_sentinel(&result) {
            return Err(ScanError::EmptyResult(what.to_string()));
        }
        Ok(result)
    }

    /// Check the status and return the payload
    pub fn into_result(self) -> Result<Value, ScanError> {
        match self.status {
            Status::Success => Ok(self.result),
            Status::Failure => {
                let detail = match self.result {
                    Value::String(s) if !s.is_empty() => Some(s),
                    _ => None,
                };
                Err(ScanError::Api {
                    message: self.message,
                    detail,
                })
            }
        }
    }
}

/// Deserialize a payload into its wire record type
///
/// Record members set to `null` are treated as absent, so the raw records'
/// `#[serde(default)]` zero values apply to them too.
pub(crate) fn from_result<T: DeserializeOwned>(mut result: Value) -> Result<T, ScanError> {
    drop_null_members(&mut result);
    serde_json::from_value(result).map_err(|e| ScanError::Serialization(e.to_string()))
}

fn drop_null_members(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(drop_null_members);
        }
        Value::Array(items) => items.iter_mut().for_each(drop_null_members),
        _ => {}
    }
}

fn is_empty_sentinel(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
