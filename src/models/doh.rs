//! DNS-over-HTTPS JSON response model
//!
//! The body must be valid JSON other than `null`. Every field is optional
//! and wrongly-typed fields are treated as absent, except `originIP`, which
//! accepts any truthy value.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The subset of a DoH JSON answer the tester looks at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DohJsonResponse {
    /// DNS RCODE (`Status`)
    pub status: Option<u64>,
    /// `data` of each entry in `Answer`
    pub answers: Vec<String>,
    /// Client address as seen by the resolver API (`originIP`)
    pub origin_ip: Option<String>,
}

impl DohJsonResponse {
    /// Parse a response body
    pub fn from_slice(body: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(body)?;
        if value.is_null() {
            return Err(serde_json::Error::custom("response body is null"));
        }
        Ok(Self::from_value(&value))
    }

    /// Extract known fields from an already-parsed JSON value
    pub fn from_value(value: &Value) -> Self {
        let status = value.get("Status").and_then(Value::as_u64);

        let answers = value
            .get("Answer")
            .and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .filter_map(|record| record.get("data").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let origin_ip = value.get("originIP").and_then(origin_ip_text);

        Self {
            status,
            answers,
            origin_ip,
        }
    }
}

/// Text of a truthy `originIP`; empty strings, zero, `false` and `null` are absent
fn origin_ip_text(value: &Value) -> Option<String> {
    match value {
        Value::String(ip) if !ip.is_empty() => Some(ip.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
        _ => None,
    }
}
