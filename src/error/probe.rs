//! Failures of a single resolver probe
//!
//! Every variant renders to the human-readable message that ends up in
//! `TestResult::error`; none of them is ever propagated past the prober.

use crate::types::AttemptKind;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// The attempt did not produce a response before its deadline
    #[error("Timeout")]
    Timeout { attempt: AttemptKind, after: Duration },

    /// The direct request failed at the transport level
    #[error("{0}")]
    NetworkFailure(String),

    /// The relayed request failed at the transport level
    #[error("{0}")]
    RelayFailure(String),

    /// The endpoint answered with a non-2xx status
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// The response body was not valid JSON
    #[error("JSON parse error: {0}")]
    Parse(String),
}

impl ProbeError {
    /// Transport failure for the given attempt kind
    pub fn transport(attempt: AttemptKind, message: impl Into<String>) -> Self {
        match attempt {
            AttemptKind::Direct => Self::NetworkFailure(message.into()),
            AttemptKind::Relay => Self::RelayFailure(message.into()),
        }
    }

    /// Short category label used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::NetworkFailure(_) => "network",
            Self::RelayFailure(_) => "relay",
            Self::HttpStatus(_) => "http_status",
            Self::Parse(_) => "parse",
        }
    }

    /// Whether the next attempt strategy should be tried after this failure
    pub fn allows_fallback(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::NetworkFailure(_) | Self::RelayFailure(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let timeout = ProbeError::Timeout {
            attempt: AttemptKind::Direct,
            after: Duration::from_millis(3000),
        };
        assert_eq!(timeout.to_string(), "Timeout");
        assert_eq!(ProbeError::HttpStatus(500).to_string(), "HTTP error: 500");
        assert_eq!(
            ProbeError::transport(AttemptKind::Relay, "connection refused").to_string(),
            "connection refused"
        );
    }

    #[test]
    fn test_transport_variant_follows_attempt() {
        assert!(matches!(
            ProbeError::transport(AttemptKind::Direct, "x"),
            ProbeError::NetworkFailure(_)
        ));
        assert!(matches!(
            ProbeError::transport(AttemptKind::Relay, "x"),
            ProbeError::RelayFailure(_)
        ));
    }

    #[test]
    fn test_fallback_only_on_transport_failures() {
        assert!(ProbeError::NetworkFailure("x".into()).allows_fallback());
        assert!(ProbeError::Timeout {
            attempt: AttemptKind::Direct,
            after: Duration::from_secs(3)
        }
        .allows_fallback());
        assert!(!ProbeError::HttpStatus(503).allows_fallback());
        assert!(!ProbeError::Parse("eof".into()).allows_fallback());
    }
}
