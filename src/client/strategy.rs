//! Ordered attempt strategies for reaching the DoH endpoint

use super::HttpRequest;
use crate::defaults::DOH_ACCEPT;
use crate::types::AttemptKind;
use url::Url;

/// One way of sending the probe request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStrategy {
    /// GET the endpoint URL itself
    Direct,
    /// GET `<base><endpoint URL>` through a relay
    Relay { base: String },
}

impl AttemptStrategy {
    /// Build the relay strategy, making sure the base ends in `/`
    pub fn relay(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self::Relay { base }
    }

    /// Direct first, then the relay when one is configured
    pub fn chain(relay: Option<&str>) -> Vec<AttemptStrategy> {
        let mut strategies = vec![AttemptStrategy::Direct];
        if let Some(base) = relay {
            strategies.push(AttemptStrategy::relay(base));
        }
        strategies
    }

    pub fn kind(&self) -> AttemptKind {
        match self {
            AttemptStrategy::Direct => AttemptKind::Direct,
            AttemptStrategy::Relay { .. } => AttemptKind::Relay,
        }
    }

    /// The request this strategy sends for `target`
    pub fn request_for(&self, target: &Url) -> HttpRequest {
        let url = match self {
            AttemptStrategy::Direct => target.to_string(),
            AttemptStrategy::Relay { base } => format!("{}{}", base, target),
        };
        HttpRequest::get(url).with_header("Accept", DOH_ACCEPT)
    }
}
