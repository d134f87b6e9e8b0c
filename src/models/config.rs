//! Configuration data model and validation

use crate::types::{AppError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// DoH JSON endpoint every probe is sent to
    #[serde(default = "default_doh_endpoint")]
    pub doh_endpoint: String,

    /// Relay base URL used when the direct request fails; `None` disables it
    #[serde(default = "default_relay_url")]
    pub relay_url: Option<String>,

    /// Domain name resolved by each probe
    #[serde(default = "default_test_domain")]
    pub test_domain: String,

    /// Record type requested by each probe
    #[serde(default = "default_record_type")]
    pub record_type: String,

    /// Per-attempt deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Output format
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            doh_endpoint: default_doh_endpoint(),
            relay_url: default_relay_url(),
            test_domain: default_test_domain(),
            record_type: default_record_type(),
            timeout_ms: default_timeout_ms(),
            output_format: OutputFormat::default(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the per-attempt deadline as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        validate_http_url("DoH endpoint", &self.doh_endpoint)?;

        if let Some(ref relay) = self.relay_url {
            validate_http_url("Relay URL", relay)?;
        }

        if self.test_domain.trim().is_empty() {
            return Err(AppError::config("Test domain cannot be empty"));
        }

        if self.record_type.is_empty()
            || !self.record_type.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(AppError::config(format!(
                "Invalid record type '{}': expected a name like A or AAAA",
                self.record_type
            )));
        }

        if self.timeout_ms == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.timeout_ms > crate::defaults::MAX_TIMEOUT_MS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {}ms",
                crate::defaults::MAX_TIMEOUT_MS
            )));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(endpoint) = std::env::var("DOH_ENDPOINT") {
            self.doh_endpoint = endpoint.trim().to_string();
        }

        // An empty RELAY_URL disables the fallback
        if let Ok(relay) = std::env::var("RELAY_URL") {
            let relay = relay.trim();
            self.relay_url = if relay.is_empty() {
                None
            } else {
                Some(relay.to_string())
            };
        }

        if let Ok(domain) = std::env::var("TEST_DOMAIN") {
            self.test_domain = domain.trim().to_string();
        }

        if let Ok(record_type) = std::env::var("RECORD_TYPE") {
            self.record_type = record_type.trim().to_uppercase();
        }

        if let Ok(timeout) = std::env::var("TIMEOUT_MS") {
            self.timeout_ms = timeout.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid TIMEOUT_MS value '{}': {}", timeout, e))
            })?;
        }

        if let Ok(enable_color) = std::env::var("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse().map_err(|e| {
                AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e))
            })?;
        }

        Ok(())
    }
}

fn validate_http_url(label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::config(format!("{} cannot be empty", label)));
    }

    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(AppError::config(format!(
            "{} must use http or https: {}",
            label, value
        ))),
        Err(e) => Err(AppError::config(format!("Invalid {} '{}': {}", label, value, e))),
    }
}

// Default value functions for serde
fn default_doh_endpoint() -> String {
    crate::defaults::DEFAULT_DOH_ENDPOINT.to_string()
}

fn default_relay_url() -> Option<String> {
    Some(crate::defaults::DEFAULT_RELAY_URL.to_string())
}

fn default_test_domain() -> String {
    crate::defaults::DEFAULT_TEST_DOMAIN.to_string()
}

fn default_record_type() -> String {
    crate::defaults::DEFAULT_RECORD_TYPE.to_string()
}

fn default_timeout_ms() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_millis(3000));
        assert_eq!(config.doh_endpoint, "https://dns.google/resolve");
        assert_eq!(config.test_domain, "example.com");
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = Config::default();
        config.doh_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());

        config.doh_endpoint = "ftp://dns.example/resolve".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relay_is_optional() {
        let mut config = Config::default();
        config.relay_url = None;
        assert!(config.validate().is_ok());

        config.relay_url = Some("relay".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.timeout_ms = 0;
        assert!(config.validate().is_err());

        config.timeout_ms = crate::defaults::MAX_TIMEOUT_MS + 1;
        assert!(config.validate().is_err());

        config.timeout_ms = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_record_type_validation() {
        let mut config = Config::default();
        config.record_type = "AAAA".to_string();
        assert!(config.validate().is_ok());

        config.record_type = "A&x=1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_domain_invalid() {
        let mut config = Config::default();
        config.test_domain = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
