//! Advisory checks on a configuration that already passed `Config::validate`

use crate::{
    error::Result,
    models::{Config, ServerEntry},
};
use colored::Colorize;
use std::net::IpAddr;

/// Well-known DoH JSON endpoints
const KNOWN_DOH_HOSTS: &[&str] = &["dns.google", "cloudflare-dns.com", "dns.quad9.net"];

/// Timeouts under this many milliseconds rarely leave room for a TLS handshake
const LOW_TIMEOUT_MS: u64 = 200;

/// Configuration validator producing non-fatal warnings
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run the hard checks, then collect warnings for the config and server list
    pub fn validate_comprehensive(
        config: &Config,
        servers: &[ServerEntry],
    ) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Self::check_endpoint(config);
        warnings.extend(Self::check_relay(config));
        warnings.extend(Self::check_timeout(config));
        warnings.extend(Self::check_servers(servers));
        Ok(warnings)
    }

    fn check_endpoint(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let Ok(parsed) = url::Url::parse(&config.doh_endpoint) else {
            return warnings;
        };

        if parsed.scheme() == "http" {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Endpoint '{}' uses HTTP instead of HTTPS, which skips the TLS cost being measured",
                    config.doh_endpoint
                ),
            ));
        }

        let known = parsed
            .host_str()
            .map(|host| KNOWN_DOH_HOSTS.contains(&host))
            .unwrap_or(false);
        if !known {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Endpoint '{}' is not a well-known DoH JSON provider", config.doh_endpoint),
            ));
        }

        if parsed.query().is_some() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Endpoint already carries query parameters; probe parameters are appended",
            ));
        }

        warnings
    }

    fn check_relay(config: &Config) -> Vec<ValidationWarning> {
        match config.relay_url {
            Some(ref relay) => vec![ValidationWarning::new(
                ValidationLevel::Info,
                format!("Failed direct requests are retried through the relay {}", relay),
            )],
            None => Vec::new(),
        }
    }

    fn check_timeout(config: &Config) -> Vec<ValidationWarning> {
        if config.timeout_ms < LOW_TIMEOUT_MS {
            vec![ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Timeout of {}ms is very low; most probes will time out",
                    config.timeout_ms
                ),
            )]
        } else {
            Vec::new()
        }
    }

    fn check_servers(servers: &[ServerEntry]) -> Vec<ValidationWarning> {
        servers
            .iter()
            .filter(|entry| entry.server.parse::<IpAddr>().is_err())
            .map(|entry| {
                ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("'{}' is not an IP address; it is shown as a label only", entry.server),
                )
            })
            .collect()
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Info => "INFO",
            ValidationLevel::Warning => "WARN",
        }
    }
}

/// Validation warning with level and message
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn format(&self, use_color: bool) -> String {
        let tag = format!("[{}]", self.level.as_str());
        let tag = match (use_color, self.level) {
            (false, _) => tag.normal(),
            (true, ValidationLevel::Info) => tag.cyan(),
            (true, ValidationLevel::Warning) => tag.yellow().bold(),
        };
        format!("{} {}", tag, self.message)
    }
}

/// Convenience function for comprehensive validation
pub fn validate_config(config: &Config, servers: &[ServerEntry]) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config, servers)
}
