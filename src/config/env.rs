//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    /// Load the given env file if it exists; existing variables win
    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path).map_err(|e| {
                AppError::config(format!("Failed to load {}: {}", path.display(), e))
            })?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No {} file found, using defaults and CLI arguments", path.display());
        }

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "DOH_ENDPOINT" => {
                url::Url::parse(value.trim()).map_err(|e| {
                    AppError::config(format!("Invalid DOH_ENDPOINT '{}': {}", value, e))
                })?;
            }
            "RELAY_URL" => {
                let relay = value.trim();
                if !relay.is_empty() {
                    url::Url::parse(relay).map_err(|e| {
                        AppError::config(format!("Invalid RELAY_URL '{}': {}", relay, e))
                    })?;
                }
            }
            "TEST_DOMAIN" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("TEST_DOMAIN cannot be empty"));
                }
            }
            "RECORD_TYPE" => {
                let record_type = value.trim();
                if record_type.is_empty()
                    || !record_type.chars().all(|c| c.is_ascii_alphanumeric())
                {
                    return Err(AppError::config(format!(
                        "Invalid RECORD_TYPE value '{}'",
                        value
                    )));
                }
            }
            "TIMEOUT_MS" => {
                let timeout: u64 = value.trim().parse().map_err(|e| {
                    AppError::config(format!("Invalid TIMEOUT_MS value '{}': {}", value, e))
                })?;
                if timeout == 0 || timeout > crate::defaults::MAX_TIMEOUT_MS {
                    return Err(AppError::config(format!(
                        "TIMEOUT_MS must be between 1 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_MS,
                        timeout
                    )));
                }
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>().map_err(|e| {
                    AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e))
                })?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("DOH_ENDPOINT", "DoH JSON endpoint", "https://dns.google/resolve"),
            ("RELAY_URL", "Relay base URL, empty disables", "https://cors-anywhere.herokuapp.com/"),
            ("TEST_DOMAIN", "Domain name to resolve", "example.com"),
            ("RECORD_TYPE", "Record type to request", "A"),
            ("TIMEOUT_MS", "Per-attempt deadline in ms (1-60000)", "3000"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
            ("SERVERS_FILE", "File with one DNS server per line", "servers.txt"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<14} {}\n", var, description));
            help.push_str(&format!("  {:<14} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables, reporting every
    /// invalid one instead of stopping at the first
    pub fn validate_current_env() -> Vec<String> {
        Self::validate_vars(|name| std::env::var(name).ok())
    }

    fn validate_vars(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        Self::get_supported_env_vars()
            .into_iter()
            .filter_map(|(name, _, _)| {
                let value = lookup(name)?;
                Self::validate_env_var(name, &value)
                    .err()
                    .map(|e| format!("Warning: {}", e))
            })
            .collect()
    }
}
