//! Command-line interface

use crate::config::EnvManager;
use crate::error::{AppError, Result};
use crate::models::{ServerEntry, ServerSource};
use crate::types::OutputFormat;
use clap::{ArgAction, Parser};
use std::io::Read;
use std::path::{Path, PathBuf};

/// DoH latency tester - measure response time of a DNS-over-HTTPS endpoint
/// for a list of public resolvers
#[derive(Parser, Debug, Clone)]
#[command(name = "dlt")]
#[command(version, about, long_about = None)]
#[command(after_long_help = EnvManager::display_env_help())]
pub struct Cli {
    /// Custom DNS server to test (can be used multiple times)
    #[arg(long = "server", value_name = "ADDR", action = ArgAction::Append)]
    pub servers: Vec<String>,

    /// File with one DNS server per line ("-" reads stdin)
    #[arg(long, value_name = "PATH", env = "SERVERS_FILE")]
    pub servers_file: Option<PathBuf>,

    /// Per-attempt deadline in milliseconds
    #[arg(short, long, value_name = "MS", value_parser = parse_timeout_ms)]
    pub timeout_ms: Option<u64>,

    /// DoH JSON endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Relay base URL used when the direct request fails
    #[arg(long, value_name = "URL", conflicts_with = "no_relay")]
    pub relay: Option<String>,

    /// Disable the relay fallback
    #[arg(long)]
    pub no_relay: bool,

    /// Domain name to resolve
    #[arg(long, value_name = "NAME")]
    pub domain: Option<String>,

    /// Record type to request
    #[arg(long, value_name = "TYPE")]
    pub record_type: Option<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print the built-in server list and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.list && (!self.servers.is_empty() || self.servers_file.is_some()) {
            return Err("--list cannot be combined with --server or --servers-file".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled, `None` when left to configuration
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Resolve color use before the configuration is loaded: explicit flags
    /// win, then `ENABLE_COLOR`, then terminal detection
    pub fn use_colors(&self) -> bool {
        self.color_override().unwrap_or_else(|| {
            env_color_preference(std::env::var("ENABLE_COLOR").ok().as_deref())
        })
    }

    /// Whether any custom server input was given
    pub fn has_custom_servers(&self) -> bool {
        !self.servers.is_empty() || self.servers_file.is_some()
    }

    /// Collect the server list to run: built-in unless custom input was given
    pub fn server_source(&self) -> Result<ServerSource> {
        if !self.has_custom_servers() {
            return Ok(ServerSource::Default);
        }

        let mut text = String::new();
        if let Some(ref path) = self.servers_file {
            text.push_str(&read_servers_file(path)?);
        }
        for server in &self.servers {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(server);
        }

        Ok(ServerSource::Custom(text))
    }

    /// Resolve the server list to entries
    pub fn server_entries(&self) -> Result<Vec<ServerEntry>> {
        self.server_source()?.entries()
    }
}

fn read_servers_file(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    std::fs::read_to_string(path).map_err(|e| {
        AppError::io(format!(
            "Failed to read servers file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Parse the deadline in milliseconds
fn parse_timeout_ms(s: &str) -> std::result::Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|ms| {
            if ms == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if ms > crate::defaults::MAX_TIMEOUT_MS {
                Err(format!(
                    "Timeout cannot exceed {}ms",
                    crate::defaults::MAX_TIMEOUT_MS
                ))
            } else {
                Ok(ms)
            }
        })
}

/// `ENABLE_COLOR` value combined with terminal support; unparsable values
/// fall back to the default
fn env_color_preference(value: Option<&str>) -> bool {
    value
        .and_then(|v| v.trim().parse::<bool>().ok())
        .unwrap_or(crate::defaults::DEFAULT_ENABLE_COLOR)
        && supports_color()
}

/// Check if the terminal supports color output
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
