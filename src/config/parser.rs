//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::{supports_color, Cli},
    config::env::EnvManager,
    error::Result,
    models::Config,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        let mut config = Config::default();

        EnvManager::load_env_file(self.cli.debug)?;
        config.merge_from_env()?;
        self.apply_cli_overrides(&mut config);

        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref endpoint) = self.cli.endpoint {
            config.doh_endpoint = endpoint.clone();
        }

        if self.cli.no_relay {
            config.relay_url = None;
        } else if let Some(ref relay) = self.cli.relay {
            config.relay_url = Some(relay.clone());
        }

        if let Some(ref domain) = self.cli.domain {
            config.test_domain = domain.clone();
        }

        if let Some(ref record_type) = self.cli.record_type {
            config.record_type = record_type.to_uppercase();
        }

        if let Some(timeout_ms) = self.cli.timeout_ms {
            config.timeout_ms = timeout_ms;
        }

        if let Some(format) = self.cli.format {
            config.output_format = format;
        }

        // Explicit flags win; otherwise the configured value still needs a capable terminal
        config.enable_color = self
            .cli
            .color_override()
            .unwrap_or(config.enable_color && supports_color());

        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!("{}", display_config_summary(config));
        }
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let summary = [
        format!("DoH Endpoint: {}", config.doh_endpoint),
        format!(
            "Relay: {}",
            config.relay_url.as_deref().unwrap_or("disabled")
        ),
        format!("Query: {} {}", config.test_domain, config.record_type),
        format!("Timeout: {}ms", config.timeout_ms),
        format!("Output Format: {}", config.output_format),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ];

    summary.join("\n")
}
