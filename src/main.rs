//! DoH Latency Tester - Main CLI Application
//!
//! Probes a DNS-over-HTTPS JSON endpoint once per resolver in a list and
//! streams the results and a running summary to the terminal.

use clap::Parser;
use doh_latency_tester::{
    cli::Cli,
    client::NetworkClient,
    config::{load_config, validate_config, EnvManager},
    error::{AppError, Result},
    logging::Logger,
    models::ServerEntry,
    output::{align_text, Alignment, OutputSinkFactory},
    tester::{Prober, ResolverTester},
    BUILD_TIME, GIT_COMMIT, PKG_NAME, TARGET_TRIPLE, VERSION,
};
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // `.env` values feed clap's `env` arguments, so load it before parsing
    if let Err(e) = EnvManager::load_env_file(false) {
        eprintln!("{}", e.format_for_console(false));
        process::exit(e.exit_code());
    }

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(1);
    }

    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        eprintln!(
            "{} v{} ({}, {}, built {})",
            PKG_NAME, VERSION, GIT_COMMIT, TARGET_TRIPLE, BUILD_TIME
        );
        eprintln!("Debug mode enabled");
    }

    if cli.list {
        print_server_list(&ServerEntry::default_list());
        return Ok(());
    }

    if cli.debug {
        for warning in EnvManager::validate_current_env() {
            eprintln!("{}", warning);
        }
    }

    let config = load_config(cli.clone())?;
    let servers = cli.server_entries()?;

    let warnings = validate_config(&config, &servers)?;
    if config.verbose || config.debug {
        for warning in &warnings {
            eprintln!("{}", warning.format(config.enable_color));
        }
    }

    let client = Arc::new(NetworkClient::new()?);
    let prober = Prober::from_config(client, &config)?;

    let logger = Logger::with_config(PKG_NAME, &config);
    logger.set_session_id(uuid::Uuid::new_v4().to_string()).await;
    logger.add_context_field("endpoint", &config.doh_endpoint).await;

    let tester = ResolverTester::new(prober, Arc::new(logger));
    let mut sink = OutputSinkFactory::create_sink(&config);

    let report = tester.run_batch(&servers, sink.as_mut()).await?;

    if config.debug {
        eprintln!(
            "Batch finished: {} servers, {} successful, client IP {}",
            report.rows.len(),
            report.successful_count(),
            report.client_ip
        );
    }

    Ok(())
}

/// Print the built-in resolver list
fn print_server_list(servers: &[ServerEntry]) {
    for (i, entry) in servers.iter().enumerate() {
        println!(
            "{} {} {} {}",
            align_text(&(i + 1).to_string(), 3, Alignment::Right),
            align_text(&entry.name, 24, Alignment::Left),
            align_text(&entry.server, 16, Alignment::Left),
            entry.location
        );
    }
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    eprintln!("Suggestion: {}", error.suggestion());

    match error {
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check your .env file format");
            eprintln!("  - Endpoint and relay must start with http:// or https://");
            eprintln!("  - Timeout must be between 1 and 60000 ms");
        }
        AppError::Validation(_) => {
            eprintln!();
            eprintln!("Input help:");
            eprintln!("  - Pass servers with --server <ADDR> or --servers-file <PATH>");
            eprintln!("  - Run without server arguments to test the built-in list");
        }
        AppError::Network(_) => {
            eprintln!();
            eprintln!("Network troubleshooting:");
            eprintln!("  - Check your internet connection");
            eprintln!("  - Verify firewall and proxy settings");
        }
        _ => {}
    }
}
