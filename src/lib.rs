//! DoH Latency Tester
//!
//! Measures reachability and response time of a list of DNS resolvers by
//! querying a DNS-over-HTTPS JSON API once per resolver, strictly in order,
//! and reporting a running summary after every probe.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod tester;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, ProbeError, Result};
pub use models::{Config, RunSummary, ServerEntry, TestResult};
pub use output::{DisplaySink, OutputSinkFactory};
pub use tester::{BatchReport, Prober, ResolverTester};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");
pub const TARGET_TRIPLE: &str = env!("TARGET_TRIPLE");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";
    pub const DEFAULT_RELAY_URL: &str = "https://cors-anywhere.herokuapp.com/";
    pub const DEFAULT_TEST_DOMAIN: &str = "example.com";
    pub const DEFAULT_RECORD_TYPE: &str = "A";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);
    pub const MAX_TIMEOUT_MS: u64 = 60_000;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const DOH_ACCEPT: &str = "application/dns-json";

    pub const CUSTOM_SERVER_NAME: &str = "Custom DNS";
    pub const CUSTOM_SERVER_LOCATION: &str = "Unknown";
    pub const UNKNOWN_CLIENT_IP: &str = "Unknown";

    /// Built-in resolver list as (name, server, location)
    pub const DEFAULT_SERVERS: &[(&str, &str, &str)] = &[
        ("Google DNS", "8.8.8.8", "Global"),
        ("Google DNS (Secondary)", "8.8.4.4", "Global"),
        ("Cloudflare DNS", "1.1.1.1", "Global"),
        ("Cloudflare (Secondary)", "1.0.0.1", "Global"),
        ("Quad9", "9.9.9.9", "Global"),
        ("OpenDNS", "208.67.222.222", "Global"),
        ("OpenDNS (Secondary)", "208.67.220.220", "Global"),
        ("Comodo Secure DNS", "8.26.56.26", "Global"),
        ("CleanBrowsing (Family)", "185.228.168.168", "Global"),
        ("AdGuard DNS", "94.140.14.14", "Global"),
        ("DNS.WATCH", "84.200.69.80", "Germany"),
        ("Alternate DNS", "76.76.19.19", "Global"),
        ("Yandex DNS", "77.88.8.8", "Russia"),
        ("UncensoredDNS", "91.239.100.100", "Denmark"),
    ];
}
