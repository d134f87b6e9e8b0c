//! Data models and structures for the DoH latency tester

pub mod config;
pub mod doh;
pub mod result;
pub mod server;

// Re-export main model types
pub use config::Config;
pub use doh::DohJsonResponse;
pub use result::{ResultRow, RunSummary, SummaryAccumulator, TestResult};
pub use server::{ServerEntry, ServerSource};
