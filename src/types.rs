//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Which attempt strategy produced (or failed to produce) a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptKind {
    /// Request sent straight to the DoH endpoint
    Direct,
    /// Request sent through the relay
    Relay,
}

impl fmt::Display for AttemptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptKind::Direct => write!(f, "direct"),
            AttemptKind::Relay => write!(f, "relay"),
        }
    }
}

/// Latency classification used to color result rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    /// < 50ms
    Excellent,
    /// 50-150ms
    Good,
    /// 150-500ms
    Fair,
    /// >= 500ms
    Poor,
}

impl PerformanceLevel {
    /// Classify a response time in milliseconds
    pub fn from_millis(time_ms: u64) -> Self {
        match time_ms {
            0..=49 => Self::Excellent,
            50..=149 => Self::Good,
            150..=499 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Output format for the result stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// One JSON object per line
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
