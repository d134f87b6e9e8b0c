//! Error handling for the DoH latency tester

mod probe;

pub use probe::ProbeError;

use thiserror::Error;

/// Application-level errors
///
/// These never originate from an individual probe: probe failures are
/// folded into [`crate::models::TestResult`] values by the prober.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (bad user input)
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors (reading server lists, etc.)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (URLs, JSON, numbers)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Network setup errors (building the HTTP client, transport failures)
    #[error("Network error: {0}")]
    Network(String),

    /// A batch is already running on this tester
    #[error("Tester busy: {0}")]
    Busy(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new parsing error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network(message.into())
    }

    /// Create a new busy error
    pub fn busy<S: Into<String>>(message: S) -> Self {
        Self::Busy(message.into())
    }

    /// The message carried by the error, without the category prefix
    pub fn detail(&self) -> &str {
        match self {
            Self::Config(msg)
            | Self::Validation(msg)
            | Self::Io(msg)
            | Self::Parse(msg)
            | Self::Network(msg)
            | Self::Busy(msg) => msg,
        }
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Validation(_) => "VALIDATION",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::Network(_) => "NETWORK",
            Self::Busy(_) => "BUSY",
        }
    }

    /// One-line hint shown below the error on the console
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Config(_) => "Check your .env file, environment variables or command line arguments.",
            Self::Validation(_) => "Provide one resolver address per line.",
            Self::Io(_) => "Check that the servers file exists and is readable.",
            Self::Parse(_) => "Check the format of your input data.",
            Self::Network(_) => "Check your TLS configuration and internet connection.",
            Self::Busy(_) => "Wait for the current run to finish.",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            Self::Network(_) => 2,
            Self::Io(_) => 5,
            Self::Busy(_) => 6,
        }
    }

    /// Format error for console display with color coding
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if use_color {
            use colored::Colorize;
            match self {
                Self::Config(_) | Self::Validation(_) | Self::Parse(_) => {
                    format!("[{}] {}", category.red().bold(), message.red())
                }
                Self::Network(_) => {
                    format!("[{}] {}", category.yellow().bold(), message.yellow())
                }
                Self::Io(_) | Self::Busy(_) => {
                    format!("[{}] {}", category.cyan().bold(), message.cyan())
                }
            }
        } else {
            format!("[{}] {}", category, message)
        }
    }
}

// Standard library error conversions
impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::network(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::parse(format!("Boolean parse error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;
