//! Resolver entries and the lists they come from

use crate::defaults::{
    CUSTOM_SERVER_LOCATION, CUSTOM_SERVER_NAME, DEFAULT_SERVERS,
};
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolver to test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    /// Display name
    pub name: String,
    /// Resolver address as entered (normally an IP literal)
    pub server: String,
    /// Display location
    pub location: String,
}

impl ServerEntry {
    pub fn new(
        name: impl Into<String>,
        server: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            server: server.into(),
            location: location.into(),
        }
    }

    /// Entry for a user-supplied address
    pub fn custom(server: impl Into<String>) -> Self {
        Self::new(CUSTOM_SERVER_NAME, server, CUSTOM_SERVER_LOCATION)
    }

    /// The built-in resolver list, in display order
    pub fn default_list() -> Vec<ServerEntry> {
        DEFAULT_SERVERS
            .iter()
            .map(|&(name, server, location)| ServerEntry::new(name, server, location))
            .collect()
    }

    /// Parse newline-separated custom input.
    ///
    /// Lines are trimmed and blank lines dropped. Values are not checked
    /// for being IP literals; whatever the user typed is displayed as-is.
    pub fn parse_custom_list(text: &str) -> Vec<ServerEntry> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ServerEntry::custom)
            .collect()
    }
}

impl fmt::Display for ServerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.server)
    }
}

/// Where the list of resolvers for a batch comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerSource {
    /// The built-in list
    Default,
    /// Newline-separated custom text
    Custom(String),
}

impl ServerSource {
    /// Resolve the source into entries, rejecting custom input with no entries
    pub fn entries(&self) -> Result<Vec<ServerEntry>> {
        match self {
            ServerSource::Default => Ok(ServerEntry::default_list()),
            ServerSource::Custom(text) => {
                let entries = ServerEntry::parse_custom_list(text);
                if entries.is_empty() {
                    return Err(AppError::validation(
                        "Please enter at least one DNS server to test",
                    ));
                }
                Ok(entries)
            }
        }
    }
}
