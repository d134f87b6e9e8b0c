//! HTTP client seam, deadline primitive and attempt strategies

pub mod deadline;
pub mod strategy;


pub use deadline::{Deadline, DeadlineElapsed};
pub use strategy::AttemptStrategy;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

/// HTTP client trait for abstraction and testing
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a GET request and read the whole body.
    ///
    /// Any HTTP status is a successful return; only transport-level
    /// failures produce an error.
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// HTTP request configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Create a new GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add custom header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response with the moment its headers arrived
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
    /// When the status line and headers were received, before the body
    pub received_at: Instant,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            body: body.into(),
            received_at: Instant::now(),
        }
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// `reqwest`-backed client
pub struct NetworkClient {
    client: Client,
}

impl NetworkClient {
    /// Create a new network client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("{}/{}", crate::PKG_NAME, crate::VERSION))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for NetworkClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::network(e.to_string()))?;
        let received_at = Instant::now();
        let status_code = response.status().as_u16();

        let body = response
            .bytes()
            .await
            .map_err(|e| AppError::network(format!("Failed to read response body: {}", e)))?;

        Ok(HttpResponse {
            status_code,
            body: body.to_vec(),
            received_at,
        })
    }
}
