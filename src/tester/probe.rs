//! Single-resolver probe against the DoH JSON endpoint

use crate::client::{AttemptStrategy, Deadline, HttpClient, HttpResponse};
use crate::error::{AppError, ProbeError, Result};
use crate::models::{Config, DohJsonResponse, TestResult};
use crate::types::AttemptKind;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Issues probe requests and turns every outcome into a [`TestResult`]
pub struct Prober {
    client: Arc<dyn HttpClient>,
    endpoint: Url,
    test_domain: String,
    record_type: String,
    strategies: Vec<AttemptStrategy>,
    deadline: Deadline,
}

impl Prober {
    /// Prober with default query, deadline and a direct-only strategy chain
    pub fn new(client: Arc<dyn HttpClient>, endpoint: Url) -> Self {
        Self {
            client,
            endpoint,
            test_domain: crate::defaults::DEFAULT_TEST_DOMAIN.to_string(),
            record_type: crate::defaults::DEFAULT_RECORD_TYPE.to_string(),
            strategies: AttemptStrategy::chain(None),
            deadline: Deadline::default(),
        }
    }

    /// Build a prober from validated configuration
    pub fn from_config(client: Arc<dyn HttpClient>, config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&config.doh_endpoint).map_err(|e| {
            AppError::config(format!("Invalid DoH endpoint '{}': {}", config.doh_endpoint, e))
        })?;

        Ok(Self::new(client, endpoint)
            .with_query(&config.test_domain, &config.record_type)
            .with_strategies(AttemptStrategy::chain(config.relay_url.as_deref()))
            .with_deadline(Deadline::new(config.timeout())))
    }

    pub fn with_query(mut self, test_domain: &str, record_type: &str) -> Self {
        self.test_domain = test_domain.to_string();
        self.record_type = record_type.to_string();
        self
    }

    pub fn with_strategies(mut self, strategies: Vec<AttemptStrategy>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_deadline(mut self, deadline: Deadline) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn strategies(&self) -> &[AttemptStrategy] {
        &self.strategies
    }

    /// Endpoint URL with a fresh cache-busting parameter
    pub fn target_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("t", &chrono::Utc::now().timestamp_millis().to_string())
            .append_pair("name", &self.test_domain)
            .append_pair("type", &self.record_type);
        url
    }

    /// Probe one resolver.
    ///
    /// The request always goes to the configured endpoint; `_server_address`
    /// does not influence routing. Results therefore measure the DoH
    /// endpoint, not the listed resolver.
    pub async fn probe(&self, _server_address: &str) -> TestResult {
        match self.try_probe().await {
            Ok(result) => result,
            Err(error) => TestResult::failure(&error),
        }
    }

    async fn try_probe(&self) -> std::result::Result<TestResult, ProbeError> {
        let target = self.target_url();
        let started = Instant::now();
        let mut last_error = None;

        for strategy in &self.strategies {
            let request = strategy.request_for(&target);
            let error = match self.deadline.run(self.client.get(request)).await {
                Ok(Ok(response)) => return classify(response, started, strategy.kind()),
                Ok(Err(e)) => ProbeError::transport(strategy.kind(), e.detail()),
                Err(elapsed) => ProbeError::Timeout {
                    attempt: strategy.kind(),
                    after: elapsed.0,
                },
            };

            if !error.allows_fallback() {
                return Err(error);
            }
            last_error = Some(error);
        }

        Err(last_error.unwrap_or_else(|| {
            ProbeError::NetworkFailure("No attempt strategies configured".to_string())
        }))
    }
}

fn classify(
    response: HttpResponse,
    started: Instant,
    attempt: AttemptKind,
) -> std::result::Result<TestResult, ProbeError> {
    let elapsed = response.received_at.saturating_duration_since(started);
    let time = (elapsed.as_secs_f64() * 1000.0).round() as u64;

    if !response.is_success() {
        return Err(ProbeError::HttpStatus(response.status_code));
    }

    let parsed = DohJsonResponse::from_slice(&response.body)
        .map_err(|e| ProbeError::Parse(e.to_string()))?;

    Ok(TestResult::success(time, parsed.origin_ip, parsed.answers, attempt))
}
