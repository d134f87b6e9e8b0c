//! Run a future under a fixed deadline
//!
//! When the deadline wins, the wrapped future is dropped, which cancels any
//! in-flight request it owns.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// The deadline elapsed before the operation completed
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {}ms elapsed", .0.as_millis())]
pub struct DeadlineElapsed(pub Duration);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    limit: Duration,
}

impl Deadline {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Drive `operation` to completion or give up once the limit passes
    pub async fn run<F>(&self, operation: F) -> Result<F::Output, DeadlineElapsed>
    where
        F: Future,
    {
        tokio::time::timeout(self.limit, operation)
            .await
            .map_err(|_| DeadlineElapsed(self.limit))
    }
}

impl Default for Deadline {
    fn default() -> Self {
        Self::new(crate::defaults::DEFAULT_TIMEOUT)
    }
}
