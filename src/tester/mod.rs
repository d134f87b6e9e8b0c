//! Sequential batch runner
//!
//! A batch probes every entry in input order, waiting for each probe to
//! finish before starting the next one. After every probe the display sink
//! receives the row and a summary recomputed from the running counters.

mod probe;

#[cfg(test)]
pub(crate) mod testing;

pub use probe::Prober;

use crate::{
    defaults::UNKNOWN_CLIENT_IP,
    error::{AppError, Result},
    logging::Logger,
    models::{ResultRow, RunSummary, ServerEntry, SummaryAccumulator},
    output::DisplaySink,
};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Everything a completed batch produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// One row per input entry, in input order
    pub rows: Vec<ResultRow>,
    /// Summary after the last probe
    pub summary: RunSummary,
    /// First `originIP` seen during the batch, or "Unknown"
    pub client_ip: String,
}

impl BatchReport {
    pub fn successful_count(&self) -> usize {
        self.rows.iter().filter(|row| row.result.success).count()
    }
}

/// Runs batches of probes, one batch at a time
pub struct ResolverTester {
    prober: Prober,
    logger: Arc<Logger>,
    busy: AtomicBool,
}

/// Clears the busy flag when the batch ends or its future is dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ResolverTester {
    pub fn new(prober: Prober, logger: Arc<Logger>) -> Self {
        Self {
            prober,
            logger,
            busy: AtomicBool::new(false),
        }
    }

    /// Whether a batch is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn prober(&self) -> &Prober {
        &self.prober
    }

    /// Probe every entry in order, reporting through `sink` as results arrive.
    ///
    /// Returns `AppError::Busy` without touching the sink if another batch is
    /// already running on this tester. Individual probe failures never end
    /// the batch.
    pub async fn run_batch(
        &self,
        servers: &[ServerEntry],
        sink: &mut dyn DisplaySink,
    ) -> Result<BatchReport> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(AppError::busy("a batch is already running"));
        }
        let _guard = BusyGuard(&self.busy);

        let correlation_id = self.logger.start_operation("resolver batch").await;
        self.logger
            .debug("Batch parameters")
            .correlation_id(&correlation_id)
            .field("servers", servers.len())
            .field("deadline_ms", self.prober.deadline().limit().as_millis() as u64)
            .field("strategies", self.prober.strategies().len())
            .log()
            .await;

        sink.begin_batch(servers.len());
        sink.set_busy(true);

        let mut accumulator = SummaryAccumulator::new();
        let mut client_ip = UNKNOWN_CLIENT_IP.to_string();
        let mut rows = Vec::with_capacity(servers.len());

        for (index, entry) in servers.iter().enumerate() {
            let result = self.prober.probe(&entry.server).await;

            if client_ip == UNKNOWN_CLIENT_IP {
                if let Some(ip) = &result.ip {
                    client_ip = ip.clone();
                }
            }

            let summary = accumulator.record(&result);

            self.logger
                .debug("Probe finished")
                .correlation_id(&correlation_id)
                .probe(entry, &result)
                .log()
                .await;

            let row = ResultRow::new(index + 1, entry.clone(), result, &client_ip);
            sink.append_result(&row);
            sink.update_summary(&summary);
            rows.push(row);
        }

        sink.set_busy(false);

        let summary = accumulator.summary();
        self.logger
            .info(&format!(
                "Tested {} resolvers: {}% success, {}ms average",
                summary.total_tests, summary.success_rate, summary.avg_time
            ))
            .correlation_id(&correlation_id)
            .field("client_ip", &client_ip)
            .log()
            .await;
        self.logger
            .end_operation(&correlation_id, "resolver batch", true)
            .await;

        Ok(BatchReport {
            rows,
            summary,
            client_ip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AttemptStrategy, Deadline};
    use crate::logging::LogLevel;
    use crate::output::{MemorySink, SinkEvent};
    use std::time::Duration;
    use testing::{Scripted, ScriptedClient};
    use url::Url;

    fn tester(script: Vec<Scripted>) -> ResolverTester {
        let client = Arc::new(ScriptedClient::new(script));
        let prober = Prober::new(client, Url::parse("https://dns.example/resolve").unwrap())
            .with_strategies(AttemptStrategy::chain(None))
            .with_deadline(Deadline::from_millis(200));
        let (logger, _) = Logger::capturing("tester", LogLevel::Debug);
        ResolverTester::new(prober, Arc::new(logger))
    }

    fn servers(addresses: &[&str]) -> Vec<ServerEntry> {
        addresses.iter().map(|a| ServerEntry::custom(*a)).collect()
    }

    #[tokio::test]
    async fn test_results_follow_input_order() {
        let tester = tester(vec![
            Scripted::Respond(200, "{}"),
            Scripted::Respond(500, ""),
            Scripted::Fail("refused"),
            Scripted::Respond(200, "{}"),
        ]);
        let input = servers(&["1.1.1.1", "8.8.8.8", "9.9.9.9", "1.0.0.1"]);
        let mut sink = MemorySink::new();

        let report = tester.run_batch(&input, &mut sink).await.unwrap();

        assert_eq!(report.rows.len(), input.len());
        for (i, row) in report.rows.iter().enumerate() {
            assert_eq!(row.index, i + 1);
            assert_eq!(row.entry, input[i]);
        }
        let successes: Vec<bool> = report.rows.iter().map(|r| r.result.success).collect();
        assert_eq!(successes, vec![true, false, false, true]);
        assert_eq!(report.summary.total_tests, 4);
        assert_eq!(report.summary.success_rate, 50);
        assert_eq!(sink.rows().len(), 4);
    }

    #[tokio::test]
    async fn test_sink_event_sequence() {
        let tester = tester(vec![Scripted::Respond(200, "{}"), Scripted::Fail("x")]);
        let mut sink = MemorySink::new();
        tester
            .run_batch(&servers(&["a", "b"]), &mut sink)
            .await
            .unwrap();

        let events = sink.events();
        assert!(matches!(events[0], SinkEvent::Begin(2)));
        assert!(matches!(events[1], SinkEvent::Busy(true)));
        assert!(matches!(events[2], SinkEvent::Row(_)));
        assert!(matches!(events[3], SinkEvent::Summary(s) if s.total_tests == 1 && s.success_rate == 100));
        assert!(matches!(events[4], SinkEvent::Row(_)));
        assert!(matches!(events[5], SinkEvent::Summary(s) if s.total_tests == 2 && s.success_rate == 50));
        assert!(matches!(events[6], SinkEvent::Busy(false)));
        assert_eq!(events.len(), 7);
    }

    #[tokio::test]
    async fn test_client_ip_fallback() {
        let tester = tester(vec![
            Scripted::Respond(200, "{}"),
            Scripted::Respond(200, r#"{"originIP":"203.0.113.50"}"#),
            Scripted::Respond(200, "{}"),
            Scripted::Respond(200, r#"{"originIP":"203.0.113.51"}"#),
        ]);
        let mut sink = MemorySink::new();
        let report = tester
            .run_batch(&servers(&["a", "b", "c", "d"]), &mut sink)
            .await
            .unwrap();

        let ips: Vec<&str> = report.rows.iter().map(|r| r.display_ip.as_str()).collect();
        assert_eq!(ips, vec!["Unknown", "203.0.113.50", "203.0.113.50", "203.0.113.51"]);
        assert_eq!(report.client_ip, "203.0.113.50");
    }

    #[tokio::test]
    async fn test_failures_do_not_touch_average() {
        let tester = tester(vec![
            Scripted::Delayed(Duration::from_millis(20), 200, "{}"),
            Scripted::Respond(503, ""),
            Scripted::Respond(200, "not json"),
        ]);
        let mut sink = MemorySink::new();
        let report = tester
            .run_batch(&servers(&["a", "b", "c"]), &mut sink)
            .await
            .unwrap();

        assert_eq!(report.summary.success_rate, 33);
        assert_eq!(report.successful_count(), 1);
        assert_eq!(report.summary.avg_time, report.rows[0].result.time);
        assert_eq!(report.rows[1].result.error.as_deref(), Some("HTTP error: 503"));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let tester = tester(vec![]);
        let mut sink = MemorySink::new();
        let report = tester.run_batch(&[], &mut sink).await.unwrap();
        assert!(report.rows.is_empty());
        assert_eq!(report.summary, RunSummary::default());
        assert!(!tester.is_busy());
    }

    #[tokio::test]
    async fn test_second_batch_is_rejected_while_running() {
        let tester = tester(vec![
            Scripted::Delayed(Duration::from_millis(50), 200, "{}"),
            Scripted::Respond(200, "{}"),
        ]);
        let first_input = servers(&["1.1.1.1"]);
        let second_input = servers(&["9.9.9.9"]);
        let mut first_sink = MemorySink::new();
        let mut second_sink = MemorySink::new();

        let (first, second) = tokio::join!(
            tester.run_batch(&first_input, &mut first_sink),
            tester.run_batch(&second_input, &mut second_sink),
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::Busy(_))));
        assert!(second_sink.events().is_empty());
        assert!(!tester.is_busy());

        // The flag is released once the first batch completes
        let third = tester.run_batch(&second_input, &mut second_sink).await;
        assert!(third.is_ok());
    }
}
