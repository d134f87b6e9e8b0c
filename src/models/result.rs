//! Probe results, display rows and the running summary

use crate::error::ProbeError;
use crate::models::ServerEntry;
use crate::types::AttemptKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of probing one resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Whether the probe got a 2xx JSON response
    pub success: bool,
    /// Elapsed milliseconds, 0 when the probe failed
    pub time: u64,
    /// `originIP` reported by the resolver API, if any
    pub ip: Option<String>,
    /// Human-readable failure description
    pub error: Option<String>,
    /// `data` of each answer record in the response
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<String>,
    /// Strategy that produced the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt: Option<AttemptKind>,
    /// When the probe completed
    pub timestamp: DateTime<Utc>,
}

impl TestResult {
    pub fn success(time: u64, ip: Option<String>, answers: Vec<String>, attempt: AttemptKind) -> Self {
        Self {
            success: true,
            time,
            ip,
            error: None,
            answers,
            attempt: Some(attempt),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(error: &ProbeError) -> Self {
        Self {
            success: false,
            time: 0,
            ip: None,
            error: Some(error.to_string()),
            answers: Vec::new(),
            attempt: None,
            timestamp: Utc::now(),
        }
    }

    /// Status label shown in the results table
    pub fn status_label(&self) -> &'static str {
        if self.success {
            "Success"
        } else {
            "Failed"
        }
    }

    /// Time column text: `<n>ms` on success, `-` otherwise
    pub fn time_label(&self) -> String {
        if self.success {
            format!("{}ms", self.time)
        } else {
            "-".to_string()
        }
    }
}

/// One row handed to the display sink
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    /// 1-based position in the batch
    pub index: usize,
    pub entry: ServerEntry,
    pub result: TestResult,
    /// `result.ip`, or the batch's client IP when the result has none
    pub display_ip: String,
}

impl ResultRow {
    pub fn new(index: usize, entry: ServerEntry, result: TestResult, client_ip: &str) -> Self {
        let display_ip = result.ip.clone().unwrap_or_else(|| client_ip.to_string());
        Self {
            index,
            entry,
            result,
            display_ip,
        }
    }
}

/// Aggregate view after some number of probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total_tests: u32,
    /// Percentage, 0-100
    pub success_rate: u32,
    /// Milliseconds, averaged over successful probes only
    pub avg_time: u64,
}

impl RunSummary {
    /// Derive a summary from raw counters.
    ///
    /// Both ratios round half up, matching `round(100*S/N)` and `round(T/S)`.
    pub fn from_counts(total_tests: u32, successful_tests: u32, total_response_time: u64) -> Self {
        let success_rate = if total_tests > 0 {
            let total = u64::from(total_tests);
            ((200 * u64::from(successful_tests) + total) / (2 * total)) as u32
        } else {
            0
        };

        let avg_time = if successful_tests > 0 {
            let successes = u64::from(successful_tests);
            (2 * total_response_time + successes) / (2 * successes)
        } else {
            0
        };

        Self {
            total_tests,
            success_rate,
            avg_time,
        }
    }
}

/// Running counters for one batch
#[derive(Debug, Clone, Default)]
pub struct SummaryAccumulator {
    total_tests: u32,
    successful_tests: u32,
    total_response_time: u64,
}

impl SummaryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one more result and return the refreshed summary
    pub fn record(&mut self, result: &TestResult) -> RunSummary {
        self.total_tests += 1;
        if result.success {
            self.successful_tests += 1;
            self.total_response_time += result.time;
        }
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_counts(self.total_tests, self.successful_tests, self.total_response_time)
    }

    pub fn successful_tests(&self) -> u32 {
        self.successful_tests
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ok(time: u64) -> TestResult {
        TestResult::success(time, None, Vec::new(), AttemptKind::Direct)
    }

    fn failed() -> TestResult {
        TestResult::failure(&ProbeError::HttpStatus(500))
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(RunSummary::from_counts(0, 0, 0), RunSummary::default());
    }

    #[test]
    fn test_summary_rounding() {
        // 2 of 3 -> 66.67 -> 67
        assert_eq!(RunSummary::from_counts(3, 2, 0).success_rate, 67);
        // 1 of 8 -> 12.5 -> 13
        assert_eq!(RunSummary::from_counts(8, 1, 10).success_rate, 13);
        // 1 of 3 -> 33.33 -> 33
        assert_eq!(RunSummary::from_counts(3, 1, 10).success_rate, 33);
        // (10 + 11) / 2 = 10.5 -> 11
        assert_eq!(RunSummary::from_counts(2, 2, 21).avg_time, 11);
        assert_eq!(RunSummary::from_counts(5, 0, 0).avg_time, 0);
    }

    #[test]
    fn test_accumulator_ignores_failed_times() {
        let mut acc = SummaryAccumulator::new();
        acc.record(&ok(100));
        acc.record(&failed());
        let summary = acc.record(&ok(51));
        assert_eq!(summary.total_tests, 3);
        assert_eq!(summary.success_rate, 67);
        assert_eq!(summary.avg_time, 76);
        assert_eq!(acc.successful_tests(), 2);
    }

    #[test]
    fn test_failure_shape() {
        let result = failed();
        assert!(!result.success);
        assert_eq!(result.time, 0);
        assert_eq!(result.ip, None);
        assert_eq!(result.error.as_deref(), Some("HTTP error: 500"));
        assert_eq!(result.status_label(), "Failed");
        assert_eq!(result.time_label(), "-");
    }

    #[test]
    fn test_row_falls_back_to_client_ip() {
        let entry = ServerEntry::custom("9.9.9.9");
        let row = ResultRow::new(1, entry.clone(), ok(20), "203.0.113.7");
        assert_eq!(row.display_ip, "203.0.113.7");

        let with_ip = TestResult::success(20, Some("198.51.100.1".into()), Vec::new(), AttemptKind::Relay);
        let row = ResultRow::new(2, entry, with_ip, "203.0.113.7");
        assert_eq!(row.display_ip, "198.51.100.1");
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let json = serde_json::to_value(ok(42)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["time"], 42);
        assert_eq!(json["attempt"], "direct");
        assert!(json.get("answers").is_none());
    }

    proptest! {
        #[test]
        fn prop_summary_matches_float_rounding(
            n in 1u32..500,
            s_frac in 0.0f64..=1.0,
            t in 0u64..10_000_000,
        ) {
            let s = ((f64::from(n) * s_frac) as u32).min(n);
            let summary = RunSummary::from_counts(n, s, t);
            let expected_rate = (100.0 * f64::from(s) / f64::from(n)).round() as u32;
            prop_assert_eq!(summary.success_rate, expected_rate);
            prop_assert!(summary.success_rate <= 100);
            if s == 0 {
                prop_assert_eq!(summary.avg_time, 0);
            } else {
                let expected_avg = (t as f64 / f64::from(s)).round() as u64;
                prop_assert_eq!(summary.avg_time, expected_avg);
            }
        }
    }
}
