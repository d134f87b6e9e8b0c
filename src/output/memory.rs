//! In-memory sink for embedding the tester in other front ends

use super::DisplaySink;
use crate::models::{ResultRow, RunSummary};

/// Everything a sink can be told, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Begin(usize),
    Busy(bool),
    Row(ResultRow),
    Summary(RunSummary),
}

/// Records sink events instead of displaying them
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<SinkEvent>,
    busy: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Rows of the most recent batch
    pub fn rows(&self) -> Vec<&ResultRow> {
        let start = self
            .events
            .iter()
            .rposition(|e| matches!(e, SinkEvent::Begin(_)))
            .unwrap_or(0);
        self.events[start..]
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Row(row) => Some(row),
                _ => None,
            })
            .collect()
    }

    pub fn latest_summary(&self) -> Option<RunSummary> {
        self.events.iter().rev().find_map(|e| match e {
            SinkEvent::Summary(summary) => Some(*summary),
            _ => None,
        })
    }
}

impl DisplaySink for MemorySink {
    fn begin_batch(&mut self, total: usize) {
        self.events.push(SinkEvent::Begin(total));
    }

    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
        self.events.push(SinkEvent::Busy(busy));
    }

    fn append_result(&mut self, row: &ResultRow) {
        self.events.push(SinkEvent::Row(row.clone()));
    }

    fn update_summary(&mut self, summary: &RunSummary) {
        self.events.push(SinkEvent::Summary(*summary));
    }
}
