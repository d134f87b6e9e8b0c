//! Newline-delimited JSON sink

use super::DisplaySink;
use crate::models::{ResultRow, RunSummary};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
enum JsonEvent<'a> {
    Begin { total: usize },
    Result(&'a ResultRow),
    Summary(&'a RunSummary),
    Done,
}

/// Emits one JSON object per line for each sink event
pub struct JsonSink<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, event: &JsonEvent<'_>) {
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(self.out, "{}", line);
            let _ = self.out.flush();
        }
    }
}

impl<W: Write + Send> DisplaySink for JsonSink<W> {
    fn begin_batch(&mut self, total: usize) {
        self.emit(&JsonEvent::Begin { total });
    }

    fn set_busy(&mut self, busy: bool) {
        if !busy {
            self.emit(&JsonEvent::Done);
        }
    }

    fn append_result(&mut self, row: &ResultRow) {
        self.emit(&JsonEvent::Result(row));
    }

    fn update_summary(&mut self, summary: &RunSummary) {
        self.emit(&JsonEvent::Summary(summary));
    }
}
