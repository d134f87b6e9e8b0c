//! Output sinks for batch results
//!
//! The tester never writes to the terminal itself; it reports through a
//! [`DisplaySink`] handed to it for the duration of a batch.

mod table;
mod formatter;
mod json;
mod memory;

pub use table::{ColorScheme, TableSink};
pub use formatter::{align_text, Alignment, Column, TableLayout};
pub use json::JsonSink;
pub use memory::{MemorySink, SinkEvent};

use crate::models::{Config, ResultRow, RunSummary};
use crate::types::OutputFormat;

/// Display layer driven by the resolver tester
pub trait DisplaySink: Send {
    /// A new batch of `total` entries is starting; previous rows are stale
    fn begin_batch(&mut self, total: usize);

    /// Show or hide the in-progress indicator
    fn set_busy(&mut self, busy: bool);

    /// Append one completed probe
    fn append_result(&mut self, row: &ResultRow);

    /// Replace the summary view
    fn update_summary(&mut self, summary: &RunSummary);
}

/// Factory for creating the sink selected by configuration
pub struct OutputSinkFactory;

impl OutputSinkFactory {
    /// Create a stdout sink based on format, color support and verbosity
    pub fn create_sink(config: &Config) -> Box<dyn DisplaySink> {
        match config.output_format {
            OutputFormat::Table => Box::new(TableSink::new(
                std::io::stdout(),
                config.enable_color,
                config.verbose,
            )),
            OutputFormat::Json => Box::new(JsonSink::new(std::io::stdout())),
        }
    }
}
