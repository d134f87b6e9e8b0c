//! Table sink with optional terminal colors
//!
//! Streams the header when a batch begins, one row per probe and the final
//! summary when the batch goes idle.

use super::formatter::TableLayout;
use super::DisplaySink;
use crate::models::{ResultRow, RunSummary};
use crate::types::PerformanceLevel;
use colored::*;
use std::io::Write;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub error: Color,
    pub muted: Color,
    pub excellent: Color,
    pub good: Color,
    pub fair: Color,
    pub poor: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            muted: Color::BrightBlack,
            excellent: Color::Green,
            good: Color::Cyan,
            fair: Color::Yellow,
            poor: Color::Magenta,
        }
    }
}

impl ColorScheme {
    fn for_level(&self, level: PerformanceLevel) -> Color {
        match level {
            PerformanceLevel::Excellent => self.excellent,
            PerformanceLevel::Good => self.good,
            PerformanceLevel::Fair => self.fair,
            PerformanceLevel::Poor => self.poor,
        }
    }
}

/// Writes the results table to any `Write` target
pub struct TableSink<W: Write + Send> {
    out: W,
    layout: TableLayout,
    color_scheme: ColorScheme,
    enable_color: bool,
    verbose: bool,
    total: usize,
    latest: Option<RunSummary>,
}

impl<W: Write + Send> TableSink<W> {
    pub fn new(out: W, enable_color: bool, verbose: bool) -> Self {
        Self {
            out,
            layout: TableLayout::results(),
            color_scheme: ColorScheme::default(),
            enable_color,
            verbose,
            total: 0,
            latest: None,
        }
    }

    /// Hand back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn line(&mut self, text: impl std::fmt::Display) {
        let _ = writeln!(self.out, "{}", text);
    }

    fn format_row(&self, row: &ResultRow) -> String {
        let result = &row.result;
        let cells = self.layout.pad_cells(&[
            row.index.to_string(),
            row.entry.name.clone(),
            row.entry.location.clone(),
            result.status_label().to_string(),
            result.time_label(),
            row.display_ip.clone(),
        ]);

        let (status_color, time_color) = if result.success {
            let level = PerformanceLevel::from_millis(result.time);
            (self.color_scheme.success, self.color_scheme.for_level(level))
        } else {
            (self.color_scheme.error, self.color_scheme.muted)
        };

        let styled = [
            cells[0].clone(),
            cells[1].clone(),
            cells[2].clone(),
            self.colorize(&cells[3], status_color).to_string(),
            self.colorize(&cells[4], time_color).to_string(),
            cells[5].clone(),
        ];
        self.layout.join_row(&styled)
    }

    fn format_summary(&self, summary: &RunSummary) -> Vec<String> {
        vec![
            self.bold("Summary").to_string(),
            format!("  Total tests:  {}", summary.total_tests),
            format!("  Success rate: {}%", summary.success_rate),
            format!("  Average time: {}ms", summary.avg_time),
        ]
    }
}

impl<W: Write + Send> DisplaySink for TableSink<W> {
    fn begin_batch(&mut self, total: usize) {
        self.total = total;
        self.latest = None;

        let title = if self.enable_color {
            "DoH Resolver Latency Test".color(self.color_scheme.header).bold()
        } else {
            "DoH Resolver Latency Test".normal()
        };
        let border = self.layout.border();
        let header = self.bold(&self.layout.header_row()).to_string();
        self.line(title);
        self.line(&border);
        self.line(header);
        self.line(&border);
    }

    fn set_busy(&mut self, busy: bool) {
        if busy {
            let note = self.colorize(
                &format!("Testing {} resolvers...", self.total),
                self.color_scheme.muted,
            );
            if self.verbose {
                let _ = writeln!(std::io::stderr(), "{}", note);
            }
            return;
        }

        let border = self.layout.border();
        self.line(border);
        if let Some(summary) = self.latest {
            self.line("");
            for line in self.format_summary(&summary) {
                self.line(line);
            }
        }
        let _ = self.out.flush();
    }

    fn append_result(&mut self, row: &ResultRow) {
        let text = self.format_row(row);
        self.line(text);

        if let Some(ref error) = row.result.error {
            let detail = self.colorize(&format!("    error: {}", error), self.color_scheme.muted);
            self.line(detail);
        }

        if self.verbose && !row.result.answers.is_empty() {
            let answers = format!("    answers: {}", row.result.answers.join(", "));
            let answers = self.colorize(&answers, self.color_scheme.muted);
            self.line(answers);
        }
        let _ = self.out.flush();
    }

    fn update_summary(&mut self, summary: &RunSummary) {
        self.latest = Some(*summary);

        let progress = format!(
            "    [{}/{}] success {}%, avg {}ms",
            summary.total_tests, self.total, summary.success_rate, summary.avg_time
        );
        let progress = self.colorize(&progress, self.color_scheme.muted);
        self.line(progress);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::models::{ServerEntry, SummaryAccumulator, TestResult};
    use crate::types::AttemptKind;

    fn render(verbose: bool, rows: &[ResultRow], summary: RunSummary) -> String {
        let mut sink = TableSink::new(Vec::new(), false, verbose);
        sink.begin_batch(rows.len());
        sink.set_busy(true);
        for row in rows {
            sink.append_result(row);
            sink.update_summary(&summary);
        }
        sink.set_busy(false);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    fn rows() -> Vec<ResultRow> {
        vec![
            ResultRow::new(
                1,
                ServerEntry::new("Cloudflare DNS", "1.1.1.1", "Global"),
                TestResult::success(23, Some("203.0.113.4".into()), vec!["93.184.215.14".into()], AttemptKind::Direct),
                "Unknown",
            ),
            ResultRow::new(
                2,
                ServerEntry::new("Quad9", "9.9.9.9", "Global"),
                TestResult::failure(&ProbeError::HttpStatus(500)),
                "203.0.113.4",
            ),
        ]
    }

    #[test]
    fn test_plain_table_rows() {
        let output = render(false, &rows(), RunSummary::from_counts(2, 1, 23));

        assert!(output.contains("| Name"));
        assert!(output.contains("Cloudflare DNS"));
        assert!(output.contains("Success"));
        assert!(output.contains("23ms"));
        assert!(output.contains("Failed"));
        assert!(output.contains("    error: HTTP error: 500"));
        assert!(output.contains("Success rate: 50%"));
        assert!(output.contains("Average time: 23ms"));
        assert!(!output.contains("answers:"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_failed_row_uses_placeholder_and_client_ip() {
        let output = render(false, &rows(), RunSummary::from_counts(2, 1, 23));
        let failed_line = output.lines().find(|l| l.contains("Quad9")).unwrap();
        assert!(failed_line.contains("      - |"));
        assert!(failed_line.contains("203.0.113.4"));
    }

    #[test]
    fn test_verbose_shows_answers_and_progress() {
        let output = render(true, &rows(), RunSummary::from_counts(2, 1, 23));
        assert!(output.contains("answers: 93.184.215.14"));
        assert!(output.contains("[2/2] success 50%, avg 23ms"));
    }

    #[test]
    fn test_running_summary_after_each_row() {
        let rows = rows();
        let mut sink = TableSink::new(Vec::new(), false, false);
        let mut accumulator = SummaryAccumulator::new();
        sink.begin_batch(rows.len());
        sink.set_busy(true);
        for row in &rows {
            sink.append_result(row);
            sink.update_summary(&accumulator.record(&row.result));
        }
        sink.set_busy(false);
        let output = String::from_utf8(sink.into_inner()).unwrap();

        let first = output.find("[1/2] success 100%, avg 23ms").unwrap();
        let second_row = output.find("Quad9").unwrap();
        let second = output.find("[2/2] success 50%, avg 23ms").unwrap();
        assert!(first < second_row && second_row < second);
    }

    #[test]
    fn test_rows_are_aligned_with_borders() {
        let output = render(false, &rows(), RunSummary::from_counts(2, 1, 23));
        let border_width = TableLayout::results().border().chars().count();
        for line in output.lines().filter(|l| l.starts_with('|')) {
            assert_eq!(line.chars().count(), border_width, "misaligned: {}", line);
        }
    }

    #[test]
    fn test_no_summary_without_results() {
        let output = render(false, &[], RunSummary::default());
        assert!(!output.contains("Summary"));
    }
}
