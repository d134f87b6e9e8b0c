//! Performance benchmarks for the DoH latency tester
//!
//! Covers the per-probe hot paths: summary arithmetic, server list parsing,
//! DoH body parsing and row rendering.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use doh_latency_tester::{
    error::ProbeError,
    models::{DohJsonResponse, ResultRow, RunSummary, ServerEntry, SummaryAccumulator, TestResult},
    output::{DisplaySink, JsonSink, TableSink},
    types::AttemptKind,
};
use std::hint::black_box;

/// Mixed results, every fourth one failed
fn create_sample_results(count: usize) -> Vec<TestResult> {
    (0..count)
        .map(|i| {
            if i % 4 == 3 {
                TestResult::failure(&ProbeError::HttpStatus(503))
            } else {
                TestResult::success(
                    20 + (i as u64 * 37) % 400,
                    Some("198.51.100.7".to_string()),
                    vec!["93.184.215.14".to_string()],
                    AttemptKind::Direct,
                )
            }
        })
        .collect()
}

fn create_server_list(count: usize) -> String {
    (0..count)
        .map(|i| format!("  10.0.{}.{}  \n\n", i / 256, i % 256))
        .collect()
}

fn benchmark_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    group.bench_function("from_counts", |b| {
        b.iter(|| RunSummary::from_counts(black_box(14), black_box(11), black_box(1_337)));
    });

    for size in [14usize, 100, 1000] {
        let results = create_sample_results(size);
        group.bench_with_input(BenchmarkId::new("accumulate", size), &results, |b, results| {
            b.iter(|| {
                let mut accumulator = SummaryAccumulator::new();
                for result in results {
                    black_box(accumulator.record(result));
                }
                accumulator.summary()
            });
        });
    }

    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for size in [10usize, 100, 1000] {
        let text = create_server_list(size);
        group.bench_with_input(BenchmarkId::new("custom_list", size), &text, |b, text| {
            b.iter(|| ServerEntry::parse_custom_list(black_box(text)));
        });
    }

    let body = br#"{"Status":0,"TC":false,"RD":true,"RA":true,"AD":false,"CD":false,
        "Question":[{"name":"example.com.","type":1}],
        "Answer":[{"name":"example.com.","type":1,"TTL":3600,"data":"93.184.215.14"}],
        "originIP":"198.51.100.7"}"#;
    group.bench_function("doh_json_body", |b| {
        b.iter(|| DohJsonResponse::from_slice(black_box(body)));
    });

    group.finish();
}

fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let servers = ServerEntry::default_list();
    let rows: Vec<ResultRow> = servers
        .into_iter()
        .zip(create_sample_results(14))
        .enumerate()
        .map(|(i, (entry, result))| ResultRow::new(i + 1, entry, result, "Unknown"))
        .collect();

    group.bench_function("table_batch", |b| {
        b.iter(|| {
            let mut sink = TableSink::new(Vec::with_capacity(4096), false, false);
            render(&mut sink, &rows);
            sink.into_inner()
        });
    });

    group.bench_function("json_batch", |b| {
        b.iter(|| {
            let mut sink = JsonSink::new(Vec::with_capacity(8192));
            render(&mut sink, &rows);
            sink.into_inner()
        });
    });

    group.finish();
}

fn render(sink: &mut dyn DisplaySink, rows: &[ResultRow]) {
    let mut accumulator = SummaryAccumulator::new();
    sink.begin_batch(rows.len());
    sink.set_busy(true);
    for row in rows {
        sink.append_result(row);
        sink.update_summary(&accumulator.record(&row.result));
    }
    sink.set_busy(false);
}

criterion_group!(benches, benchmark_summary, benchmark_parsing, benchmark_rendering);

criterion_main!(benches);
