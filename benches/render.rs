//! Rendering benchmarks
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meterline::format::{binary_size, duration_str};
use meterline::ReporterOptions;

fn bench_advance_hidden(c: &mut Criterion) {
    let mut reporter = ReporterOptions::new("bench", u64::MAX)
        .formatter(binary_size)
        .build_hidden()
        .unwrap();

    c.bench_function("advance_hidden", |b| {
        b.iter(|| reporter.advance(black_box(4096)));
    });
}

fn bench_advance_sink(c: &mut Criterion) {
    let mut reporter = ReporterOptions::new("bench", u64::MAX)
        .formatter(binary_size)
        .build_with_writer(std::io::sink())
        .unwrap();

    c.bench_function("advance_sink", |b| {
        b.iter(|| reporter.advance(black_box(4096)));
    });
}

fn bench_duration_str(c: &mut Criterion) {
    c.bench_function("duration_str", |b| {
        b.iter(|| duration_str(black_box(93_784)));
    });
}

criterion_group!(
    benches,
    bench_advance_hidden,
    bench_advance_sink,
    bench_duration_str
);
criterion_main!(benches);
