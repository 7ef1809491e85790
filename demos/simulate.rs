//! Simulated transfer driving two progress reporters
//!
//! Run with: cargo run --example simulate

use meterline::format::{binary_size, with_unit};
use meterline::{ReporterOptions, Result};
use std::thread;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // A page counter that finishes by reaching its total.
    let mut pages = ReporterOptions::new("gallery", 12)
        .formatter(with_unit("pages"))
        .running_label("fetching")
        .build()?;
    for _ in 0..12 {
        thread::sleep(Duration::from_millis(120));
        pages.advance(1);
    }

    // A byte meter fed uneven chunks, interrupted before completion.
    let mut transfer = ReporterOptions::new("sample.bin", 48 * 1024 * 1024)
        .formatter(binary_size)
        .time_tracking(true)
        .build()?;

    let mut seed: u64 = 0x9e37_79b9;
    for _ in 0..60 {
        // xorshift keeps the chunk sizes uneven without pulling in a
        // random number generator for a demo.
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let chunk = seed % (1024 * 1024);

        thread::sleep(Duration::from_millis(50));
        transfer.advance_at(chunk, Instant::now());
    }
    transfer.abort("interrupted");

    Ok(())
}
