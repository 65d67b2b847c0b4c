//! Integrates the reference integrands and prints value, error and timing.
//!
//! Run with: cargo run --bin kronrod-demo
//!
//! Diagnostics go through `tracing`; set `RUST_LOG=debug` for more detail.

use std::time::Instant;

use anyhow::Context;
use kronrod::prelude::*;
use tracing_subscriber::EnvFilter;

fn sawtooth_wave(x: f64) -> f64 {
    ((x % 1234.0) / 100.0).powi(2)
        + x.sqrt() * 0.2
        + (x / 58.0 * (-x / 2000.0).exp()).sin() * 30.0
}

fn offset_parabola(x: f64) -> f64 {
    1e-5 + x.powi(2)
}

fn staircase(x: f64) -> f64 {
    1.0 / (1.0 + x % 12.0) + ((x % 23.0) / 5.0).floor() * 0.3
}

fn damped_sine(x: f64) -> f64 {
    x.sin() * x
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cases: [(&str, fn(f64) -> f64, f64, f64); 4] = [
        ("sawtooth_wave", sawtooth_wave, 14.9, 4534.453),
        ("offset_parabola", offset_parabola, -1e-6, 3e-6),
        ("staircase", staircase, 474_564.0, 474_599.0),
        ("damped_sine", damped_sine, -50.0, 50.0),
    ];
    let options = QuadOptions::new(0.0, 1e-13).with_max_step(99e99);

    let start = Instant::now();
    let mut reports = Vec::with_capacity(cases.len());
    for (name, f, a, b) in cases {
        // Spacing-limit stops are expected for the staircase; only reject bad input.
        let report = try_integrate(f, a, b, &options)
            .with_context(|| format!("integrating {name} over [{a}, {b}]"))?;
        reports.push((name, report));
    }
    let elapsed = start.elapsed();

    for (name, report) in &reports {
        println!(
            "{name:>16}: {:.15}, error {:.15e} ({} regions, {:?})",
            report.integral, report.error, report.regions, report.termination
        );
    }
    println!("Elapsed: {:.5}ms", elapsed.as_secs_f64() * 1e3);

    Ok(())
}
