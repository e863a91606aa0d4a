//! Benchmarks for signal rendering and sequencing.
//!
//! Run with: cargo bench
//!
//! Notes are rendered ahead of time into whole buffers, so the numbers that
//! matter are per-buffer costs at common render lengths:
//!   - 0.01 s =   480 samples at 48 kHz
//!   - 0.1 s  =  4800 samples
//!   - 0.3 s  = 14400 samples (the sequencer's default note length)
//!
//! Benchmark groups:
//!   - dsp/*        Oscillators, the time warp, envelope, combinators
//!   - scenarios/*  Full lead patch, a sequence bounce, the block mixer

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Render lengths in seconds.
pub const DURATIONS: &[f64] = &[0.01, 0.1, 0.3];

pub const SAMPLE_RATE: u32 = 48_000;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_envelope,
    dsp::bench_mix,
    scenarios::bench_voices,
    scenarios::bench_mix,
);
criterion_main!(benches);
