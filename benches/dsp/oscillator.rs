//! Benchmarks for oscillator waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    dsp::oscillator::{noise, saw, sine, square, triangle},
    AudioContext,
};

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");
    let ctx = AudioContext::new(SAMPLE_RATE);

    for &duration in DURATIONS {
        // Sine - uses sin() transcendental function
        let mut osc = sine(440.0);
        group.bench_with_input(BenchmarkId::new("sine", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut osc), d, 1.0))
        });

        // Sawtooth - two float remainders per sample
        let mut osc = saw(440.0);
        group.bench_with_input(BenchmarkId::new("saw", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut osc), d, 1.0))
        });

        let mut osc = triangle(440.0);
        group.bench_with_input(BenchmarkId::new("triangle", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut osc), d, 1.0))
        });

        // Square - branch per sample
        let mut osc = square(440.0);
        group.bench_with_input(BenchmarkId::new("square", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut osc), d, 1.0))
        });

        // Noise - RNG per sample
        let mut osc = noise();
        group.bench_with_input(BenchmarkId::new("noise", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut osc), d, 1.0))
        });
    }

    group.finish();
}
