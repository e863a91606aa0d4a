//! Benchmarks for the closed-form ADSR.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    dsp::{envelope::adsr, oscillator::sine},
    AudioContext, SignalExt,
};

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = AudioContext::new(SAMPLE_RATE);

    for &duration in DURATIONS {
        let mut env = adsr(0.01, 0.2, 0.1, 0.0, 0.3);
        group.bench_with_input(BenchmarkId::new("adsr", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut env), d, 1.0))
        });

        let mut shaped = sine(440.0).envelope(adsr(0.01, 0.2, 0.1, 0.05, 0.3));
        group.bench_with_input(BenchmarkId::new("enveloped_sine", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut shaped), d, 1.0))
        });
    }

    group.finish();
}
