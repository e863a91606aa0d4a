//! Benchmarks for the low-pass time warp.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    dsp::{filter::LowPass, oscillator::sine},
    AudioContext, SignalExt,
};

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let ctx = AudioContext::new(SAMPLE_RATE);

    for &duration in DURATIONS {
        // Fresh filter per iteration so the running sum starts at zero each time
        group.bench_with_input(BenchmarkId::new("lowpass", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(&mut LowPass::new(black_box(1100.0)), d, 1.0))
        });

        group.bench_with_input(BenchmarkId::new("warped_sine", duration), &duration, |b, &d| {
            b.iter(|| {
                let mut warped = LowPass::new(1100.0).then(sine(black_box(440.0)));
                ctx.render(&mut warped, d, 1.0)
            })
        });

        // Shared handle - RefCell borrow per sample
        group.bench_with_input(BenchmarkId::new("shared", duration), &duration, |b, &d| {
            b.iter(|| {
                let shared = LowPass::new(1100.0).shared();
                let mut both = shared.clone().mix(shared.delay(-0.1), 0.5);
                ctx.render(&mut both, d, 1.0)
            })
        });
    }

    group.finish();
}
