//! Benchmarks for the stateless combinators.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    dsp::oscillator::{saw, sine, triangle},
    graph::compose,
    AudioContext, Signal, SignalExt,
};

use crate::{DURATIONS, SAMPLE_RATE};

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");
    let ctx = AudioContext::new(SAMPLE_RATE);

    for &duration in DURATIONS {
        // Static dispatch: the whole chain monomorphizes into one function
        let mut stack = saw(110.0)
            .mix(sine(440.0), 0.6)
            .mix(triangle(880.0), 0.1)
            .compress(0.4, 3.0)
            .gain(2.0);
        group.bench_with_input(BenchmarkId::new("static_chain", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut stack), d, 1.0))
        });

        // Dynamic dispatch through compose
        let stages: Vec<Box<dyn Signal>> = vec![
            Box::new(|t: f64| t * 0.5),
            Box::new(|t: f64| t + 0.01),
            sine(440.0).boxed(),
        ];
        let mut composed = compose(stages);
        group.bench_with_input(BenchmarkId::new("boxed_compose", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(black_box(&mut composed), d, 1.0))
        });
    }

    group.finish();
}
