//! Benchmarks for the device-side block mixer.
//!
//! These simulate the audio callback pulling blocks while several rendered
//! notes overlap.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    io::{mixer::mixer, OutputNode, OutputSink},
    synth::LeadPatch,
    AudioContext,
};

use crate::SAMPLE_RATE;

/// Common callback sizes.
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/mix");
    let ctx = AudioContext::new(SAMPLE_RATE);
    let note = ctx.render(&mut LeadPatch::default().build(440.0), 0.3, 0.2);

    for &size in BLOCK_SIZES {
        let mut block = vec![0.0f32; size];

        // 8 overlapping notes staggered by 10 ms, re-queued whenever they finish
        group.bench_with_input(BenchmarkId::new("8_voices", size), &size, |b, _| {
            let (mut sink, mut mixer) = mixer(SAMPLE_RATE, 64);
            mixer.set_gain(OutputNode::bus("wet"), 0.5);
            b.iter(|| {
                if mixer.active() == 0 {
                    for i in 0..8 {
                        let node = if i % 2 == 0 {
                            OutputNode::Master
                        } else {
                            OutputNode::bus("wet")
                        };
                        sink.play(note.clone(), i as f64 * 0.01, &node);
                    }
                }
                mixer.render_block(black_box(&mut block));
            })
        });
    }

    group.finish();
}
