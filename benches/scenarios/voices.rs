//! Benchmarks for complete instruments and sequences.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tones::{
    io::recorder::Recorder,
    sequencing::{Sequence, Sequencer, SequencerConfig, VirtualClock, VirtualTimer},
    synth::LeadPatch,
    AudioContext,
};

use crate::{DURATIONS, SAMPLE_RATE};

fn song() -> Sequence {
    Sequence::builder()
        .note("a4")
        .note("a4_cs4_e4")
        .scaled("a4", 0.5)
        .rest(0.5)
        .chord([("a3", 0.5), ("d4", 0.25)])
        .delayed("a3_cs3_e3", 0.25, 0.0625)
        .bpm(120.0)
        .note("c4")
        .note("d4")
        .note("e4")
        .build()
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let ctx = AudioContext::new(SAMPLE_RATE);
    let patch = LeadPatch::default();

    for &duration in DURATIONS {
        // Full patch: 3 oscillators, shared time warp, echo, compressor, ADSR
        group.bench_with_input(BenchmarkId::new("lead", duration), &duration, |b, &d| {
            b.iter(|| ctx.render(&mut patch.build(black_box(440.0)), d, 0.2))
        });
    }

    // Cold cache: every pitch rendered, then bounced to one track
    group.bench_function("sequence_bounce", |b| {
        b.iter(|| {
            let clock = VirtualClock::new();
            let mut sequencer = Sequencer::new(
                patch,
                Recorder::with_clock(clock.clone()),
                ctx,
                SequencerConfig::default(),
            );
            sequencer.sequence(song(), &mut VirtualTimer::new(clock));
            let track = sequencer.sink().mixdown(SAMPLE_RATE);
            track
        })
    });

    group.finish();
}
