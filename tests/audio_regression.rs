use saavy_tones::{
    analysis::{peak_frequency, rmsd},
    dsp::oscillator::sine,
    io::recorder::Recorder,
    sequencing::{frequency, NoteName, Pitch, Sequencer, SequencerConfig},
    synth::LeadPatch,
    AudioContext, SignalExt,
};

#[test]
fn lead_patch_is_bounded_and_audible() {
    let ctx = AudioContext::new(44_100);
    let buffer = ctx.render(&mut LeadPatch::default().build(440.0), 0.3, 0.2);

    assert_eq!(buffer.len(), 13_230);
    assert!(buffer.iter().any(|s| s.abs() > 0.0));
    assert!(buffer.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn lead_patch_renders_deterministically() {
    let ctx = AudioContext::new(44_100);
    let patch = LeadPatch::default();
    let a = ctx.render(&mut patch.build(220.0), 0.3, 0.2);
    let b = ctx.render(&mut patch.build(220.0), 0.3, 0.2);
    assert_eq!(rmsd(&a, &b), 0.0);
}

#[test]
fn lead_patch_without_glide_sounds_its_pitch() {
    let ctx = AudioContext::new(44_100);
    let patch = LeadPatch {
        glide: 1.0,
        echo_mix: 0.0,
        ..LeadPatch::default()
    };
    let buffer = ctx.render(&mut patch.build(440.0), 0.3, 1.0);
    let peak = peak_frequency(&buffer, ctx.sample_rate()).unwrap();
    // 0.3 s gives ~3.3 Hz bins
    assert!((peak - 440.0).abs() < 4.0, "peak at {peak}");
}

#[test]
fn sequencer_buffers_carry_each_pitch() {
    let ctx = AudioContext::new(48_000);
    let instrument = |f: f64| sine(f).gain(1.0);
    let mut seq = Sequencer::new(instrument, Recorder::new(), ctx, SequencerConfig::default());

    for (name, octave) in [(NoteName::C, 4), (NoteName::A, 4), (NoteName::E, 5)] {
        let buffer = seq.buffer(Pitch::new(name, octave));
        let expected = frequency(name, octave);
        let peak = peak_frequency(&buffer, ctx.sample_rate()).unwrap();
        assert!(
            (peak - expected).abs() < 4.0,
            "{name:?}{octave}: expected {expected}, peak at {peak}"
        );
    }
    assert_eq!(seq.cached(), 3);
}
