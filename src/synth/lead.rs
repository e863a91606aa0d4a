#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{envelope::Adsr, filter::LowPass, oscillator::Oscillator, oscillator::Waveform},
    graph::{node::Signal, SignalExt},
    synth::instrument::Instrument,
};

/*
Lead Patch
==========

The house lead: three stacked oscillators, glided in through the low-pass
time warp, doubled by a quiet echo, squashed and shaped.

    f/4 saw ──┐
              mix 0.6 ──┐
    f   sine ─┘         mix 0.1 ── body
    2f  tri ────────────┘

    t ── LowPass(1100) ── body ─┬──────────────────────┐
          (one shared instance) │                      mix 0.2 ── compress ── ×2 ── × adsr
                                └── delay -0.1 ── ×0.2 ┘           0.4 : 3

The dry path and the echo path drive ONE low-pass instance, so every output
sample advances its running sum twice: dry first, then echo. That interleaving
is part of the sound and is kept.

All numbers above are fields of `LeadPatch`; `LeadPatch::default()` is the
reference voicing.
*/

/// One oscillator layer: waveform at `ratio × frequency`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub waveform: Waveform,
    pub ratio: f64,
}

impl Layer {
    pub fn new(waveform: Waveform, ratio: f64) -> Self {
        Self { waveform, ratio }
    }

    fn at(&self, frequency: f64) -> Oscillator {
        Oscillator::new(self.waveform, frequency * self.ratio)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadPatch {
    pub sub: Layer,
    pub tone: Layer,
    /// Balance of `tone` against `sub`
    pub tone_mix: f64,
    pub overtone: Layer,
    /// Balance of `overtone` against the sub/tone blend
    pub overtone_mix: f64,

    /// Low-pass factor for the time warp (1 disables the glide)
    pub glide: f64,

    /// Echo time offset in seconds (negative = later)
    pub echo_offset: f64,
    pub echo_gain: f64,
    pub echo_mix: f64,

    pub threshold: f64,
    pub ratio: f64,
    pub output_gain: f64,

    pub envelope: Adsr,
}

impl Default for LeadPatch {
    fn default() -> Self {
        Self {
            sub: Layer::new(Waveform::Saw, 0.25),
            tone: Layer::new(Waveform::Sine, 1.0),
            tone_mix: 0.6,
            overtone: Layer::new(Waveform::Triangle, 2.0),
            overtone_mix: 0.1,
            glide: 1100.0,
            echo_offset: -0.1,
            echo_gain: 0.2,
            echo_mix: 0.2,
            threshold: 0.4,
            ratio: 3.0,
            output_gain: 2.0,
            envelope: Adsr::new(0.01, 0.2, 0.1, 0.0, 0.3),
        }
    }
}

impl LeadPatch {
    /// The oscillator stack without glide, echo or dynamics.
    pub fn body(&self, frequency: f64) -> impl Signal + 'static {
        self.sub
            .at(frequency)
            .mix(self.tone.at(frequency), self.tone_mix)
            .mix(self.overtone.at(frequency), self.overtone_mix)
    }

    /// Full voice at `frequency`.
    pub fn build(&self, frequency: f64) -> impl Signal + 'static {
        let glided = LowPass::new(self.glide).then(self.body(frequency)).shared();
        let echo = glided.clone().delay(self.echo_offset).gain(self.echo_gain);

        glided
            .mix(echo, self.echo_mix)
            .compress(self.threshold, self.ratio)
            .gain(self.output_gain)
            .envelope(self.envelope)
    }
}

impl Instrument for LeadPatch {
    fn voice(&self, frequency: f64) -> Box<dyn Signal> {
        self.build(frequency).boxed()
    }
}
