//! Rendering signals into sample buffers.

use std::{ops::Deref, sync::Arc};

use crate::graph::node::Signal;

/*
Sampling a Signal
=================

A signal is continuous; a buffer is a list of numbers. Rendering asks the
signal for its value at evenly spaced instants:

    sample[i] = signal(i / sample_rate) × volume       0 ≤ i < length
    length    = round(duration × sample_rate)

    signal:  ∿∿∿∿∿∿∿∿∿∿∿∿∿∿∿∿
    samples: • • • • • • • •     one every 1/sample_rate seconds

The renderer does not clamp. A signal that leaves [-1, 1] (or produces NaN)
lands in the buffer as-is; bounding the signal is the instrument's job, via
its compression stage.

Samples are taken strictly in index order, so a stateful signal sees t
increasing from 0, once per sample.

Audio Context
-------------

The sample rate belongs to the audio environment, not to individual calls.
`AudioContext` carries it. Create one per process (or take it from an opened
device) and pass it by reference to whatever renders.
*/

/// Handle to the audio environment's fixed sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioContext {
    sample_rate: u32,
}

impl AudioContext {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples covering `seconds`.
    pub fn frames(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64).round().max(0.0) as usize
    }

    /// Sample `signal` for `duration` seconds, scaled by `volume`.
    pub fn render<S: Signal + ?Sized>(&self, signal: &mut S, duration: f64, volume: f64) -> AudioBuffer {
        let sample_rate = self.sample_rate as f64;
        let samples: Vec<f32> = (0..self.frames(duration))
            .map(|i| (signal.sample(i as f64 / sample_rate) * volume) as f32)
            .collect();

        AudioBuffer::new(samples, self.sample_rate)
    }
}

impl Default for AudioContext {
    fn default() -> Self {
        Self::new(48_000)
    }
}

/// Immutable mono sample buffer. Clones share storage.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    samples: Arc<[f32]>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    pub fn silence(frames: usize, sample_rate: u32) -> Self {
        Self::new(vec![0.0; frames], sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Playback length in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Whether two handles point at the same storage.
    pub fn shares_storage(&self, other: &AudioBuffer) -> bool {
        Arc::ptr_eq(&self.samples, &other.samples)
    }
}

impl Deref for AudioBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}
