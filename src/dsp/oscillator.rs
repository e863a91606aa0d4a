//! Closed-form oscillator waveforms.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f64::consts::PI;

use rand::Rng;

use crate::graph::node::Signal;

/*
Oscillators as Pure Functions
=============================

Unlike a phase-accumulating oscillator (which advances a phase counter once
per sample), every waveform here is computed directly from the absolute time t.
There is no state: sampling t = 0.25 twice gives the same answer, and sampling
out of order is fine.

Phase
-----

The periodic waveforms share one normalized phase:

    n = ((t mod (1/f)) × f) mod 1

`mod` is the truncating remainder (Rust's `%` on floats). For t ≥ 0 this
gives n in [0, 1). For negative t (after a delay) n lands in (-1, 0], which
shifts the negative half of the timeline by one period's worth of shape. The
waveforms below are written exactly in terms of n, so that behavior is kept
rather than wrapped into [0, 1).

Shapes
------

    sine          sin(2π f t)

    saw           -1 + 2n          rising ramp, drops at each period start
                   ╱│╱│╱│

    saw inverse    1 - 2n          falling ramp (phase-inverted saw)
                   │╲│╲│╲

    triangle       n < 0.5:  -1 + 2(2n)
                   else:      1 - 2(2n)

                  (the second half is written as coded, starting from -1 at
                   n = 0.5 and falling, so this "triangle" is really two
                   rising/falling ramps with a jump at the midpoint)

    square         n > 0.5:  1  else -1

Noise
-----

White noise draws a uniform value in [-1, 1) on every call. It is the only
non-deterministic source and sits outside determinism guarantees.

`noise()` and `impulse_response()` are standalone generators. No instrument
in this crate is built from them; they are there for callers who want a
noise layer or a decaying burst to render as a reverb impulse:

    let ir = ctx.render(&mut impulse_response(2.0, 1000.0), 2.0, 1.0);
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Saw,
    SawInverse,
    Triangle,
    Square,
}

/// Normalized phase in (-1, 1) for frequency `frequency` at time `t`.
#[inline]
pub fn phase(t: f64, frequency: f64) -> f64 {
    ((t % (1.0 / frequency)) * frequency) % 1.0
}

impl Waveform {
    /// Evaluate the waveform at time `t` for `frequency` Hz.
    #[inline]
    pub fn value(self, t: f64, frequency: f64) -> f64 {
        match self {
            Waveform::Sine => (t * 2.0 * PI * frequency).sin(),
            Waveform::Saw => -1.0 + 2.0 * phase(t, frequency),
            Waveform::SawInverse => 1.0 - 2.0 * phase(t, frequency),
            Waveform::Triangle => {
                let n = phase(t, frequency);
                if n < 0.5 {
                    -1.0 + 2.0 * (2.0 * n)
                } else {
                    1.0 - 2.0 * (2.0 * n)
                }
            }
            Waveform::Square => {
                if phase(t, frequency) > 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// A waveform bound to a frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub waveform: Waveform,
    pub frequency: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, frequency: f64) -> Self {
        Self {
            waveform,
            frequency,
        }
    }
}

impl Signal for Oscillator {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.waveform.value(t, self.frequency)
    }
}

pub fn sine(frequency: f64) -> Oscillator {
    Oscillator::new(Waveform::Sine, frequency)
}

/// Rising sawtooth.
pub fn saw(frequency: f64) -> Oscillator {
    Oscillator::new(Waveform::Saw, frequency)
}

/// Falling sawtooth.
pub fn saw_inverse(frequency: f64) -> Oscillator {
    Oscillator::new(Waveform::SawInverse, frequency)
}

pub fn triangle(frequency: f64) -> Oscillator {
    Oscillator::new(Waveform::Triangle, frequency)
}

pub fn square(frequency: f64) -> Oscillator {
    Oscillator::new(Waveform::Square, frequency)
}

/// Uniform white noise in [-1, 1).
pub fn noise() -> impl Signal {
    let mut rng = rand::rng();
    move |_t: f64| rng.random_range(-1.0..1.0)
}

/// Noise burst decaying by a factor of `decay` over `duration` seconds.
///
/// Rendered for `duration` seconds this is a usable reverb impulse response.
pub fn impulse_response(duration: f64, decay: f64) -> impl Signal {
    let mut source = noise();
    move |t: f64| source.sample(t) * decay.powf(-t / duration)
}
