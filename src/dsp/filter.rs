use crate::graph::node::Signal;

/*
One-Pole Time Warp
==================

A one-pole smoother: each call moves a running sum a fixed fraction of the way
toward its input.

    sum += (input - sum) / factor

    factor = 1      →  sum tracks the input exactly
    factor = 1100   →  sum creeps toward the input, ~1/1100 of the gap per call

The unusual part: the input is TIME, not audio. Composed in front of an
oscillator, it replaces t with a lagging version of t:

    t ──→ [ LowPass ] ──→ warped t ──→ [ oscillator ] ──→ amplitude

Early in a buffer warped t barely moves, so the oscillator starts nearly
frozen and slides up toward its real pitch as the running sum catches up.
This is a pitch-glide / time pre-warp, not a frequency-domain low-pass, and
it is intentionally kept that way.

State
-----

The running sum starts at 0 and advances once per call. Two branches feeding
the same instance (see `graph::node::Shared`) both push it along, in the order
they are evaluated. A newly constructed filter always starts from 0.
*/

#[derive(Debug, Clone, PartialEq)]
pub struct LowPass {
    factor: f64,
    sum: f64,
}

impl LowPass {
    pub fn new(factor: f64) -> Self {
        Self { factor, sum: 0.0 }
    }

    /// Move the running sum toward `input` and return it.
    #[inline]
    pub fn advance(&mut self, input: f64) -> f64 {
        self.sum += (input - self.sum) / self.factor;
        self.sum
    }

    /// Current running sum without advancing.
    pub fn value(&self) -> f64 {
        self.sum
    }

    pub fn reset(&mut self) {
        self.sum = 0.0;
    }
}

impl Signal for LowPass {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.advance(t)
    }
}
