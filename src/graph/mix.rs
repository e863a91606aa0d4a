use crate::{dsp::mix::crossfade, graph::node::Signal};

/*
Parallel Signal Mixing
======================

Mix evaluates two signals at the same t and crossfades them:

    output(t) = A(t) × (1 - x) + B(t) × x

  - x = 0.0 → 100% A (exactly A)
  - x = 0.5 → 50% A, 50% B
  - x = 1.0 → 100% B (exactly B)

Evaluation order: A is always sampled before B. That only matters when both
branches reach into the same `Shared` stateful stage, in which case A's call
advances the shared state first.

Example usage:
  let f = 220.0;

  // Sub-octave saw with a sine on top, then a touch of triangle sparkle
  let body = saw(f / 4.0).mix(sine(f), 0.6).mix(triangle(f * 2.0), 0.1);

  // Dry signal plus a quiet echo
  let wet = body.shared();
  let echoed = wet.clone().mix(wet.delay(-0.1).gain(0.2), 0.2);
*/

#[derive(Debug, Clone)]
pub struct Mix<A, B> {
    source_a: A,
    source_b: B,
    balance: f64,
}

impl<A, B> Mix<A, B> {
    pub fn new(source_a: A, source_b: B, balance: f64) -> Self {
        Self {
            source_a,
            source_b,
            balance,
        }
    }
}

impl<A: Signal, B: Signal> Signal for Mix<A, B> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        let a = self.source_a.sample(t);
        let b = self.source_b.sample(t);
        crossfade(a, b, self.balance)
    }
}

/// Free-function form of [`Mix::new`].
pub fn mix<A: Signal, B: Signal>(a: A, b: B, balance: f64) -> Mix<A, B> {
    Mix::new(a, b, balance)
}
