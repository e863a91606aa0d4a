use crate::graph::node::Signal;

/*
Serial Composition (Then)
=========================

Then feeds the OUTPUT of the first signal in as the TIME of the second:

    t ──→ [ first ] ──→ t' ──→ [ second ] ──→ amplitude

    output(t) = second(first(t))

This is how the low-pass time warp is put in front of an oscillator stack:

    let warped = LowPass::new(1100.0).then(sawsin);

Chains associate: `a.then(b).then(c)` and `a.then(b.then(c))` both compute
c(b(a(t))). For a list of stages known only at runtime, `compose` folds a
vector of boxed signals left to right, and an empty list is the identity.
*/

#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<A, B> Then<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Signal, B: Signal> Signal for Then<A, B> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        let inner = self.first.sample(t);
        self.second.sample(inner)
    }
}

/// Runtime chain of stages applied first to last.
pub struct Compose {
    stages: Vec<Box<dyn Signal>>,
}

impl Signal for Compose {
    fn sample(&mut self, t: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(t, |value, stage| stage.sample(value))
    }
}

/// Compose stages so that `stages[0]` runs first.
pub fn compose(stages: Vec<Box<dyn Signal>>) -> Compose {
    Compose { stages }
}
