use crate::graph::node::Signal;

/*
Amplitude Control
=================

Two flavors of multiplication:

  Gain       signal(t) × g          a fixed scalar
  Amplify    signal(t) × env(t)     a second signal, usually an envelope

Both are stateless wrappers; any state lives in the wrapped signals. Gain is
used both before and after nonlinear stages - driving a signal into the
compressor and making it back up afterwards are the same operation.

The modulator receives the same absolute t as the signal. An envelope wrapped
around a delayed signal is therefore NOT delayed with it.
*/

#[derive(Debug, Clone)]
pub struct Gain<S> {
    signal: S,
    gain: f64,
}

impl<S> Gain<S> {
    pub fn new(signal: S, gain: f64) -> Self {
        Self { signal, gain }
    }
}

impl<S: Signal> Signal for Gain<S> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.gain * self.signal.sample(t)
    }
}

/// Multiply a signal by a modulator signal.
#[derive(Debug, Clone)]
pub struct Amplify<N, M> {
    pub signal: N,
    pub modulator: M,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, modulator: M) -> Self {
        Self { signal, modulator }
    }
}

impl<N: Signal, M: Signal> Signal for Amplify<N, M> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        let value = self.signal.sample(t);
        value * self.modulator.sample(t)
    }
}

pub fn gain<S: Signal>(signal: S, gain: f64) -> Gain<S> {
    Gain::new(signal, gain)
}

/// Shape `signal` by an amplitude curve such as an ADSR.
pub fn envelope<S: Signal, E: Signal>(signal: S, env: E) -> Amplify<S, E> {
    Amplify::new(signal, env)
}
