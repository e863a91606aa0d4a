use crate::{dsp::compress as curve, graph::node::Signal};

/// Peak compressor stage: see [`crate::dsp::compress`] for the curve.
#[derive(Debug, Clone)]
pub struct Compress<S> {
    signal: S,
    threshold: f64,
    ratio: f64,
}

impl<S> Compress<S> {
    pub fn new(signal: S, threshold: f64, ratio: f64) -> Self {
        Self {
            signal,
            threshold,
            ratio,
        }
    }
}

impl<S: Signal> Signal for Compress<S> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        curve::compress(self.signal.sample(t), self.threshold, self.ratio)
    }
}

/// Compress `signal` above `threshold` by `ratio`.
pub fn compress<S: Signal>(signal: S, threshold: f64, ratio: f64) -> Compress<S> {
    Compress::new(signal, threshold, ratio)
}
