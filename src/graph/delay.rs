use crate::graph::node::Signal;

/*
Time Shift
==========

A delay line in the sample domain needs a ring buffer. In the time domain it
is just an offset on t:

    output(t) = signal(t + d)

  d > 0   the signal runs AHEAD (we hear what it would play d seconds later)
  d < 0   the signal runs BEHIND, starting -d seconds late

Mixed with the undelayed original, a negative shift is a single echo:

    dry:   ▁▂▅█▅▂▁▁▁▁▁▁
    echo:  ▁▁▁▁▁▂▅█▅▂▁▁   (d = -0.1, quieter)

Note that the shifted signal is asked for NEGATIVE times at the start of a
buffer. Oscillators are defined there (see the phase notes in
`dsp::oscillator`) and so is the low-pass time warp, which simply smooths
whatever t it receives.
*/

#[derive(Debug, Clone)]
pub struct Delay<S> {
    signal: S,
    offset: f64,
}

impl<S> Delay<S> {
    pub fn new(signal: S, offset: f64) -> Self {
        Self { signal, offset }
    }
}

impl<S: Signal> Signal for Delay<S> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.signal.sample(t + self.offset)
    }
}

/// Shift `signal` in time by `offset` seconds.
pub fn delay<S: Signal>(signal: S, offset: f64) -> Delay<S> {
    Delay::new(signal, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_time_argument() {
        let mut node = delay(|t: f64| t, 0.5);
        assert_eq!(node.sample(1.0), 1.5);

        let mut node = delay(|t: f64| t, -0.1);
        assert!((node.sample(0.0) + 0.1).abs() < 1e-12);
    }

    #[test]
    fn negative_delay_plays_later() {
        // A step that switches on at t = 0
        let step = |t: f64| if t >= 0.0 { 1.0 } else { 0.0 };
        let mut late = delay(step, -0.2);

        assert_eq!(late.sample(0.1), 0.0);
        assert_eq!(late.sample(0.2), 1.0);
    }

    #[test]
    fn zero_delay_is_identity() {
        let mut node = delay(|t: f64| t * t, 0.0);
        assert_eq!(node.sample(3.0), 9.0);
    }
}
