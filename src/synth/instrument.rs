use crate::graph::node::Signal;

/// Builds a fresh signal for each pitch a sequence plays.
///
/// This is the "sound design" layer: configure the patch once, then the
/// sequencer asks it for one voice per distinct pitch and renders that voice
/// into a buffer. Every call must return an independent signal, so stateful
/// stages (the low-pass time warp) never carry over from one note to the
/// next.
pub trait Instrument {
    fn voice(&self, frequency: f64) -> Box<dyn Signal>;
}

impl<F, S> Instrument for F
where
    F: Fn(f64) -> S,
    S: Signal + 'static,
{
    fn voice(&self, frequency: f64) -> Box<dyn Signal> {
        Box::new(self(frequency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{filter::LowPass, oscillator::sine};
    use crate::graph::SignalExt;

    #[test]
    fn closures_are_instruments() {
        let instrument = |f: f64| sine(f).gain(0.5);
        let mut voice = instrument.voice(1.0);
        assert!((voice.sample(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn each_voice_has_fresh_state() {
        let instrument = |_f: f64| LowPass::new(2.0);
        let mut first = instrument.voice(440.0);
        assert_eq!(first.sample(1.0), 0.5);
        assert_eq!(first.sample(1.0), 0.75);

        let mut second = instrument.voice(440.0);
        assert_eq!(second.sample(1.0), 0.5);
    }

    #[test]
    fn trait_objects_dispatch() {
        let instrument = |f: f64| move |_t: f64| f;
        let dynamic: &dyn Instrument = &instrument;
        assert_eq!(dynamic.voice(220.0).sample(0.0), 220.0);
    }
}
