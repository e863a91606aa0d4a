use crate::graph::{
    amplify::{Amplify, Gain},
    compress::Compress,
    delay::Delay,
    mix::Mix,
    node::{Shared, Signal},
    through::Then,
};

pub trait SignalExt: Signal + Sized {
    fn mix<B: Signal>(self, other: B, balance: f64) -> Mix<Self, B> {
        Mix::new(self, other, balance)
    }

    fn gain(self, gain: f64) -> Gain<Self> {
        Gain::new(self, gain)
    }

    fn delay(self, offset: f64) -> Delay<Self> {
        Delay::new(self, offset)
    }

    fn compress(self, threshold: f64, ratio: f64) -> Compress<Self> {
        Compress::new(self, threshold, ratio)
    }

    fn envelope<E: Signal>(self, env: E) -> Amplify<Self, E> {
        Amplify::new(self, env)
    }

    fn then<B: Signal>(self, next: B) -> Then<Self, B> {
        Then::new(self, next)
    }

    /// Wrap in a cloneable handle so several branches can drive one state.
    fn shared(self) -> Shared<Self> {
        Shared::new(self)
    }

    fn boxed(self) -> Box<dyn Signal>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<T: Signal> SignalExt for T {}
