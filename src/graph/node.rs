use std::{cell::RefCell, rc::Rc};

/*
Signals as Functions of Time
============================

Everything in the graph layer is a signal: something that can be asked
"what is your amplitude at time t?" and answers with a number.

    t (seconds) ──→ [ Signal ] ──→ amplitude

Vocabulary
----------

  time          Seconds since the start of the rendered buffer. Can be
                negative once a delay shifts a signal later in time.

  amplitude     Nominally in [-1.0, +1.0], but intermediate stages are free
                to exceed that range. Compression (or the caller) bounds it.

  stateless     Most signals are pure: the same t always yields the same
                amplitude, and calling them in any order is safe.

  stateful      The low-pass filter remembers a running sum between calls.
                Its output depends on every t it has been fed so far, so the
                ORDER of evaluation is part of its behavior.


Why `&mut self`?
----------------

A pure signal only needs `&self`, but a stateful stage must update its memory
on every call. Taking `&mut self` lets both live behind the same trait, and
closures (`FnMut(f64) -> f64`) are signals too:

    let mut ramp = |t: f64| t * 2.0;
    assert_eq!(ramp.sample(0.5), 1.0);


Reusing a Stateful Stage
------------------------

Sometimes one instrument deliberately feeds the SAME filter instance from two
branches (a dry path and a delayed echo path). Both branches must advance one
shared running sum, in evaluation order:

         ┌──────────┐
    t ──→│ LowPass  │──┬──→ dry
         └──────────┘  └──→ echo (t - 0.1)

`Shared` is the handle for that: cloning it clones the handle, not the state.
A fresh instrument build creates a fresh `Shared`, so two notes never leak
state into each other.
*/

/// A function of time producing an amplitude.
pub trait Signal {
    fn sample(&mut self, t: f64) -> f64;
}

impl<F> Signal for F
where
    F: FnMut(f64) -> f64,
{
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self(t)
    }
}

/// Allow boxed signals to be used as signals (for dynamic dispatch)
impl Signal for Box<dyn Signal> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        (**self).sample(t)
    }
}

/// Cloneable handle onto one signal instance.
///
/// Every clone evaluates the same underlying state.
pub struct Shared<S> {
    inner: Rc<RefCell<S>>,
}

impl<S> Shared<S> {
    pub fn new(signal: S) -> Self {
        Self {
            inner: Rc::new(RefCell::new(signal)),
        }
    }
}

impl<S> Clone for Shared<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: Signal> Signal for Shared<S> {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.inner.borrow_mut().sample(t)
    }
}

/// Constant amplitude, mostly useful as a neutral input in tests and patches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant(pub f64);

impl Signal for Constant {
    #[inline]
    fn sample(&mut self, _t: f64) -> f64 {
        self.0
    }
}
