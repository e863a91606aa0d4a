//! Combinators for building instruments out of signals.
//!
//! Each combinator wraps one or more signals and is itself a signal, so they
//! nest freely. The `extensions` module adds fluent helpers so patches read as
//! a chain: `saw(f).mix(sine(f), 0.6).compress(0.4, 3.0).gain(2.0)`.

/// Scalar gain and signal-by-signal multiplication (envelopes).
pub mod amplify;
/// Peak compression above a threshold.
pub mod compress;
/// Time shift.
pub mod delay;
/// Fluent combinators (`.mix()`, `.gain()`, `.then()`, etc.).
pub mod extensions;
/// Linear crossfade of two signals.
pub mod mix;
/// Core signal trait and the shared-state handle.
pub mod node;
/// Serial composition: one signal's output becomes the next one's time.
pub mod through;

pub use amplify::{envelope, gain, Amplify, Gain};
pub use compress::{compress, Compress};
pub use delay::{delay, Delay};
pub use extensions::SignalExt;
pub use mix::{mix, Mix};
pub use node::{Constant, Shared, Signal};
pub use through::{compose, Compose, Then};
