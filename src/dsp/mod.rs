//! Low-level DSP primitives used by the higher level graph combinators.
//!
//! Everything here is plain per-sample math on `f64` time and amplitude.
//! Oscillators and the envelope are closed-form functions of time; the
//! low-pass is the one primitive that carries state between calls.

/// Peak compression above a threshold.
pub mod compress;
/// Closed-form attack/decay/sustain/release curve.
pub mod envelope;
/// One-pole running-sum filter used as a time warp.
pub mod filter;
/// Linear crossfade.
pub mod mix;
/// Oscillator waveforms and noise sources.
pub mod oscillator;

pub use envelope::{adsr, Adsr};
pub use filter::LowPass;
pub use oscillator::{
    impulse_response, noise, saw, saw_inverse, sine, square, triangle, Oscillator, Waveform,
};
