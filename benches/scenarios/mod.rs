//! Real-world scenario benchmarks.
//!
//! These model actual usage: rendering the lead patch per note, bouncing a
//! whole sequence offline, and the device-side block mixer.

mod mix;
mod voices;

pub use mix::bench_mix;
pub use voices::bench_voices;
