pub mod analysis;
pub mod buffer;
pub mod dsp;
pub mod graph; // Composable signal combinators
pub mod io;
pub mod sequencing; // Musical timing and note events
pub mod synth; // Instruments

pub use buffer::{AudioBuffer, AudioContext};
pub use graph::{Signal, SignalExt};

/// Largest block the device callback renders at once.
pub const MAX_BLOCK_SIZE: usize = 2048;
