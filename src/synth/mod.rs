// Purpose: instruments - turning a frequency into a playable signal
// This layer sits above graph combinators and below the sequencer

pub mod instrument;
pub mod lead;

pub use instrument::Instrument;
pub use lead::{Layer, LeadPatch};
