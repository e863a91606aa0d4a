// Purpose - where rendered buffers go once the sequencer lets them out

#[cfg(feature = "cpal")]
pub mod device;
#[cfg(feature = "rtrb")]
pub mod mixer;
pub mod recorder;

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer::AudioBuffer;

/// Named point in the output graph a buffer is routed to.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum OutputNode {
    /// Straight to the output
    #[default]
    Master,
    /// A named bus with its own gain (e.g. "wet", "dry")
    Bus(String),
}

impl OutputNode {
    pub fn bus(name: impl Into<String>) -> Self {
        OutputNode::Bus(name.into())
    }
}

impl fmt::Display for OutputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputNode::Master => f.write_str("master"),
            OutputNode::Bus(name) => write!(f, "bus:{}", name),
        }
    }
}

/// A buffer scheduled for playback.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub buffer: AudioBuffer,
    /// Seconds after the moment of the request
    pub delay: f64,
    pub destination: OutputNode,
}

/// Anything that can play a rendered buffer.
///
/// `play` must not block: it schedules the buffer `delay` seconds from now
/// and returns.
pub trait OutputSink {
    fn play(&mut self, buffer: AudioBuffer, delay: f64, destination: &OutputNode);
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn play(&mut self, buffer: AudioBuffer, delay: f64, destination: &OutputNode) {
        (**self).play(buffer, delay, destination)
    }
}

impl OutputSink for Box<dyn OutputSink> {
    fn play(&mut self, buffer: AudioBuffer, delay: f64, destination: &OutputNode) {
        (**self).play(buffer, delay, destination)
    }
}
