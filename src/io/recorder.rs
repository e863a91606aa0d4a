use std::{collections::HashMap, time::Duration};

use crate::{
    buffer::AudioBuffer,
    io::{OutputNode, OutputSink, PlayRequest},
    sequencing::timer::VirtualClock,
};

/// A request as seen by the recorder, with the time it arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub request: PlayRequest,
    /// Clock reading when `play` was called (zero without a clock)
    pub at: Duration,
}

impl Recorded {
    /// When the buffer actually starts sounding.
    pub fn start(&self) -> f64 {
        self.at.as_secs_f64() + self.request.delay.max(0.0)
    }
}

/// In-memory sink.
///
/// Keeps every request in arrival order. With a [`VirtualClock`] attached the
/// requests are time-stamped, which is enough to bounce a sequence offline
/// with [`Recorder::mixdown`].
#[derive(Debug, Default)]
pub struct Recorder {
    clock: Option<VirtualClock>,
    recorded: Vec<Recorded>,
    bus_gains: HashMap<OutputNode, f32>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: VirtualClock) -> Self {
        Self {
            clock: Some(clock),
            ..Self::default()
        }
    }

    /// Scale everything routed to `node` by `gain` in the mixdown.
    pub fn set_gain(&mut self, node: OutputNode, gain: f32) {
        self.bus_gains.insert(node, gain);
    }

    pub fn recorded(&self) -> &[Recorded] {
        &self.recorded
    }

    pub fn len(&self) -> usize {
        self.recorded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.is_empty()
    }

    pub fn clear(&mut self) {
        self.recorded.clear();
    }

    /// Sum every recorded buffer into one track at `sample_rate`.
    ///
    /// Buffers are placed at their start time and summed without clamping.
    /// Buffers whose rate differs from `sample_rate` are placed by time but
    /// not resampled.
    pub fn mixdown(&self, sample_rate: u32) -> AudioBuffer {
        let rate = sample_rate as f64;
        let placed: Vec<(usize, &Recorded)> = self
            .recorded
            .iter()
            .map(|r| ((r.start() * rate).round() as usize, r))
            .collect();

        let length = placed
            .iter()
            .map(|(offset, r)| offset + r.request.buffer.len())
            .max()
            .unwrap_or(0);

        let mut track = vec![0.0f32; length];
        for (offset, r) in placed {
            let gain = self.gain_for(&r.request.destination);
            for (out, &s) in track[offset..].iter_mut().zip(r.request.buffer.iter()) {
                *out += s * gain;
            }
        }

        AudioBuffer::new(track, sample_rate)
    }

    fn gain_for(&self, node: &OutputNode) -> f32 {
        self.bus_gains.get(node).copied().unwrap_or(1.0)
    }
}

impl OutputSink for Recorder {
    fn play(&mut self, buffer: AudioBuffer, delay: f64, destination: &OutputNode) {
        let at = self.clock.as_ref().map_or(Duration::ZERO, VirtualClock::now);
        self.recorded.push(Recorded {
            request: PlayRequest {
                buffer,
                delay,
                destination: destination.clone(),
            },
            at,
        });
    }
}
