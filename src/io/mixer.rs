use rtrb::{Consumer, Producer, RingBuffer};

use crate::{
    buffer::AudioBuffer,
    io::{OutputNode, OutputSink, PlayRequest},
};

/*
Software Mixer
==============

The sequencer runs on its own thread and the audio callback runs on the
device's. Requests cross between them on a lock-free rtrb queue:

    Sequencer ──play()──▶ MixerSink ══ rtrb ══▶ Mixer::render_block ──▶ device
                          (producer)             (consumer, audio thread)

At the top of every block the mixer drains the queue and turns each request
into a scheduled voice starting at

    start = current_frame + round(delay × sample_rate)

then sums every active voice into the block, scaled by the gain of the bus
the request was routed to (1.0 for `Master` and unknown buses). A voice that
has played its last sample is dropped.

The voice list is allocated once with room for `capacity` voices and never
grows on the audio thread. A request arriving while every slot is sounding
is discarded and counted in `Mixer::overflowed`.

The mixer never clamps; the sum is handed to the device as-is.
*/

struct Scheduled {
    buffer: AudioBuffer,
    start: u64,
    gain: f32,
}

impl Scheduled {
    fn end(&self) -> u64 {
        self.start + self.buffer.len() as u64
    }
}

/// Producer half: implements [`OutputSink`] for the sequencer thread.
pub struct MixerSink {
    tx: Producer<PlayRequest>,
    dropped: usize,
}

impl MixerSink {
    /// Requests lost because the queue was full.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl OutputSink for MixerSink {
    fn play(&mut self, buffer: AudioBuffer, delay: f64, destination: &OutputNode) {
        let request = PlayRequest {
            buffer,
            delay,
            destination: destination.clone(),
        };
        if self.tx.push(request).is_err() {
            self.dropped += 1;
            log::warn!("mixer queue full, dropped buffer for {}", destination);
        }
    }
}

/// Consumer half: renders scheduled buffers block by block.
pub struct Mixer {
    rx: Consumer<PlayRequest>,
    sample_rate: u32,
    voices: Vec<Scheduled>,
    max_voices: usize,
    overflowed: usize,
    bus_gains: Vec<(OutputNode, f32)>,
    frame: u64,
}

/// Create a connected sink/mixer pair with room for `capacity` queued
/// requests and as many simultaneous voices.
pub fn mixer(sample_rate: u32, capacity: usize) -> (MixerSink, Mixer) {
    let (tx, rx) = RingBuffer::new(capacity);
    let sink = MixerSink { tx, dropped: 0 };
    let mixer = Mixer {
        rx,
        sample_rate,
        voices: Vec::with_capacity(capacity),
        max_voices: capacity,
        overflowed: 0,
        bus_gains: Vec::new(),
        frame: 0,
    };
    (sink, mixer)
}

impl Mixer {
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Buffers currently scheduled or sounding.
    pub fn active(&self) -> usize {
        self.voices.len()
    }

    /// Requests discarded because every voice slot was busy.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    pub fn set_gain(&mut self, node: OutputNode, gain: f32) {
        match self.bus_gains.iter_mut().find(|(n, _)| *n == node) {
            Some((_, g)) => *g = gain,
            None => self.bus_gains.push((node, gain)),
        }
    }

    fn gain_for(&self, node: &OutputNode) -> f32 {
        self.bus_gains
            .iter()
            .find(|(n, _)| n == node)
            .map_or(1.0, |(_, g)| *g)
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Pick up new requests
        while let Ok(request) = self.rx.pop() {
            if self.voices.len() >= self.max_voices {
                self.overflowed += 1;
                continue;
            }
            let offset = (request.delay.max(0.0) * self.sample_rate as f64).round() as u64;
            let gain = self.gain_for(&request.destination);
            self.voices.push(Scheduled {
                buffer: request.buffer,
                start: self.frame + offset,
                gain,
            });
        }

        out.fill(0.0);
        let block_start = self.frame;
        let block_end = block_start + out.len() as u64;

        for voice in &self.voices {
            if voice.start >= block_end || voice.end() <= block_start {
                continue;
            }

            let from = voice.start.max(block_start);
            let to = voice.end().min(block_end);
            let out_range = (from - block_start) as usize..(to - block_start) as usize;
            let src_range = (from - voice.start) as usize..(to - voice.start) as usize;

            for (o, &s) in out[out_range].iter_mut().zip(&voice.buffer[src_range]) {
                *o += s * voice.gain;
            }
        }

        self.voices.retain(|voice| voice.end() > block_end);
        self.frame = block_end;
    }
}
