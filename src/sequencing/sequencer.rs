use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    buffer::{AudioBuffer, AudioContext},
    io::{OutputNode, OutputSink},
    sequencing::{
        notes::{NoteToken, Pitch},
        playback::{Playback, PlaybackState, Poll},
        sequence::{Sequence, SequenceEvent, Voice},
        time_signature::{TimeSignature, Transport},
        timer::{Timer, WaitOutcome},
    },
    synth::instrument::Instrument,
};

/// Sequencer settings.
///
/// ```
/// use saavy_tones::sequencing::{SequencerConfig, TimeSignature};
///
/// let config = SequencerConfig::default()
///     .bpm(120.0)
///     .time_signature(TimeSignature::THREE_FOUR);
/// assert_eq!(config.note_length, 0.3);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerConfig {
    pub bpm: f64,
    pub time_signature: TimeSignature,
    /// Where every note is routed
    pub destination: OutputNode,
    /// Seconds rendered per note, independent of how long the note is held
    pub note_length: f64,
    /// Render volume applied to every note
    pub volume: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            bpm: 90.0,
            time_signature: TimeSignature::FOUR_FOUR,
            destination: OutputNode::Master,
            note_length: 0.3,
            volume: 0.2,
        }
    }
}

impl SequencerConfig {
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn time_signature(mut self, time_signature: TimeSignature) -> Self {
        self.time_signature = time_signature;
        self
    }

    pub fn destination(mut self, destination: OutputNode) -> Self {
        self.destination = destination;
        self
    }

    pub fn note_length(mut self, seconds: f64) -> Self {
        self.note_length = seconds;
        self
    }

    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

/// Plays sequences of note events through an instrument into a sink.
///
/// Each distinct pitch is rendered once (at `note_length`/`volume`) and the
/// buffer is reused for every later occurrence. Steps are played strictly in
/// order; a step lasts until its longest voice is done.
pub struct Sequencer<I, S> {
    instrument: I,
    sink: S,
    context: AudioContext,
    transport: Transport,
    destination: OutputNode,
    note_length: f64,
    volume: f64,
    cache: HashMap<Pitch, AudioBuffer>,
}

impl<I: Instrument, S: OutputSink> Sequencer<I, S> {
    pub fn new(instrument: I, sink: S, context: AudioContext, config: SequencerConfig) -> Self {
        Self {
            instrument,
            sink,
            context,
            transport: Transport::new(config.bpm, config.time_signature),
            destination: config.destination,
            note_length: config.note_length,
            volume: config.volume,
            cache: HashMap::new(),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn context(&self) -> &AudioContext {
        &self.context
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of distinct pitches rendered so far.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Rendered buffer for `pitch`, rendering it on first use.
    pub fn buffer(&mut self, pitch: Pitch) -> AudioBuffer {
        if let Some(buffer) = self.cache.get(&pitch) {
            return buffer.clone();
        }

        log::debug!("rendering {} ({:.2} Hz)", pitch, pitch.frequency());
        let mut voice = self.instrument.voice(pitch.frequency());
        let buffer = self
            .context
            .render(&mut voice, self.note_length, self.volume);
        self.cache.insert(pitch, buffer.clone());
        buffer
    }

    /// Send `pitch` to the sink, starting `delay` seconds from now.
    pub fn play(&mut self, pitch: Pitch, delay: f64) {
        let buffer = self.buffer(pitch);
        self.sink.play(buffer, delay, &self.destination);
    }

    /// Play every pitch in `token`. Parts that do not resolve are logged and
    /// skipped. Returns how many pitches were played.
    pub fn play_token(&mut self, token: &NoteToken, delay: f64) -> usize {
        let mut played = 0;
        for part in token.resolve() {
            match part {
                Ok(pitch) => {
                    self.play(pitch, delay);
                    played += 1;
                }
                Err(err) => log::warn!("skipping note: {}", err),
            }
        }
        played
    }

    /// Play `sequence` to the end, waiting between steps with `timer`.
    ///
    /// Returns `Finished`, or `Cancelled` if the timer reported a
    /// cancellation. The timer is checked before every step, so nothing after
    /// the cancelling step is dispatched, zero-length steps included.
    pub fn sequence<T>(&mut self, sequence: impl Into<Sequence>, timer: &mut T) -> PlaybackState
    where
        T: Timer + ?Sized,
    {
        let mut playback = Playback::new(sequence.into());

        loop {
            // A callback (or another thread) may have cancelled since the last wait
            if timer.is_cancelled() {
                playback.cancel();
                return playback.state();
            }
            let Some(event) = playback.next_event() else {
                break;
            };
            log::debug!("step {}: {:?}", playback.cursor(), event);
            self.dispatch(event, &mut playback);

            while let Poll::Wait(duration) = playback.poll() {
                match timer.wait(duration) {
                    WaitOutcome::Elapsed => playback.advance(duration),
                    WaitOutcome::Cancelled => {
                        playback.cancel();
                        return playback.state();
                    }
                }
            }
        }

        playback.state()
    }

    /// Start one step: trigger its sounds and schedule its voice timers.
    fn dispatch(&mut self, event: SequenceEvent, playback: &mut Playback) {
        match event {
            SequenceEvent::Note(token) => {
                self.play_token(&token, 0.0);
                playback.schedule(self.transport.beats(1.0));
            }
            SequenceEvent::Rest(beats) => {
                playback.schedule(self.transport.beats(beats));
            }
            SequenceEvent::Scaled(voice) => self.start_voice(&voice, playback),
            SequenceEvent::Chord(voices) => {
                for voice in &voices {
                    self.start_voice(voice, playback);
                }
            }
            SequenceEvent::Callback(mut callback) => callback(&mut self.transport),
        }
    }

    fn start_voice(&mut self, voice: &Voice, playback: &mut Playback) {
        let delay = self.transport.beats_secs(voice.delay);
        self.play_token(&voice.notes, delay);
        playback.schedule(self.transport.beats(voice.span()));
    }
}
