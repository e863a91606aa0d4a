use std::fmt;

use super::{notes::NoteToken, time_signature::Transport};

/// Closure run mid-sequence with access to the tempo state.
pub type Callback = Box<dyn FnMut(&mut Transport)>;

/// One concurrently sounding part of a step.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub notes: NoteToken,
    /// Length in beats
    pub beats: f64,
    /// Offset in beats before the voice sounds
    pub delay: f64,
}

impl Voice {
    pub fn new(notes: impl Into<NoteToken>, beats: f64) -> Self {
        Self {
            notes: notes.into(),
            beats,
            delay: 0.0,
        }
    }

    pub fn delayed(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Beats from the start of the step until this voice has finished.
    pub fn span(&self) -> f64 {
        self.delay.max(0.0) + self.beats
    }
}

/// A single step in a sequence.
pub enum SequenceEvent {
    /// Play a token for one beat
    Note(NoteToken),
    /// Silence for this many beats
    Rest(f64),
    /// Play a token for an explicit number of beats, optionally delayed
    Scaled(Voice),
    /// Several voices started together; the step lasts as long as the longest
    Chord(Vec<Voice>),
    /// Adjust the transport before the next step
    Callback(Callback),
}

impl SequenceEvent {
    pub fn note(token: impl Into<NoteToken>) -> Self {
        SequenceEvent::Note(token.into())
    }

    pub fn rest(beats: f64) -> Self {
        SequenceEvent::Rest(beats)
    }

    pub fn callback(f: impl FnMut(&mut Transport) + 'static) -> Self {
        SequenceEvent::Callback(Box::new(f))
    }

    /// The voices this step starts, each with its length in beats.
    ///
    /// Plain notes become a one-beat voice, rests a silent voice (no notes)
    /// and callbacks contribute nothing.
    pub fn voices(&self) -> Vec<Voice> {
        match self {
            SequenceEvent::Note(token) => vec![Voice::new(token.clone(), 1.0)],
            SequenceEvent::Rest(beats) => vec![Voice::new("", *beats)],
            SequenceEvent::Scaled(voice) => vec![voice.clone()],
            SequenceEvent::Chord(voices) => voices.clone(),
            SequenceEvent::Callback(_) => Vec::new(),
        }
    }
}

impl fmt::Debug for SequenceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceEvent::Note(token) => f.debug_tuple("Note").field(token).finish(),
            SequenceEvent::Rest(beats) => f.debug_tuple("Rest").field(beats).finish(),
            SequenceEvent::Scaled(voice) => f.debug_tuple("Scaled").field(voice).finish(),
            SequenceEvent::Chord(voices) => f.debug_tuple("Chord").field(voices).finish(),
            SequenceEvent::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// An ordered list of steps, played first to last.
#[derive(Debug, Default)]
pub struct Sequence {
    pub events: Vec<SequenceEvent>,
}

impl Sequence {
    /// Start an empty sequence builder
    pub fn builder() -> SequenceBuilder {
        SequenceBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total beats the sequence waits for, assuming no callback changes the
    /// tempo along the way.
    pub fn total_beats(&self) -> f64 {
        self.events
            .iter()
            .map(|event| {
                event
                    .voices()
                    .iter()
                    .map(Voice::span)
                    .fold(0.0, f64::max)
            })
            .sum()
    }
}

impl From<Vec<SequenceEvent>> for Sequence {
    fn from(events: Vec<SequenceEvent>) -> Self {
        Self { events }
    }
}

impl FromIterator<SequenceEvent> for Sequence {
    fn from_iter<I: IntoIterator<Item = SequenceEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Sequence {
    type Item = SequenceEvent;
    type IntoIter = std::vec::IntoIter<SequenceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

/// Builder for constructing sequences with a fluent API
#[derive(Default)]
pub struct SequenceBuilder {
    events: Vec<SequenceEvent>,
}

impl SequenceBuilder {
    /// Play a token for one beat
    pub fn note(mut self, token: impl Into<NoteToken>) -> Self {
        self.events.push(SequenceEvent::note(token));
        self
    }

    /// Rest for `beats` beats
    pub fn rest(mut self, beats: f64) -> Self {
        self.events.push(SequenceEvent::rest(beats));
        self
    }

    /// Play a token for `beats` beats
    pub fn scaled(mut self, token: impl Into<NoteToken>, beats: f64) -> Self {
        self.events.push(SequenceEvent::Scaled(Voice::new(token, beats)));
        self
    }

    /// Play a token for `beats` beats after `delay` beats
    pub fn delayed(mut self, token: impl Into<NoteToken>, beats: f64, delay: f64) -> Self {
        self.events
            .push(SequenceEvent::Scaled(Voice::new(token, beats).delayed(delay)));
        self
    }

    /// Play several voices together
    pub fn chord<I, T>(mut self, voices: I) -> Self
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<NoteToken>,
    {
        let voices = voices
            .into_iter()
            .map(|(token, beats)| Voice::new(token, beats))
            .collect();
        self.events.push(SequenceEvent::Chord(voices));
        self
    }

    /// Play prepared voices together (use for per-voice delays)
    pub fn voices(mut self, voices: Vec<Voice>) -> Self {
        self.events.push(SequenceEvent::Chord(voices));
        self
    }

    /// Run `f` against the transport before the next step
    pub fn callback(mut self, f: impl FnMut(&mut Transport) + 'static) -> Self {
        self.events.push(SequenceEvent::callback(f));
        self
    }

    /// Change the tempo for all following steps
    pub fn bpm(self, bpm: f64) -> Self {
        self.callback(move |transport| transport.bpm = bpm)
    }

    pub fn event(mut self, event: SequenceEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn build(self) -> Sequence {
        Sequence {
            events: self.events,
        }
    }
}
