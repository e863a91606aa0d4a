use std::{time::Duration, vec};

use super::sequence::{Sequence, SequenceEvent};

/*
Playback Driver
===============

A sequence is played one step at a time. Every step fans out into zero or
more voice timers and the driver only moves on once all of them have fired:

    step:      [ note a4 ]   [ chord a3 (½) + d4 (¼) ]   [ callback ]   ...
    timers:     ├── 1 beat    ├── ½ beat ──┐               (none)
                              └── ¼ beat ──┤ join
    cursor:     0 ──────────▶ 1 ──────────────────────▶ 2 ─────────▶ 3

Time inside the driver is virtual: `now` only moves when the caller reports
that it waited. The caller asks `poll` how long to wait, waits through a
`Timer`, then calls `advance` with what actually elapsed. Deadlines at or
before `now` retire; when none remain the step has joined and `next_event`
hands out the following event.

States
------

    Idle ──next_event──▶ Running ──(events exhausted)──▶ Finished
                            │
                            └──cancel──▶ Cancelled

Cancelling drops all pending deadlines and the remaining events. Both
Finished and Cancelled are terminal.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
    Finished,
    Cancelled,
}

/// What the driver needs before it can make progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// Wait this long, then `advance`
    Wait(Duration),
    /// Current step joined; take the next event
    Ready,
}

#[derive(Debug)]
pub struct Playback {
    events: vec::IntoIter<SequenceEvent>,
    state: PlaybackState,
    cursor: usize,
    now: Duration,
    /// Absolute deadlines of the current step's voices
    pending: Vec<Duration>,
}

impl Playback {
    pub fn new(sequence: Sequence) -> Self {
        Self {
            events: sequence.into_iter(),
            state: PlaybackState::Idle,
            cursor: 0,
            now: Duration::ZERO,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Number of events handed out so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Virtual time since playback started.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_done(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Finished | PlaybackState::Cancelled
        )
    }

    /// Hand out the next event once the current step has joined.
    ///
    /// Returns `None` while voices are still pending, and once the sequence
    /// is exhausted or cancelled.
    pub fn next_event(&mut self) -> Option<SequenceEvent> {
        if self.is_done() || self.poll() != Poll::Ready {
            return None;
        }

        match self.events.next() {
            Some(event) => {
                self.state = PlaybackState::Running;
                self.cursor += 1;
                Some(event)
            }
            None => {
                self.state = PlaybackState::Finished;
                None
            }
        }
    }

    /// Start a voice timer for the current step, `wait` from now.
    pub fn schedule(&mut self, wait: Duration) {
        if self.is_done() {
            return;
        }
        self.pending.push(self.now.saturating_add(wait));
    }

    /// How long until the next pending voice fires.
    pub fn poll(&mut self) -> Poll {
        self.retire();
        self.pending
            .iter()
            .min()
            .map_or(Poll::Ready, |deadline| Poll::Wait(*deadline - self.now))
    }

    /// Report that `elapsed` time has passed.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now = self.now.saturating_add(elapsed);
        self.retire();
    }

    pub fn cancel(&mut self) {
        if self.is_done() {
            return;
        }
        log::debug!("playback cancelled at event {}", self.cursor);
        self.state = PlaybackState::Cancelled;
        self.pending.clear();
        self.events = Vec::new().into_iter();
    }

    fn retire(&mut self) {
        let now = self.now;
        let before = self.pending.len();
        self.pending.retain(|deadline| *deadline > now);
        let fired = before - self.pending.len();
        if fired > 0 {
            log::trace!("{} voice timer(s) fired at {:?}", fired, now);
        }
    }
}
