//! Waiting between sequence steps.
//!
//! Playback never sleeps on its own; it asks a [`Timer`] to wait. The
//! [`ThreadTimer`] blocks the calling thread and wakes early when cancelled.
//! The [`VirtualTimer`] returns immediately and moves a [`VirtualClock`]
//! forward instead, so whole sequences run in microseconds under test.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The full duration passed
    Elapsed,
    /// Playback was cancelled before (or while) waiting
    Cancelled,
}

pub trait Timer {
    /// Block (really or virtually) for `duration`.
    fn wait(&mut self, duration: Duration) -> WaitOutcome;

    /// Whether a cancel has been signalled, without waiting.
    fn is_cancelled(&mut self) -> bool;
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        (**self).wait(duration)
    }

    fn is_cancelled(&mut self) -> bool {
        (**self).is_cancelled()
    }
}

/// Stops a running sequence from another thread (or from a callback).
///
/// Cancellation is sticky: once signalled, every later wait on the timer
/// returns [`WaitOutcome::Cancelled`].
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: Sender<()>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // A full channel means a cancel is already pending
        let _ = self.tx.try_send(());
    }
}

#[derive(Debug)]
struct Cancellation {
    tx: Sender<()>,
    rx: Receiver<()>,
    cancelled: bool,
}

impl Cancellation {
    fn new() -> Self {
        let (tx, rx) = bounded(1);
        Self {
            tx,
            rx,
            cancelled: false,
        }
    }

    fn handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.tx.clone(),
        }
    }

    fn poll(&mut self) -> bool {
        if !self.cancelled {
            self.cancelled = matches!(self.rx.try_recv(), Ok(()));
        }
        self.cancelled
    }
}

/// Wall-clock timer for live playback.
#[derive(Debug)]
pub struct ThreadTimer {
    cancel: Cancellation,
}

impl ThreadTimer {
    pub fn new() -> Self {
        Self {
            cancel: Cancellation::new(),
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.handle()
    }
}

impl Default for ThreadTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer for ThreadTimer {
    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        if self.cancel.poll() {
            return WaitOutcome::Cancelled;
        }
        if duration.is_zero() {
            return WaitOutcome::Elapsed;
        }

        log::trace!("sleeping {:?}", duration);
        match self.cancel.rx.recv_timeout(duration) {
            Ok(()) => {
                self.cancel.cancelled = true;
                WaitOutcome::Cancelled
            }
            Err(RecvTimeoutError::Timeout) => WaitOutcome::Elapsed,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(duration);
                WaitOutcome::Elapsed
            }
        }
    }

    fn is_cancelled(&mut self) -> bool {
        self.cancel.poll()
    }
}

/// Shared virtual time in nanoseconds. Clones observe the same clock.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    nanos: Arc<AtomicU64>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Acquire))
    }

    pub fn advance(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.nanos.fetch_add(nanos, Ordering::AcqRel);
    }

    pub fn reset(&self) {
        self.nanos.store(0, Ordering::Release);
    }
}

/// Timer that never sleeps; each wait advances its clock instead.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    clock: VirtualClock,
    cancel: Option<Cancellation>,
}

impl VirtualTimer {
    pub fn new(clock: VirtualClock) -> Self {
        Self {
            clock,
            cancel: None,
        }
    }

    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    pub fn cancel_handle(&mut self) -> CancelHandle {
        self.cancel.get_or_insert_with(Cancellation::new).handle()
    }
}

impl Timer for VirtualTimer {
    fn wait(&mut self, duration: Duration) -> WaitOutcome {
        if self.cancel.as_mut().is_some_and(Cancellation::poll) {
            return WaitOutcome::Cancelled;
        }
        self.clock.advance(duration);
        WaitOutcome::Elapsed
    }

    fn is_cancelled(&mut self) -> bool {
        self.cancel.as_mut().is_some_and(Cancellation::poll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn virtual_timer_advances_clock() {
        let clock = VirtualClock::new();
        let mut timer = VirtualTimer::new(clock.clone());

        assert_eq!(timer.wait(Duration::from_millis(500)), WaitOutcome::Elapsed);
        assert_eq!(timer.wait(Duration::from_millis(250)), WaitOutcome::Elapsed);
        assert_eq!(clock.now(), Duration::from_millis(750));

        clock.reset();
        assert_eq!(timer.clock().now(), Duration::ZERO);
    }

    #[test]
    fn virtual_cancel_is_sticky() {
        let mut timer = VirtualTimer::default();
        let handle = timer.cancel_handle();
        handle.cancel();
        handle.cancel();

        assert!(timer.is_cancelled());
        assert_eq!(timer.wait(Duration::from_secs(1)), WaitOutcome::Cancelled);
        assert_eq!(timer.wait(Duration::from_secs(1)), WaitOutcome::Cancelled);
        assert_eq!(timer.clock().now(), Duration::ZERO);
    }

    #[test]
    fn uncancelled_timers_report_so() {
        assert!(!VirtualTimer::default().is_cancelled());
        assert!(!ThreadTimer::new().is_cancelled());
    }

    #[test]
    fn thread_timer_sleeps() {
        let mut timer = ThreadTimer::new();
        let start = Instant::now();
        assert_eq!(timer.wait(Duration::from_millis(20)), WaitOutcome::Elapsed);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn thread_timer_wakes_on_cancel() {
        let mut timer = ThreadTimer::new();
        let handle = timer.cancel_handle();

        let canceller = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            handle.cancel();
        });

        let start = Instant::now();
        assert_eq!(timer.wait(Duration::from_secs(10)), WaitOutcome::Cancelled);
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(timer.is_cancelled());
        canceller.join().unwrap();
    }
}
