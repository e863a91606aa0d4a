use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Time signature as a numerator/denominator pair.
///
/// The ratio scales the beat: a beat lasts `60 / bpm × (numerator /
/// denominator)` seconds, so 4/4 leaves the tempo beat unchanged while 3/4
/// shortens it to three quarters and 6/8 to three quarters as well.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    /// Number of beats per bar (numerator)
    pub numerator: u8,
    /// Note value that gets one beat (denominator: 4 = quarter, 8 = eighth)
    pub denominator: u8,
}

impl TimeSignature {
    /// Standard 4/4 time
    pub const FOUR_FOUR: TimeSignature = TimeSignature {
        numerator: 4,
        denominator: 4,
    };

    /// 3/4 time (waltz)
    pub const THREE_FOUR: TimeSignature = TimeSignature {
        numerator: 3,
        denominator: 4,
    };

    /// 6/8 time
    pub const SIX_EIGHT: TimeSignature = TimeSignature {
        numerator: 6,
        denominator: 8,
    };

    /// 2/2 time (cut time)
    pub const TWO_TWO: TimeSignature = TimeSignature {
        numerator: 2,
        denominator: 2,
    };

    pub fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// numerator / denominator
    pub fn ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::FOUR_FOUR
    }
}

/// Tempo state a running sequence reads on every event.
///
/// Callbacks in a sequence receive `&mut Transport`; anything they change
/// takes effect from the next event on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transport {
    pub bpm: f64,
    pub time_signature: TimeSignature,
}

impl Transport {
    pub fn new(bpm: f64, time_signature: TimeSignature) -> Self {
        Self {
            bpm,
            time_signature,
        }
    }

    /// Length of one beat in milliseconds.
    pub fn beat_ms(&self) -> f64 {
        60_000.0 / self.bpm * self.time_signature.ratio()
    }

    /// Wall-clock length of `beats` beats. Non-positive or non-finite lengths
    /// collapse to zero.
    pub fn beats(&self, beats: f64) -> Duration {
        let ms = beats * self.beat_ms();
        if ms.is_finite() && ms > 0.0 {
            Duration::try_from_secs_f64(ms / 1000.0).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }

    /// Seconds for `beats` beats, for sink offsets.
    pub fn beats_secs(&self, beats: f64) -> f64 {
        self.beats(beats).as_secs_f64()
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(90.0, TimeSignature::FOUR_FOUR)
    }
}
