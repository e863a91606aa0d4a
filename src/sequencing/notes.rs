use std::{fmt, str::FromStr};

/*
Note Names and Frequencies
==========================

A pitch is a chromatic name plus an octave, written together: `a4`, `cs3`,
`fs5`. Sharps are spelled with an `s` suffix; there are no flats.

    index:  0  1   2  3   4  5  6   7  8   9  10  11
    name:   c  cs  d  ds  e  f  fs  g  gs  a  as  b

The semitone number follows the MIDI convention (C4 = 60):

    semitone  = index + 12 × (octave + 1)
    frequency = 440 × 2^((semitone - 69) / 12)

A4 is semitone 69, so `a4` is exactly 440 Hz. Octaves run from -1 (C-1 is
semitone 0) to 10; anything outside that is a `BadOctave`.

Tokens
------

Sequences refer to notes by TOKEN: one pitch (`a4`) or several joined by
underscores (`a4_cs4_e4`). Each part resolves on its own; a part that fails
to parse is reported as a `NoteError` and the other parts still play.

Pitches (name + octave) are also the identity used for caching rendered
notes. Two different spellings never collapse onto one cache entry by way of
their frequency.
*/

/// A4, the tuning reference.
pub const A4_SEMITONE: i32 = 69;
pub const A4_FREQUENCY: f64 = 440.0;

pub const MIN_OCTAVE: i32 = -1;
pub const MAX_OCTAVE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NoteName {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl NoteName {
    pub const ALL: [NoteName; 12] = [
        NoteName::C,
        NoteName::Cs,
        NoteName::D,
        NoteName::Ds,
        NoteName::E,
        NoteName::F,
        NoteName::Fs,
        NoteName::G,
        NoteName::Gs,
        NoteName::A,
        NoteName::As,
        NoteName::B,
    ];

    /// Position in the chromatic table, C = 0.
    pub fn index(self) -> i32 {
        self as i32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NoteName::C => "c",
            NoteName::Cs => "cs",
            NoteName::D => "d",
            NoteName::Ds => "ds",
            NoteName::E => "e",
            NoteName::F => "f",
            NoteName::Fs => "fs",
            NoteName::G => "g",
            NoteName::Gs => "gs",
            NoteName::A => "a",
            NoteName::As => "as",
            NoteName::B => "b",
        }
    }

    fn lookup(name: &str) -> Option<NoteName> {
        NoteName::ALL.into_iter().find(|n| n.as_str() == name)
    }
}

/// Convert a semitone number to Hz.
#[inline]
pub fn semitone_to_freq(semitone: i32) -> f64 {
    A4_FREQUENCY * 2.0_f64.powf((semitone - A4_SEMITONE) as f64 / 12.0)
}

/// Frequency of `name` in `octave`.
pub fn frequency(name: NoteName, octave: i32) -> f64 {
    Pitch::new(name, octave).frequency()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pitch {
    pub name: NoteName,
    pub octave: i32,
}

impl Pitch {
    pub fn new(name: NoteName, octave: i32) -> Self {
        Self { name, octave }
    }

    /// Saturates for octaves far outside `MIN_OCTAVE..=MAX_OCTAVE`.
    pub fn semitone(&self) -> i32 {
        self.octave
            .saturating_add(1)
            .saturating_mul(12)
            .saturating_add(self.name.index())
    }

    pub fn frequency(&self) -> f64 {
        semitone_to_freq(self.semitone())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_str(), self.octave)
    }
}

/// Why a pitch failed to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Nothing to parse
    Empty,
    /// The letters did not match the chromatic table
    UnknownName { token: String },
    /// The part after the name is not an integer octave in range
    BadOctave { token: String },
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::Empty => write!(f, "empty note token"),
            NoteError::UnknownName { token } => {
                write!(f, "unknown note name in '{}'", token)
            }
            NoteError::BadOctave { token } => {
                write!(f, "missing or invalid octave in '{}'", token)
            }
        }
    }
}

impl std::error::Error for NoteError {}

impl FromStr for Pitch {
    type Err = NoteError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.is_empty() {
            return Err(NoteError::Empty);
        }

        let split = token
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .unwrap_or(token.len());
        let (name, octave) = token.split_at(split);

        let name = NoteName::lookup(name).ok_or_else(|| NoteError::UnknownName {
            token: token.to_string(),
        })?;
        let octave = octave
            .parse::<i32>()
            .ok()
            .filter(|o| (MIN_OCTAVE..=MAX_OCTAVE).contains(o))
            .ok_or_else(|| NoteError::BadOctave {
                token: token.to_string(),
            })?;

        Ok(Pitch::new(name, octave))
    }
}

/// One or more pitches joined by `_`, as written in a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteToken(String);

impl NoteToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve every part, keeping failures in place.
    pub fn resolve(&self) -> Vec<Result<Pitch, NoteError>> {
        self.0.split('_').map(str::parse).collect()
    }

    /// Successfully resolved pitches only.
    pub fn pitches(&self) -> Vec<Pitch> {
        self.resolve().into_iter().filter_map(Result::ok).collect()
    }
}

impl From<&str> for NoteToken {
    fn from(token: &str) -> Self {
        NoteToken::new(token)
    }
}

impl From<String> for NoteToken {
    fn from(token: String) -> Self {
        NoteToken(token)
    }
}

impl From<Pitch> for NoteToken {
    fn from(pitch: Pitch) -> Self {
        NoteToken(pitch.to_string())
    }
}

impl fmt::Display for NoteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_exactly_440() {
        assert_eq!(frequency(NoteName::A, 4), 440.0);
        assert_eq!("a4".parse::<Pitch>().unwrap().frequency(), 440.0);
    }

    #[test]
    fn middle_c() {
        let c4 = frequency(NoteName::C, 4);
        assert!((c4 - 261.63).abs() < 0.01, "c4 was {c4}");
        assert_eq!(Pitch::new(NoteName::C, 4).semitone(), 60);
    }

    #[test]
    fn octaves_double() {
        let a3 = frequency(NoteName::A, 3);
        let a5 = frequency(NoteName::A, 5);
        assert!((a3 - 220.0).abs() < 1e-9);
        assert!((a5 - 880.0).abs() < 1e-9);
    }

    #[test]
    fn chromatic_table_order() {
        for (i, name) in NoteName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i as i32);
        }
        assert_eq!(Pitch::new(NoteName::B, 4).semitone(), 71);
    }

    #[test]
    fn parses_sharps_and_negative_octaves() {
        assert_eq!("cs3".parse::<Pitch>(), Ok(Pitch::new(NoteName::Cs, 3)));
        assert_eq!("fs10".parse::<Pitch>(), Ok(Pitch::new(NoteName::Fs, 10)));
        assert_eq!("c-1".parse::<Pitch>(), Ok(Pitch::new(NoteName::C, -1)));
        assert_eq!(Pitch::new(NoteName::C, -1).semitone(), 0);
    }

    #[test]
    fn rejects_malformed_pitches() {
        assert_eq!("".parse::<Pitch>(), Err(NoteError::Empty));
        assert!(matches!("h4".parse::<Pitch>(), Err(NoteError::UnknownName { .. })));
        assert!(matches!("db4".parse::<Pitch>(), Err(NoteError::UnknownName { .. })));
        assert!(matches!("a".parse::<Pitch>(), Err(NoteError::BadOctave { .. })));
        assert!(matches!("a4x".parse::<Pitch>(), Err(NoteError::BadOctave { .. })));
        assert!(matches!("4".parse::<Pitch>(), Err(NoteError::UnknownName { .. })));
    }

    #[test]
    fn rejects_out_of_range_octaves() {
        for token in ["c300000000", "a2147483647", "b11", "c-2", "a99999999999"] {
            assert!(
                matches!(token.parse::<Pitch>(), Err(NoteError::BadOctave { .. })),
                "{token} should not parse"
            );
        }
        assert_eq!(NoteToken::from("a4_c300000000").pitches().len(), 1);
    }

    #[test]
    fn huge_octave_semitone_saturates() {
        assert_eq!(Pitch::new(NoteName::A, i32::MAX).semitone(), i32::MAX);
        assert_eq!(Pitch::new(NoteName::C, i32::MIN).semitone(), i32::MIN);
    }

    #[test]
    fn display_round_trips_spelling() {
        let pitch = Pitch::new(NoteName::Gs, 2);
        assert_eq!(pitch.to_string(), "gs2");
    }

    #[test]
    fn token_resolves_each_part() {
        let token = NoteToken::from("a4_cs4_e4");
        assert_eq!(
            token.pitches(),
            vec![
                Pitch::new(NoteName::A, 4),
                Pitch::new(NoteName::Cs, 4),
                Pitch::new(NoteName::E, 4),
            ]
        );
    }

    #[test]
    fn token_drops_bad_parts_only() {
        let token = NoteToken::from("a4_zz9_e4");
        let resolved = token.resolve();
        assert_eq!(resolved.len(), 3);
        assert!(resolved[1].is_err());
        assert_eq!(token.pitches().len(), 2);
    }
}
