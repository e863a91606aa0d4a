pub mod notes;
#[cfg(feature = "serde")]
pub mod parse;
pub mod playback;
pub mod sequence;
pub mod sequencer;
pub mod time_signature;
pub mod timer;

pub use notes::{frequency, semitone_to_freq, NoteError, NoteName, NoteToken, Pitch};
#[cfg(feature = "serde")]
pub use parse::{parse_sequence, ParseError};
pub use playback::{Playback, PlaybackState, Poll};
pub use sequence::{Callback, Sequence, SequenceBuilder, SequenceEvent, Voice};
pub use sequencer::{Sequencer, SequencerConfig};
pub use time_signature::{TimeSignature, Transport};
pub use timer::{CancelHandle, ThreadTimer, Timer, VirtualClock, VirtualTimer, WaitOutcome};
