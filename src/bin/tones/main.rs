//! tones - play a note sequence through the lead patch
//!
//! Run with: cargo run --features cpal -- [sequence.json] [patch.json]
//!
//! Without arguments a built-in demo sequence is played. Set RUST_LOG=debug
//! to watch each step and render.

use std::{env, fs, thread, time::Duration};

use color_eyre::eyre::{Result as EyreResult, WrapErr};

use saavy_tones::{
    io::device::{AudioDevice, DeviceConfig},
    sequencing::{parse_sequence, Sequence, Sequencer, SequencerConfig, ThreadTimer, Voice},
    synth::LeadPatch,
};

fn demo() -> Sequence {
    Sequence::builder()
        // A4 for one beat
        .note("a4")
        // A major, one beat
        .note("a4_cs4_e4")
        .chord([("a4", 0.5)])
        .scaled("a4", 0.5)
        .rest(0.5)
        .rest(0.5)
        .chord([("b3_g4", 0.25)])
        .voices(vec![Voice::new("a3_cs3_e3", 0.25).delayed(0.0625)])
        .delayed("a3_cs3_e3", 0.25, 0.0625)
        .chord([("a3", 0.5), ("d4", 0.25)])
        .bpm(120.0)
        .note("c4")
        .note("d4")
        .note("e4")
        .build()
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    env_logger::init();

    let mut args = env::args().skip(1);

    let sequence = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read sequence {}", path))?;
            parse_sequence(&json).wrap_err_with(|| format!("failed to parse {}", path))?
        }
        None => demo(),
    };

    let patch: LeadPatch = match args.next() {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read patch {}", path))?;
            serde_json::from_str(&json).wrap_err_with(|| format!("failed to parse {}", path))?
        }
        None => LeadPatch::default(),
    };

    let (device, sink) = AudioDevice::open(DeviceConfig::default())?;
    let config = SequencerConfig::default();
    let tail = Duration::from_secs_f64(config.note_length);

    println!("=== tones ===");
    println!("Sample rate: {} Hz", device.context().sample_rate());
    println!("Steps: {}", sequence.len());
    println!("Playing... Press Ctrl+C to stop");

    let mut sequencer = Sequencer::new(patch, sink, device.context(), config);
    let mut timer = ThreadTimer::new();
    let state = sequencer.sequence(sequence, &mut timer);

    // Let the last note ring out before the stream is dropped
    thread::sleep(tail);
    println!("{:?} ({} pitches rendered)", state, sequencer.cached());

    Ok(())
}
