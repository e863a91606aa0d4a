use std::fmt;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::{
    buffer::AudioContext,
    io::{
        mixer::{mixer, MixerSink},
        OutputNode,
    },
    MAX_BLOCK_SIZE,
};

#[derive(Debug)]
pub enum DeviceError {
    /// The host has no default output device
    NoDevice,
    Config(cpal::DefaultStreamConfigError),
    Build(cpal::BuildStreamError),
    Play(cpal::PlayStreamError),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NoDevice => write!(f, "no default output device available"),
            DeviceError::Config(e) => write!(f, "failed to fetch default output config: {}", e),
            DeviceError::Build(e) => write!(f, "failed to build output stream: {}", e),
            DeviceError::Play(e) => write!(f, "failed to start output stream: {}", e),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::NoDevice => None,
            DeviceError::Config(e) => Some(e),
            DeviceError::Build(e) => Some(e),
            DeviceError::Play(e) => Some(e),
        }
    }
}

/// Options for opening the output.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Requests the mixer queue can hold between callbacks
    pub queue_capacity: usize,
    pub bus_gains: Vec<(OutputNode, f32)>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 256,
            bus_gains: Vec::new(),
        }
    }
}

impl DeviceConfig {
    pub fn gain(mut self, node: OutputNode, gain: f32) -> Self {
        self.bus_gains.push((node, gain));
        self
    }
}

/// The default cpal output, fed by a [`Mixer`](crate::io::mixer::Mixer).
///
/// Dropping the device stops the stream.
pub struct AudioDevice {
    context: AudioContext,
    channels: usize,
    _stream: cpal::Stream,
}

impl AudioDevice {
    /// Open the default output and start it.
    ///
    /// Returns the device together with the sink the sequencer plays into.
    pub fn open(config: DeviceConfig) -> Result<(Self, MixerSink), DeviceError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(DeviceError::NoDevice)?;
        let stream_config = device
            .default_output_config()
            .map_err(DeviceError::Config)?;

        let sample_rate = stream_config.sample_rate().0;
        let channels = stream_config.channels() as usize;
        log::info!(
            "output device: {} ({} Hz, {} channels)",
            device.name().unwrap_or_else(|_| "unknown".into()),
            sample_rate,
            channels
        );

        let (sink, mut mixer) = mixer(sample_rate, config.queue_capacity);
        for (node, gain) in config.bus_gains {
            mixer.set_gain(node, gain);
        }

        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];
        let stream = device
            .build_output_stream(
                &stream_config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels;
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let mono = &mut block[..frames];
                        mixer.render_block(mono);

                        // Mono to all channels
                        let offset = frames_written * channels;
                        for (i, &s) in mono.iter().enumerate() {
                            for ch in 0..channels {
                                data[offset + i * channels + ch] = s;
                            }
                        }

                        frames_written += frames;
                    }
                },
                |err| log::error!("audio stream error: {}", err),
                None,
            )
            .map_err(DeviceError::Build)?;

        stream.play().map_err(DeviceError::Play)?;

        let device = Self {
            context: AudioContext::new(sample_rate),
            channels,
            _stream: stream,
        };
        Ok((device, sink))
    }

    /// Rendering context at the device's sample rate.
    pub fn context(&self) -> AudioContext {
        self.context
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}
