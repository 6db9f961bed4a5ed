use crate::audio::{AudioBackend, AudioError};
use crate::tone::{Oscillator, Tone};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, Stream};

/// Output device and stream format shared by every voice of one card.
pub struct CpalContext {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_format: SampleFormat,
}

impl CpalContext {
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

#[derive(Debug, Default)]
pub struct CpalBackend {
    device_hint: Option<String>,
}

impl CpalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer the first output device whose name contains `hint`.
    pub fn with_device_hint(hint: impl Into<String>) -> Self {
        Self {
            device_hint: Some(hint.into()),
        }
    }

    fn select_output_device(&self, host: &cpal::Host) -> Result<cpal::Device, AudioError> {
        if let Some(hint) = &self.device_hint {
            let hint = hint.to_lowercase();
            let found = host.output_devices()?.find(|device| {
                device
                    .name()
                    .map(|name| name.to_lowercase().contains(&hint))
                    .unwrap_or(false)
            });
            if let Some(device) = found {
                return Ok(device);
            }
            log::warn!("no output device matching {:?}, using default", hint);
        }

        if cfg!(target_os = "linux") {
            self.select_linux_output_device(host)
        } else {
            host.default_output_device()
                .ok_or_else(|| AudioError::Unavailable("no output device available".into()))
        }
    }

    fn select_linux_output_device(&self, host: &cpal::Host) -> Result<cpal::Device, AudioError> {
        // ALSA lists every plugin; the "default:" and pipewire entries are the ones that mix
        for device in host.output_devices()? {
            let name = device.name().unwrap_or_default().to_lowercase();
            if name.starts_with("default:") || name.contains("pipewire") {
                return Ok(device);
            }
        }

        host.default_output_device()
            .ok_or_else(|| AudioError::Unavailable("no output device available".into()))
    }
}

impl AudioBackend for CpalBackend {
    type Context = CpalContext;
    type Voice = Stream;

    fn open_context(&mut self) -> Result<CpalContext, AudioError> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = self.select_output_device(&host)?;
        log::info!(
            "selected output device: {}",
            device.name().unwrap_or_default()
        );

        let supported_config = device.default_output_config()?;
        let sample_format = supported_config.sample_format();
        if sample_format != SampleFormat::F32 {
            return Err(AudioError::SampleFormat(format!("{:?}", sample_format)));
        }
        let config: cpal::StreamConfig = supported_config.into();
        log::info!(
            "sample rate: {}, channels: {}",
            config.sample_rate.0,
            config.channels
        );

        Ok(CpalContext {
            device,
            config,
            sample_format,
        })
    }

    fn connect(&mut self, context: &mut CpalContext, tone: &Tone) -> Result<Stream, AudioError> {
        let sample_rate = context.config.sample_rate.0 as f32;
        let channels = context.config.channels as usize;
        let mut oscillator = Oscillator::new(tone);

        let stream = match context.sample_format {
            SampleFormat::F32 => context.device.build_output_stream(
                &context.config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    oscillator.render_interleaved(data, channels, sample_rate);
                },
                |err| log::error!("stream error: {}", err),
                None,
            )?,
            other => return Err(AudioError::SampleFormat(format!("{:?}", other))),
        };

        stream.play()?;
        Ok(stream)
    }

    fn disconnect(&mut self, voice: Stream) {
        if let Err(err) = voice.pause() {
            log::warn!("failed to pause stream: {}", err);
        }
        drop(voice);
    }
}
