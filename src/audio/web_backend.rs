use crate::audio::{AudioBackend, AudioError};
use crate::tone::{Tone, Waveform};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

fn host_error(err: JsValue) -> AudioError {
    AudioError::Host(format!("{:?}", err))
}

/// Oscillator and gain node pair wired to the context destination.
pub struct WebVoice {
    oscillator: OscillatorNode,
    gain: GainNode,
}

/// Web Audio host. Constructing the `AudioContext` fails in browsers
/// without audio support; that error is returned from `open_context`.
#[derive(Debug, Default)]
pub struct WebAudioBackend;

impl WebAudioBackend {
    pub fn new() -> Self {
        Self
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

impl AudioBackend for WebAudioBackend {
    type Context = AudioContext;
    type Voice = WebVoice;

    fn open_context(&mut self) -> Result<AudioContext, AudioError> {
        AudioContext::new().map_err(|err| AudioError::Unavailable(format!("{:?}", err)))
    }

    fn connect(&mut self, context: &mut AudioContext, tone: &Tone) -> Result<WebVoice, AudioError> {
        let oscillator = context.create_oscillator().map_err(host_error)?;
        oscillator.set_type(oscillator_type(tone.waveform));
        oscillator.frequency().set_value(tone.frequency);

        let gain = context.create_gain().map_err(host_error)?;
        gain.gain().set_value(tone.gain);

        oscillator
            .connect_with_audio_node(&gain)
            .map_err(host_error)?;
        gain.connect_with_audio_node(&context.destination())
            .map_err(host_error)?;
        oscillator.start().map_err(host_error)?;

        Ok(WebVoice { oscillator, gain })
    }

    fn disconnect(&mut self, voice: WebVoice) {
        if let Err(err) = voice.oscillator.stop() {
            log::warn!("failed to stop oscillator: {:?}", err);
        }
        if let Err(err) = voice.oscillator.disconnect() {
            log::warn!("failed to disconnect oscillator: {:?}", err);
        }
        if let Err(err) = voice.gain.disconnect() {
            log::warn!("failed to disconnect gain: {:?}", err);
        }
    }
}
