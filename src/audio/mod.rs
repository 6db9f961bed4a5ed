#[cfg(not(target_arch = "wasm32"))]
mod cpal_backend;
#[cfg(not(target_arch = "wasm32"))]
pub use self::cpal_backend::{CpalBackend, CpalContext};

#[cfg(target_arch = "wasm32")]
mod web_backend;
#[cfg(target_arch = "wasm32")]
pub use self::web_backend::{WebAudioBackend, WebVoice};

mod host;
pub use self::host::{NullBackend, SilentBackend, SilentVoice};

use crate::tone::Tone;

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("error listing output devices: {0}")]
    Devices(#[from] cpal::DevicesError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("error reading default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("error building output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("error starting output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format: {0}")]
    SampleFormat(String),
    #[error("host audio error: {0}")]
    Host(String),
}

/// Host audio capability a tone source plays through.
///
/// The context is the shared, expensive part (device, audio graph) and is
/// opened once. A voice is one connected oscillator and gain pair; it stays
/// audible until handed back to `disconnect`.
pub trait AudioBackend {
    type Context;
    type Voice;

    fn open_context(&mut self) -> Result<Self::Context, AudioError>;
    fn connect(&mut self, context: &mut Self::Context, tone: &Tone)
        -> Result<Self::Voice, AudioError>;
    fn disconnect(&mut self, voice: Self::Voice);
}
