use super::{AudioBackend, AudioError};
use crate::tone::Tone;

/// A host without audio support. Opening a context always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    type Context = ();
    type Voice = ();

    fn open_context(&mut self) -> Result<(), AudioError> {
        Err(AudioError::Unavailable("host has no audio support".into()))
    }

    fn connect(&mut self, _context: &mut (), _tone: &Tone) -> Result<(), AudioError> {
        Err(AudioError::Unavailable("host has no audio support".into()))
    }

    fn disconnect(&mut self, _voice: ()) {}
}

/// Bookkeeping-only backend: voices make no sound but are counted.
#[derive(Debug, Default, Clone)]
pub struct SilentBackend {
    contexts_opened: usize,
    live_voices: usize,
    tones: Vec<Tone>,
}

#[derive(Debug, PartialEq)]
pub struct SilentVoice {
    pub index: usize,
}

impl SilentBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contexts_opened(&self) -> usize {
        self.contexts_opened
    }

    /// Voices connected and not yet disconnected.
    pub fn live_voices(&self) -> usize {
        self.live_voices
    }

    /// Every tone ever connected, in order.
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }
}

impl AudioBackend for SilentBackend {
    type Context = ();
    type Voice = SilentVoice;

    fn open_context(&mut self) -> Result<(), AudioError> {
        self.contexts_opened += 1;
        Ok(())
    }

    fn connect(&mut self, _context: &mut (), tone: &Tone) -> Result<SilentVoice, AudioError> {
        self.tones.push(*tone);
        self.live_voices += 1;
        Ok(SilentVoice {
            index: self.tones.len() - 1,
        })
    }

    fn disconnect(&mut self, _voice: SilentVoice) {
        self.live_voices = self.live_voices.saturating_sub(1);
    }
}
