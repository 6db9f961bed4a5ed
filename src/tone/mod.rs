mod oscillator;
mod waveform;

pub use self::oscillator::Oscillator;
pub use self::waveform::Waveform;

use crate::audio::{AudioBackend, AudioError};
use crate::config::ToneConfig;
use crate::prelude::Dice;

/// Parameters of one activation of a tone source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency: f32,
    pub gain: f32,
}

/// Plays one tone at a time through an [`AudioBackend`].
///
/// The backend context is opened on the first `start()` and reused after
/// that. Each `start()` draws a fresh frequency, so consecutive plays of the
/// same card may differ in pitch.
pub struct ToneSource<B: AudioBackend> {
    backend: B,
    config: ToneConfig,
    context: Option<B::Context>,
    voice: Option<B::Voice>,
    current: Option<Tone>,
    activations: u64,
}

impl<B: AudioBackend> ToneSource<B> {
    pub fn new(backend: B, config: ToneConfig) -> Self {
        Self {
            backend,
            config,
            context: None,
            voice: None,
            current: None,
            activations: 0,
        }
    }

    /// Connect a new voice. No-op if one is already connected.
    ///
    /// Errors from opening the host context or connecting the voice are
    /// returned unchanged; nothing is left connected in that case.
    pub fn start(&mut self, dice: &mut Dice) -> Result<(), AudioError> {
        if self.voice.is_some() {
            return Ok(());
        }

        let context = match self.context.take() {
            Some(context) => context,
            None => self.backend.open_context()?,
        };
        let context = self.context.insert(context);

        let tone = Tone {
            waveform: self.config.waveform,
            frequency: dice.range(self.config.min_hz, self.config.max_hz),
            gain: self.config.gain,
        };
        let voice = self.backend.connect(context, &tone)?;
        log::debug!(
            "tone started: {} {:.1} Hz at gain {}",
            tone.waveform.name(),
            tone.frequency,
            tone.gain
        );

        self.voice = Some(voice);
        self.current = Some(tone);
        self.activations += 1;
        Ok(())
    }

    /// Disconnect the active voice, if any.
    pub fn stop(&mut self) {
        if let Some(voice) = self.voice.take() {
            self.backend.disconnect(voice);
            self.current = None;
            log::debug!("tone stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.voice.is_some()
    }

    pub fn current_tone(&self) -> Option<&Tone> {
        self.current.as_ref()
    }

    /// Number of successful starts since creation.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: AudioBackend> Drop for ToneSource<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{NullBackend, SilentBackend};

    #[test]
    fn context_is_opened_once() {
        let mut source = ToneSource::new(SilentBackend::new(), ToneConfig::default());
        let mut dice = Dice::seeded(3);
        assert!(!source.has_context());
        for _ in 0..3 {
            source.start(&mut dice).unwrap();
            source.stop();
        }
        assert_eq!(source.backend().contexts_opened(), 1);
        assert_eq!(source.activations(), 3);
    }

    #[test]
    fn failed_context_leaves_source_idle() {
        let mut source = ToneSource::new(NullBackend, ToneConfig::default());
        let mut dice = Dice::seeded(3);
        assert!(matches!(
            source.start(&mut dice),
            Err(AudioError::Unavailable(_))
        ));
        assert!(!source.is_active());
        assert!(!source.has_context());
        assert_eq!(source.activations(), 0);
    }

    #[test]
    fn tone_uses_configured_shape_and_gain() {
        let mut source = ToneSource::new(SilentBackend::new(), ToneConfig::default());
        source.start(&mut Dice::seeded(11)).unwrap();
        let tone = *source.current_tone().unwrap();
        assert_eq!(tone.waveform, Waveform::Sine);
        assert_eq!(tone.gain, 0.1);
        assert!((220.0..420.0).contains(&tone.frequency));
    }
}
