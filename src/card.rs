use crate::audio::{AudioBackend, AudioError};
use crate::config::PlayerConfig;
use crate::prelude::Dice;
use crate::ticker::{FrameId, FrameTicker};
use crate::tone::ToneSource;
use crate::visual::{DrawSurface, FrameReport, Rgb, Visualizer};

/// One audio demo player: a tone source and a visualizer driven by a single
/// `playing` flag.
///
/// The card exclusively owns its audio voice and drawing surface. The host
/// delivers frames by polling `pending_frame()` and passing the id to
/// `on_frame()`; stopping or unmounting cancels the pending frame before
/// returning.
pub struct PlayerCard<B: AudioBackend, S: DrawSurface> {
    label: String,
    color: Rgb,
    playing: bool,
    tone: ToneSource<B>,
    visualizer: Visualizer,
    ticker: FrameTicker,
    surface: Option<S>,
    dice: Dice,
    last_frame: Option<FrameReport>,
}

impl<B: AudioBackend, S: DrawSurface> PlayerCard<B, S> {
    pub fn new(
        label: impl Into<String>,
        backend: B,
        surface: S,
        color: Rgb,
        config: &PlayerConfig,
    ) -> Self {
        let label = label.into();
        log::info!("mounting player card {:?}", label);
        Self {
            label,
            color,
            playing: false,
            tone: ToneSource::new(backend, config.tone),
            visualizer: Visualizer::new(config.visualizer),
            ticker: FrameTicker::new(),
            surface: Some(surface),
            dice: Dice::from_seed(config.seed),
            last_frame: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip the playing flag. Returns the new value.
    pub fn toggle(&mut self) -> Result<bool, AudioError> {
        self.set_playing(!self.playing)?;
        Ok(self.playing)
    }

    /// Drive both halves of the card from the playing flag.
    ///
    /// Starting plays the tone first; if the host audio fails the card stays
    /// stopped and the error is returned. Setting the current value again
    /// does nothing.
    pub fn set_playing(&mut self, playing: bool) -> Result<(), AudioError> {
        if playing == self.playing {
            return Ok(());
        }
        if playing {
            self.play()
        } else {
            self.pause();
            Ok(())
        }
    }

    fn play(&mut self) -> Result<(), AudioError> {
        if self.surface.is_none() {
            log::warn!("card {:?} is unmounted, ignoring play", self.label);
            return Ok(());
        }
        self.tone.start(&mut self.dice)?;
        self.playing = true;
        self.visualizer.enter_running(&mut self.dice);
        self.ticker.schedule();
        log::info!(
            "card {:?} playing at {:.1} Hz",
            self.label,
            self.tone.current_tone().map(|t| t.frequency).unwrap_or(0.0)
        );
        Ok(())
    }

    fn pause(&mut self) {
        self.ticker.cancel();
        self.visualizer.enter_idle();
        self.tone.stop();
        self.playing = false;
        log::info!(
            "card {:?} stopped at offset {}",
            self.label,
            self.visualizer.offset()
        );
    }

    /// The frame the host should deliver next, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.ticker.pending()
    }

    /// Run one scheduled frame and schedule the next.
    ///
    /// Returns false without drawing when `id` is stale (cancelled or
    /// superseded) or the surface has been released.
    pub fn on_frame(&mut self, id: FrameId) -> bool {
        let Some(surface) = self.surface.as_mut() else {
            self.ticker.cancel();
            log::warn!("frame {:?} arrived after unmount", id);
            return false;
        };
        if !self.ticker.accept(id) {
            log::warn!("dropping stale frame {:?}", id);
            return false;
        }
        match self.visualizer.draw_frame(surface, self.color) {
            Some(report) => {
                if report.recycled > 0 {
                    log::debug!(
                        "frame {:?}: recycled {} notes at offset {}",
                        id,
                        report.recycled,
                        report.offset
                    );
                }
                self.last_frame = Some(report);
                self.ticker.schedule();
                true
            }
            None => false,
        }
    }

    /// Stop everything and release the surface. Safe to call more than once.
    pub fn unmount(&mut self) -> Option<S> {
        self.ticker.cancel();
        if self.playing {
            self.pause();
        }
        let surface = self.surface.take();
        if surface.is_some() {
            log::info!("unmounted player card {:?}", self.label);
        }
        surface
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Takes effect from the next frame.
    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn tone(&self) -> &ToneSource<B> {
        &self.tone
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn last_frame(&self) -> Option<&FrameReport> {
        self.last_frame.as_ref()
    }
}

impl<B: AudioBackend, S: DrawSurface> Drop for PlayerCard<B, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
