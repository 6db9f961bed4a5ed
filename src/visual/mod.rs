mod color;
mod note;
mod surface;

pub use self::color::{ParseColorError, Rgb};
pub use self::note::{generate_notes, VisualNote};
pub use self::surface::{DrawSurface, Framebuffer};

use crate::config::VisualizerConfig;
use crate::prelude::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerState {
    Idle,
    Running,
}

/// What one frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Offset the frame was drawn at, before the per-frame advance.
    pub offset: f64,
    pub drawn: usize,
    pub recycled: usize,
}

/// Scrolling piano-roll style animation.
///
/// All positions derive from a single monotonic `offset`, so pausing only
/// freezes the offset and resuming picks up where the band stopped.
#[derive(Debug, Clone)]
pub struct Visualizer {
    config: VisualizerConfig,
    state: VisualizerState,
    offset: f64,
    notes: Option<Vec<VisualNote>>,
    frames: u64,
}

impl Visualizer {
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            config,
            state: VisualizerState::Idle,
            offset: 0.0,
            notes: None,
            frames: 0,
        }
    }

    /// Use a fixed layout instead of generating one on first run.
    pub fn with_notes(config: VisualizerConfig, notes: Vec<VisualNote>) -> Self {
        Self {
            notes: Some(notes),
            ..Self::new(config)
        }
    }

    pub fn state(&self) -> VisualizerState {
        self.state
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The note layout, once the first `Running` entry has generated it.
    pub fn notes(&self) -> Option<&[VisualNote]> {
        self.notes.as_deref()
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Idle -> Running. Generates the note layout on the first entry only.
    /// Returns false if already running.
    pub fn enter_running(&mut self, dice: &mut Dice) -> bool {
        if self.state == VisualizerState::Running {
            return false;
        }
        if self.notes.is_none() {
            let notes = generate_notes(&self.config, dice);
            log::debug!("generated {} visual notes", notes.len());
            self.notes = Some(notes);
        }
        self.state = VisualizerState::Running;
        true
    }

    /// Running -> Idle. Returns false if already idle.
    pub fn enter_idle(&mut self) -> bool {
        if self.state == VisualizerState::Idle {
            return false;
        }
        self.state = VisualizerState::Idle;
        true
    }

    /// Draw one frame and advance the offset. Does nothing while idle.
    pub fn draw_frame<S>(&mut self, surface: &mut S, accent: Rgb) -> Option<FrameReport>
    where
        S: DrawSurface + ?Sized,
    {
        if self.state != VisualizerState::Running {
            return None;
        }
        let cfg = self.config;
        let offset = self.offset;

        surface.clear();
        surface.fill_rect(0.0, 0.0, cfg.width, cfg.height, cfg.background);

        let mut line_x = -(offset % cfg.grid_spacing);
        while line_x < cfg.width {
            surface.stroke_line(line_x, 0.0, line_x, cfg.height, 1.0, cfg.grid);
            line_x += cfg.grid_spacing;
        }

        let mut drawn = 0;
        let mut recycled = 0;
        if let Some(notes) = self.notes.as_mut() {
            for note in notes.iter_mut() {
                let displayed_x = note.displayed_x(offset);
                if displayed_x < cfg.recycle_threshold {
                    note.x += cfg.recycle_distance;
                    recycled += 1;
                    log::trace!("note recycled to x={}", note.x);
                    continue;
                }
                if displayed_x < cfg.width {
                    surface.fill_round_rect(
                        displayed_x,
                        note.y,
                        note.width,
                        note.height,
                        cfg.corner_radius,
                        accent,
                    );
                    drawn += 1;
                }
            }
        }

        surface.stroke_line(
            cfg.playhead_x,
            0.0,
            cfg.playhead_x,
            cfg.height,
            cfg.playhead_width,
            cfg.playhead,
        );

        self.offset += cfg.step;
        self.frames += 1;
        Some(FrameReport {
            offset,
            drawn,
            recycled,
        })
    }
}
