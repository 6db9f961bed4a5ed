use crate::config::VisualizerConfig;
use crate::prelude::Dice;

/// One decorative rectangle of the scrolling note band.
///
/// `x` is in scroll space: the on-screen position is `x - offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualNote {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VisualNote {
    pub fn displayed_x(&self, offset: f64) -> f64 {
        self.x - offset
    }
}

/// Scatter `config.note_count` notes over one recycle span.
///
/// Notes get evenly spaced slots across `[0, recycle_distance)` with a random
/// nudge inside each slot, so the band stays populated as notes wrap around.
pub fn generate_notes(config: &VisualizerConfig, dice: &mut Dice) -> Vec<VisualNote> {
    let count = config.note_count;
    if count == 0 {
        return Vec::new();
    }
    let slot = config.recycle_distance / count as f64;
    let max_y = (config.height - config.note_height).max(0.0);

    (0..count)
        .map(|i| {
            let nudge = dice.range(0.0, (slot * 0.5) as f32) as f64;
            VisualNote {
                x: i as f64 * slot + nudge,
                y: dice.range(0.0, max_y as f32) as f64,
                width: dice.range(config.min_note_width as f32, config.max_note_width as f32)
                    as f64,
                height: config.note_height,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_fills_one_span_inside_the_band() {
        let config = VisualizerConfig::default();
        let notes = generate_notes(&config, &mut Dice::seeded(5));
        assert_eq!(notes.len(), config.note_count);
        for note in &notes {
            assert!(note.x >= 0.0 && note.x < config.recycle_distance);
            assert!(note.y >= 0.0 && note.y + note.height <= config.height);
            assert!(note.width >= config.min_note_width && note.width < config.max_note_width);
            assert_eq!(note.height, config.note_height);
        }
        assert!(notes.windows(2).all(|pair| pair[0].x < pair[1].x));
    }

    #[test]
    fn zero_notes_is_empty() {
        let config = VisualizerConfig {
            note_count: 0,
            ..VisualizerConfig::default()
        };
        assert!(generate_notes(&config, &mut Dice::seeded(1)).is_empty());
    }
}
