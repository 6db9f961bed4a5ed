use crate::tone::Waveform;
use crate::visual::Rgb;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("error reading config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneConfig {
    pub waveform: Waveform,
    /// Lower bound of the per-start frequency draw, inclusive.
    pub min_hz: f32,
    /// Upper bound, exclusive.
    pub max_hz: f32,
    pub gain: f32,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            min_hz: 220.0,
            max_hz: 420.0,
            gain: 0.1,
        }
    }
}

/// Presentation constants of the scrolling visualizer, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub width: f64,
    pub height: f64,
    pub grid_spacing: f64,
    /// Offset advance per frame.
    pub step: f64,
    /// Notes whose on-screen x drops below this are moved right.
    pub recycle_threshold: f64,
    /// Distance a recycled note is moved.
    pub recycle_distance: f64,
    pub note_count: usize,
    pub note_height: f64,
    pub min_note_width: f64,
    pub max_note_width: f64,
    pub corner_radius: f64,
    pub playhead_x: f64,
    pub playhead_width: f64,
    pub background: Rgb,
    pub grid: Rgb,
    pub playhead: Rgb,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 120.0,
            grid_spacing: 40.0,
            step: 2.0,
            recycle_threshold: -50.0,
            recycle_distance: 2000.0,
            note_count: 24,
            note_height: 6.0,
            min_note_width: 20.0,
            max_note_width: 80.0,
            corner_radius: 3.0,
            playhead_x: 100.0,
            playhead_width: 2.0,
            background: Rgb::new(0x0f, 0x17, 0x2a),
            grid: Rgb::new(0x1e, 0x29, 0x3b),
            playhead: Rgb::new(0xf8, 0xfa, 0xfc),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub tone: ToneConfig,
    pub visualizer: VisualizerConfig,
    /// Fixes the note layout and pitch sequence when set.
    pub seed: Option<u64>,
}

impl PlayerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let tone = &self.tone;
        if !(tone.min_hz > 0.0) {
            return Err(invalid("tone.min_hz", "must be positive"));
        }
        if !(tone.min_hz < tone.max_hz) {
            return Err(invalid("tone.max_hz", "must be greater than tone.min_hz"));
        }
        if !(tone.gain > 0.0 && tone.gain <= 1.0) {
            return Err(invalid("tone.gain", "must be in (0, 1]"));
        }

        let vis = &self.visualizer;
        if !(vis.width > 0.0) {
            return Err(invalid("visualizer.width", "must be positive"));
        }
        if !(vis.height > 0.0) {
            return Err(invalid("visualizer.height", "must be positive"));
        }
        if !(vis.grid_spacing > 0.0) {
            return Err(invalid("visualizer.grid_spacing", "must be positive"));
        }
        if !(vis.step > 0.0) {
            return Err(invalid("visualizer.step", "must be positive"));
        }
        if !(vis.recycle_threshold <= 0.0) {
            return Err(invalid("visualizer.recycle_threshold", "must not be positive"));
        }
        if !(vis.recycle_distance > vis.width) {
            return Err(invalid(
                "visualizer.recycle_distance",
                format!("must exceed the canvas width {}", vis.width),
            ));
        }
        // a note that just crossed the threshold must land past the right edge
        if !(vis.recycle_threshold + vis.recycle_distance > vis.width - vis.recycle_threshold) {
            return Err(invalid(
                "visualizer.recycle_distance",
                format!(
                    "recycled notes would reappear on screen; need more than {}",
                    vis.width - 2.0 * vis.recycle_threshold
                ),
            ));
        }
        // one wrap per frame has to keep up with the scroll
        let max_step = vis.recycle_distance - (vis.width - vis.recycle_threshold);
        if !(vis.step < max_step) {
            return Err(invalid(
                "visualizer.step",
                format!("must be below {} to keep recycled notes off screen", max_step),
            ));
        }
        if !(vis.note_height > 0.0 && vis.note_height <= vis.height) {
            return Err(invalid("visualizer.note_height", "must fit the canvas height"));
        }
        if !(vis.min_note_width > 0.0 && vis.min_note_width <= vis.max_note_width) {
            return Err(invalid(
                "visualizer.min_note_width",
                "must be positive and not above max_note_width",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        PlayerConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PlayerConfig::from_json(r#"{ "visualizer": { "step": 3 }, "seed": 9 }"#)
            .unwrap();
        assert_eq!(config.visualizer.step, 3.0);
        assert_eq!(config.visualizer.width, 600.0);
        assert_eq!(config.tone, ToneConfig::default());
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn colors_accept_both_notations() {
        let config = PlayerConfig::from_json(
            r##"{ "visualizer": { "background": "#000000", "grid": "99, 179, 237" } }"##,
        )
        .unwrap();
        assert_eq!(config.visualizer.background, Rgb::new(0, 0, 0));
        assert_eq!(config.visualizer.grid, Rgb::new(99, 179, 237));
    }

    #[test]
    fn inverted_frequency_range_is_rejected() {
        let err = PlayerConfig::from_json(r#"{ "tone": { "min_hz": 500, "max_hz": 400 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "tone.max_hz",
                ..
            }
        ));
    }

    #[test]
    fn recycle_distance_must_clear_canvas() {
        let mut config = PlayerConfig::default();
        config.visualizer.recycle_distance = 100.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn step_must_not_outrun_recycling() {
        let err = PlayerConfig::from_json(r#"{ "visualizer": { "step": 2500 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "visualizer.step",
                ..
            }
        ));

        // 2000 - (600 + 50) leaves room for steps just under 1350
        let mut config = PlayerConfig::default();
        config.visualizer.step = 1349.0;
        config.validate().unwrap();
        config.visualizer.step = 1350.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn recycled_notes_must_land_off_screen() {
        let err = PlayerConfig::from_json(
            r#"{ "visualizer": { "recycle_threshold": -500, "recycle_distance": 700 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "visualizer.recycle_distance",
                ..
            }
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tone": {{ "waveform": "triangle" }} }}"#).unwrap();
        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.tone.waveform, Waveform::Triangle);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PlayerConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
