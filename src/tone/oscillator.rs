use super::waveform::Waveform;
use super::Tone;
use crate::prelude::PI;

/// Free-running oscillator followed by a fixed gain stage.
///
/// Keeps its phase between blocks so consecutive buffers join without clicks.
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    frequency: f32,
    gain: f32,
    phase: f32,
}

impl Oscillator {
    pub fn new(tone: &Tone) -> Self {
        Self {
            waveform: tone.waveform,
            frequency: tone.frequency,
            gain: tone.gain,
            phase: 0.0,
        }
    }

    /// Fill an interleaved buffer, copying the mono signal to every channel.
    pub fn render_interleaved(&mut self, data: &mut [f32], channels: usize, sample_rate: f32) {
        let channels = channels.max(1);
        let phase_increment = 2.0 * PI * self.frequency / sample_rate;
        for frame in data.chunks_mut(channels) {
            let value = self.waveform.evaluate(self.phase) * self.gain;
            for sample in frame.iter_mut() {
                *sample = value;
            }
            self.phase += phase_increment;
            if self.phase >= 2.0 * PI {
                self.phase -= 2.0 * PI;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(frequency: f32) -> Tone {
        Tone {
            waveform: Waveform::Sine,
            frequency,
            gain: 0.1,
        }
    }

    #[test]
    fn output_is_scaled_by_gain() {
        let mut osc = Oscillator::new(&tone(300.0));
        let mut buf = vec![0.0; 4096];
        osc.render_interleaved(&mut buf, 1, 48_000.0);
        let peak = buf.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= 0.1 + 1e-6);
        assert!(peak > 0.09);
    }

    #[test]
    fn phase_carries_across_blocks() {
        let mut whole = Oscillator::new(&tone(220.0));
        let mut split = Oscillator::new(&tone(220.0));
        let mut a = vec![0.0; 256];
        whole.render_interleaved(&mut a, 1, 44_100.0);
        let mut b = vec![0.0; 128];
        let mut c = vec![0.0; 128];
        split.render_interleaved(&mut b, 1, 44_100.0);
        split.render_interleaved(&mut c, 1, 44_100.0);
        b.extend_from_slice(&c);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-5);
        }
    }

    #[test]
    fn interleaved_duplicates_channels() {
        let mut osc = Oscillator::new(&tone(440.0));
        let mut data = vec![0.0; 64];
        osc.render_interleaved(&mut data, 2, 48_000.0);
        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
    }
}
