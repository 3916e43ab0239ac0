//! Scripted parameter edits standing in for an interactive UI.
//!
//! Every `period` frames one slider moves to its next position, cycling
//! through the four noise parameters. All values stay inside the slider
//! ranges.

use glade_terrain::NoiseParameters;

/// Steps per slider range.
const STEPS: u32 = 4;

/// Deterministic slider script.
#[derive(Clone, Debug)]
pub struct ParameterSweep {
    period: u64,
}

impl ParameterSweep {
    /// Create a sweep that edits one slider every `period` frames.
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(1),
        }
    }

    /// Apply the edit scheduled for `frame`, if any. Returns `true` when a
    /// slider moved.
    pub fn apply(&self, frame: u64, params: &mut NoiseParameters) -> bool {
        if frame == 0 || frame % self.period != 0 {
            return false;
        }
        let edit = frame / self.period;
        let slider = edit % 4;
        let step = ((edit / 4) % u64::from(STEPS)) as u32;
        let t = step as f32 / (STEPS - 1) as f32;

        match slider {
            0 => params.persistency = lerp(&NoiseParameters::PERSISTENCY_RANGE, t),
            1 => params.frequency_gain = lerp(&NoiseParameters::FREQUENCY_GAIN_RANGE, t),
            2 => {
                let range = NoiseParameters::OCTAVE_RANGE;
                params.octave = range.start() + step * (range.end() - range.start()) / (STEPS - 1);
            }
            _ => params.height_scale = lerp(&NoiseParameters::HEIGHT_SCALE_RANGE, t),
        }
        true
    }
}

fn lerp(range: &std::ops::RangeInclusive<f32>, t: f32) -> f32 {
    range.start() + (range.end() - range.start()) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_edit_between_periods() {
        let sweep = ParameterSweep::new(10);
        let mut params = NoiseParameters::default();
        for frame in [0, 1, 5, 9, 11] {
            assert!(!sweep.apply(frame, &mut params));
        }
        assert_eq!(params, NoiseParameters::default());
    }

    #[test]
    fn test_edits_stay_in_ui_ranges() {
        let sweep = ParameterSweep::new(1);
        let mut params = NoiseParameters::default();
        for frame in 1..200 {
            sweep.apply(frame, &mut params);
            assert_eq!(params.clamped_to_ui_ranges(), params, "Frame {frame}");
        }
    }

    #[test]
    fn test_cycles_through_sliders() {
        let sweep = ParameterSweep::new(1);
        let mut params = NoiseParameters::default();
        sweep.apply(1, &mut params);
        assert_eq!(params.frequency_gain, 1.5);
        sweep.apply(2, &mut params);
        assert_eq!(params.octave, 1);
    }
}
