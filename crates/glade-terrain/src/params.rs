//! Live noise parameters edited by the UI.

use std::ops::RangeInclusive;

/// Parameters of the noise layer added on top of the base terrain.
///
/// Owned by whatever drives the UI; the terrain updater only reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseParameters {
    /// Per-octave amplitude decay.
    pub persistency: f32,
    /// Per-octave frequency multiplier.
    pub frequency_gain: f32,
    /// Number of octaves.
    pub octave: u32,
    /// Multiplier applied to the summed noise.
    pub height_scale: f32,
}

impl NoiseParameters {
    /// Slider range for [`persistency`](Self::persistency).
    pub const PERSISTENCY_RANGE: RangeInclusive<f32> = 0.1..=0.6;
    /// Slider range for [`frequency_gain`](Self::frequency_gain).
    pub const FREQUENCY_GAIN_RANGE: RangeInclusive<f32> = 1.5..=2.5;
    /// Slider range for [`octave`](Self::octave).
    pub const OCTAVE_RANGE: RangeInclusive<u32> = 1..=8;
    /// Slider range for [`height_scale`](Self::height_scale).
    pub const HEIGHT_SCALE_RANGE: RangeInclusive<f32> = 0.1..=1.5;

    /// Returns a copy with every field clamped to its slider range.
    ///
    /// A NaN or infinite field falls back to its default value.
    pub fn clamped_to_ui_ranges(&self) -> Self {
        fn clamp<T: PartialOrd + Copy>(v: T, r: &RangeInclusive<T>) -> T {
            if v < *r.start() {
                *r.start()
            } else if v > *r.end() {
                *r.end()
            } else {
                v
            }
        }
        fn finite_or(v: f32, fallback: f32) -> f32 {
            if v.is_finite() { v } else { fallback }
        }
        let defaults = Self::default();
        Self {
            persistency: clamp(
                finite_or(self.persistency, defaults.persistency),
                &Self::PERSISTENCY_RANGE,
            ),
            frequency_gain: clamp(
                finite_or(self.frequency_gain, defaults.frequency_gain),
                &Self::FREQUENCY_GAIN_RANGE,
            ),
            octave: clamp(self.octave, &Self::OCTAVE_RANGE),
            height_scale: clamp(
                finite_or(self.height_scale, defaults.height_scale),
                &Self::HEIGHT_SCALE_RANGE,
            ),
        }
    }
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            persistency: 0.6,
            frequency_gain: 2.392,
            octave: 8,
            height_scale: 0.923,
        }
    }
}
