//! Multi-octave Perlin noise field.
//!
//! Each octave samples gradient noise remapped to `[0, 1]`, so every layer
//! adds a non-negative bump. The caller scales the sum to a terrain height.

use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Lattice seed used when none is configured.
pub const DEFAULT_NOISE_SEED: u32 = 0;

/// Octave counts above this are clamped. Frequencies past this point either
/// overflow or sit far below the grid spacing.
pub const MAX_OCTAVES: u32 = 32;

/// Largest scaled lattice coordinate still sampled. Beyond it the lattice
/// cell index no longer fits the noise backend and the octave is dropped.
const MAX_LATTICE_COORD: f64 = 4_503_599_627_370_496.0; // 2^52

/// A deterministic, stateless scalar field over the plane.
///
/// The permutation lattice is fixed when the field is created; two fields
/// with the same seed return bit-identical samples.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Create a field over the lattice derived from `seed`.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// The lattice seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Sum `octaves` layers of noise at `coord`.
    ///
    /// Layer `i` is sampled at frequency `frequency_gain^i` with amplitude
    /// `persistency^i`. A zero octave count or a non-positive frequency gain
    /// yields exactly `0.0`; non-finite inputs do the same. Octaves whose
    /// scaled coordinate leaves the lattice range are skipped, along with
    /// every octave after them.
    pub fn sample(&self, coord: Vec2, octaves: u32, persistency: f32, frequency_gain: f32) -> f32 {
        let valid = frequency_gain > 0.0
            && frequency_gain.is_finite()
            && persistency.is_finite()
            && coord.is_finite();
        if octaves == 0 || !valid {
            return 0.0;
        }

        let x = coord.x as f64;
        let y = coord.y as f64;
        let gain = frequency_gain as f64;
        let persistency = persistency as f64;

        let extent = x.abs().max(y.abs());

        let mut total = 0.0;
        let mut frequency = 1.0_f64;
        let mut amplitude = 1.0_f64;

        for _ in 0..octaves.min(MAX_OCTAVES) {
            let reach = frequency * extent;
            if !reach.is_finite() || reach >= MAX_LATTICE_COORD {
                break;
            }
            let n = self.perlin.get([x * frequency, y * frequency]);
            total += amplitude * (0.5 + 0.5 * n);

            frequency *= gain;
            amplitude *= persistency;
        }

        total as f32
    }

    /// Upper bound of [`sample`](Self::sample) for the given octave settings
    /// (geometric sum of the octave amplitudes, each layer at most 1).
    pub fn max_amplitude(octaves: u32, persistency: f32) -> f32 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        for _ in 0..octaves.min(MAX_OCTAVES) {
            sum += amp;
            amp *= persistency;
        }
        sum
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}
