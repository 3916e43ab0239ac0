//! Rejection sampling of prop positions with a minimum planar spacing.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::TerrainError;
use crate::height::{evaluate_terrain, world_to_parametric};
use crate::noise_field::NoiseField;
use crate::params::NoiseParameters;
use crate::update::surface_height;

/// Minimum planar distance between two accepted points, in world units.
pub const MIN_SCATTER_DISTANCE: f32 = 0.8;

/// Consecutive rejections tolerated before sampling gives up.
pub const DEFAULT_MAX_ATTEMPTS_PER_POINT: u32 = 10_000;

/// Accepted placement points for one category of prop, in insertion order.
///
/// Each point stores the noise-free base surface position. Per-frame
/// placement on the live surface goes through
/// [`instance_translations`](Self::instance_translations).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScatterSet {
    points: Vec<Vec3>,
}

impl ScatterSet {
    /// Accepted points.
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Number of accepted points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no point was accepted.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Smallest planar distance between any two points, or `None` with fewer
    /// than two points.
    pub fn min_planar_distance(&self) -> Option<f32> {
        let mut best: Option<f32> = None;
        for (i, a) in self.points.iter().enumerate() {
            for b in &self.points[i + 1..] {
                let d = a.truncate().distance(b.truncate());
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }

    /// Translation of every instance on the current surface.
    ///
    /// Keeps each point's `(x, y)` and lifts it to [`surface_height`] under
    /// `params`, so props follow the regenerated terrain.
    pub fn instance_translations<'a>(
        &'a self,
        field: &'a NoiseField,
        params: &'a NoiseParameters,
    ) -> impl Iterator<Item = Vec3> + 'a {
        self.points.iter().map(move |p| {
            let uv = world_to_parametric(p.x, p.y);
            Vec3::new(p.x, p.y, surface_height(field, params, uv.x, uv.y))
        })
    }
}

/// Draws minimum-distance point sets from one seeded random stream.
///
/// Successive calls to [`generate_positions`](Self::generate_positions)
/// continue the same stream, so the sets for several categories are
/// reproducible as long as they are requested in the same order.
#[derive(Clone, Debug)]
pub struct ScatterSampler {
    rng: ChaCha8Rng,
    min_distance: f32,
    max_attempts_per_point: u32,
}

impl ScatterSampler {
    /// Create a sampler with the default spacing and attempt budget.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_distance: MIN_SCATTER_DISTANCE,
            max_attempts_per_point: DEFAULT_MAX_ATTEMPTS_PER_POINT,
        }
    }

    /// Override the minimum planar distance.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Override the number of consecutive rejections tolerated per point.
    pub fn with_max_attempts_per_point(mut self, attempts: u32) -> Self {
        self.max_attempts_per_point = attempts.max(1);
        self
    }

    /// Minimum planar distance enforced between accepted points.
    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    /// Sample exactly `count` points on the base terrain.
    ///
    /// Candidates are drawn uniformly in parametric space and accepted when
    /// their planar distance to every accepted point is at least the minimum
    /// distance. A rejected candidate is redrawn for the same slot.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ScatterInfeasible`] if one slot sees
    /// `max_attempts_per_point` rejections in a row.
    pub fn generate_positions(&mut self, count: usize) -> Result<ScatterSet, TerrainError> {
        let mut points: Vec<Vec3> = Vec::with_capacity(count);
        let mut total_attempts: u64 = 0;

        while points.len() < count {
            let mut attempts = 0;
            loop {
                if attempts == self.max_attempts_per_point {
                    tracing::warn!(
                        requested = count,
                        accepted = points.len(),
                        attempts,
                        "Scatter sampling gave up"
                    );
                    return Err(TerrainError::ScatterInfeasible {
                        requested: count,
                        accepted: points.len(),
                        attempts,
                    });
                }
                attempts += 1;

                let u = self.rng.random_range(0.0..=1.0_f32);
                let v = self.rng.random_range(0.0..=1.0_f32);
                let candidate = evaluate_terrain(u, v);
                let planar = candidate.truncate();

                if self.is_far_enough(&points, planar) {
                    points.push(candidate);
                    break;
                }
            }
            total_attempts += u64::from(attempts);
        }

        tracing::debug!(
            accepted = points.len(),
            attempts = total_attempts,
            min_distance = self.min_distance,
            "Generated scatter positions"
        );
        Ok(ScatterSet { points })
    }

    fn is_far_enough(&self, accepted: &[Vec3], candidate: Vec2) -> bool {
        accepted
            .iter()
            .all(|p| p.truncate().distance(candidate) >= self.min_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::height::WORLD_SIZE;

    #[test]
    fn test_generate_exact_count() {
        let set = ScatterSampler::new(42).generate_positions(50).unwrap();
        assert_eq!(set.len(), 50);
    }

    #[test]
    fn test_minimum_distance_respected() {
        let mut sampler = ScatterSampler::new(7);
        for count in [50, 50, 60] {
            let set = sampler.generate_positions(count).unwrap();
            let points = set.points();
            for i in 0..points.len() {
                for j in 0..points.len() {
                    if i == j {
                        continue;
                    }
                    let d = points[i].truncate().distance(points[j].truncate());
                    assert!(
                        d >= MIN_SCATTER_DISTANCE - 1e-5,
                        "Points {i} and {j} are too close: {d}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_points_on_base_surface_within_domain() {
        let set = ScatterSampler::new(3).generate_positions(40).unwrap();
        let half = WORLD_SIZE / 2.0;
        for p in set.points() {
            assert!(p.x.abs() <= half && p.y.abs() <= half, "Point {p} outside domain");
            let uv = world_to_parametric(p.x, p.y);
            let base = evaluate_terrain(uv.x, uv.y).z;
            assert!((p.z - base).abs() < 1e-4);
        }
    }

    #[test]
    fn test_deterministic_from_seed() {
        let a = ScatterSampler::new(99).generate_positions(30).unwrap();
        let b = ScatterSampler::new(99).generate_positions(30).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stream_continues_across_categories() {
        let mut sampler = ScatterSampler::new(5);
        let trees = sampler.generate_positions(10).unwrap();
        let mushrooms = sampler.generate_positions(10).unwrap();
        assert_ne!(trees, mushrooms, "Second category should not repeat the first");
    }

    #[test]
    fn test_zero_count_is_empty() {
        let set = ScatterSampler::new(1).generate_positions(0).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.min_planar_distance(), None);
    }

    #[test]
    fn test_infeasible_request_fails() {
        // A 20x20 domain cannot hold 1000 points 5 units apart.
        let err = ScatterSampler::new(2)
            .with_min_distance(5.0)
            .with_max_attempts_per_point(500)
            .generate_positions(1000)
            .unwrap_err();
        match err {
            TerrainError::ScatterInfeasible {
                requested,
                accepted,
                attempts,
            } => {
                assert_eq!(requested, 1000);
                assert!(accepted < 1000);
                assert_eq!(attempts, 500);
            }
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_min_planar_distance_reported() {
        let set = ScatterSampler::new(11).generate_positions(20).unwrap();
        let d = set.min_planar_distance().unwrap();
        assert!(d >= MIN_SCATTER_DISTANCE - 1e-5);
    }

    #[test]
    fn test_instance_translations_follow_surface() {
        let set = ScatterSampler::new(8).generate_positions(25).unwrap();
        let field = NoiseField::default();
        let params = NoiseParameters::default();
        let translations: Vec<Vec3> = set.instance_translations(&field, &params).collect();
        assert_eq!(translations.len(), 25);
        for (p, t) in set.points().iter().zip(&translations) {
            assert_eq!((p.x, p.y), (t.x, t.y));
            let uv = world_to_parametric(p.x, p.y);
            assert_eq!(t.z, surface_height(&field, &params, uv.x, uv.y));
        }
    }
}
