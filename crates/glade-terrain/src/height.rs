//! Base terrain shape: a fixed sum of Gaussian bumps over the unit square.

use glam::{Vec2, Vec3};

/// Side length of the terrain in world units.
pub const WORLD_SIZE: f32 = 20.0;

/// One Gaussian bump of the base elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianPeak {
    /// Center in parametric `(u, v)` space.
    pub center: Vec2,
    /// Elevation at the center.
    pub height: f32,
    /// Width in parametric units.
    pub sigma: f32,
}

impl GaussianPeak {
    /// Contribution of this peak at parametric coordinate `p`.
    pub fn elevation(&self, p: Vec2) -> f32 {
        let d = (p - self.center).length() / self.sigma;
        self.height * (-d * d).exp()
    }
}

/// The hills along the `v = 1` edge that give the terrain its macro shape.
pub const TERRAIN_PEAKS: [GaussianPeak; 4] = [
    GaussianPeak {
        center: Vec2::new(0.66, 1.0),
        height: 3.0,
        sigma: 0.15,
    },
    GaussianPeak {
        center: Vec2::new(0.5, 1.0),
        height: 1.5,
        sigma: 0.1,
    },
    GaussianPeak {
        center: Vec2::new(0.0, 1.0),
        height: 4.0,
        sigma: 0.2,
    },
    GaussianPeak {
        center: Vec2::new(1.0, 1.0),
        height: 2.0,
        sigma: 0.2,
    },
];

/// World position of the noise-free terrain at parametric `(u, v)`.
///
/// `x` and `y` span `[-WORLD_SIZE/2, WORLD_SIZE/2]`; `z` is the sum of
/// [`TERRAIN_PEAKS`].
pub fn evaluate_terrain(u: f32, v: f32) -> Vec3 {
    let x = WORLD_SIZE * (u - 0.5);
    let y = WORLD_SIZE * (v - 0.5);
    let p = Vec2::new(u, v);
    let z = TERRAIN_PEAKS.iter().map(|peak| peak.elevation(p)).sum();
    Vec3::new(x, y, z)
}

/// Inverse of the planar part of [`evaluate_terrain`].
pub fn world_to_parametric(x: f32, y: f32) -> Vec2 {
    Vec2::new(x / WORLD_SIZE + 0.5, y / WORLD_SIZE + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_corners_map_to_world_extent() {
        let a = evaluate_terrain(0.0, 0.0);
        let b = evaluate_terrain(1.0, 1.0);
        assert_eq!((a.x, a.y), (-10.0, -10.0));
        assert_eq!((b.x, b.y), (10.0, 10.0));
    }

    #[test]
    fn test_peak_center_height() {
        // At (0, 1) the 4.0 peak is at full height; the others are far away.
        let z = evaluate_terrain(0.0, 1.0).z;
        assert!((z - 4.0).abs() < 1e-3, "Expected about 4.0, got {z}");
    }

    #[test]
    fn test_far_edge_is_nearly_flat() {
        let z = evaluate_terrain(0.5, 0.0).z;
        assert!(z.abs() < 1e-6, "Base should vanish far from peaks, got {z}");
    }

    #[test]
    fn test_elevation_is_non_negative() {
        for i in 0..=20 {
            for j in 0..=20 {
                let z = evaluate_terrain(i as f32 / 20.0, j as f32 / 20.0).z;
                assert!(z >= 0.0);
            }
        }
    }

    #[test]
    fn test_single_peak_falloff() {
        let peak = GaussianPeak {
            center: Vec2::ZERO,
            height: 2.0,
            sigma: 0.5,
        };
        assert!((peak.elevation(Vec2::ZERO) - 2.0).abs() < EPSILON);
        let one_sigma = peak.elevation(Vec2::new(0.5, 0.0));
        assert!((one_sigma - 2.0 * (-1.0_f32).exp()).abs() < EPSILON);
    }

    #[test]
    fn test_world_to_parametric_round_trip() {
        let p = evaluate_terrain(0.25, 0.8);
        let uv = world_to_parametric(p.x, p.y);
        assert!((uv - Vec2::new(0.25, 0.8)).length() < EPSILON);
    }
}
