//! In-place terrain regeneration when noise parameters change.

use std::ops::RangeInclusive;
use std::time::Instant;

use glade_mesh::RenderMesh;
use glam::Vec2;

use crate::error::TerrainError;
use crate::grid::TerrainMesh;
use crate::height::evaluate_terrain;
use crate::noise_field::NoiseField;
use crate::params::NoiseParameters;

/// `u` extent of the flat clearing in the middle of the terrain.
pub const CLEARING_U: RangeInclusive<f32> = 0.3..=0.6;
/// `v` extent of the flat clearing in the middle of the terrain.
pub const CLEARING_V: RangeInclusive<f32> = 0.35..=0.55;

/// Returns `true` if `(u, v)` lies inside the noise-free clearing.
pub fn in_clearing(u: f32, v: f32) -> bool {
    CLEARING_U.contains(&u) && CLEARING_V.contains(&v)
}

/// Terrain elevation at parametric `(u, v)` under `params`.
///
/// Outside the clearing this is the base height plus scaled noise. Inside
/// it, noise is sampled with a zero frequency gain, which contributes
/// nothing, so the surface keeps its base height.
pub fn surface_height(field: &NoiseField, params: &NoiseParameters, u: f32, v: f32) -> f32 {
    let frequency_gain = if in_clearing(u, v) {
        0.0
    } else {
        params.frequency_gain
    };
    let noise = field.sample(
        Vec2::new(u, v),
        params.octave,
        params.persistency,
        frequency_gain,
    );
    evaluate_terrain(u, v).z + params.height_scale * noise
}

/// Recomputes terrain heights and normals, then pushes them to `render`.
///
/// Topology, UVs and vertex count are untouched. Calling this twice with the
/// same parameters yields identical buffers.
///
/// # Errors
///
/// - [`TerrainError::InvalidGridSize`] if the grid has fewer than two samples
///   per side.
/// - [`TerrainError::TopologyMismatch`] if the mesh does not hold
///   `resolution²` vertices.
pub fn update_terrain(
    terrain: &mut TerrainMesh,
    render: &mut impl RenderMesh,
    field: &NoiseField,
    params: &NoiseParameters,
) -> Result<(), TerrainError> {
    let start = Instant::now();
    let n = terrain.resolution();
    if n < 2 {
        return Err(TerrainError::InvalidGridSize { resolution: n });
    }
    let expected = n * n;
    let found = terrain.mesh().vertex_count();
    if found != expected {
        return Err(TerrainError::TopologyMismatch { expected, found });
    }

    for ku in 0..n {
        let u = terrain.parametric(ku);
        for kv in 0..n {
            let v = terrain.parametric(kv);
            let idx = terrain.vertex_index(ku, kv);
            let z = surface_height(field, params, u, v);
            terrain.mesh_mut().positions[idx].z = z;
        }
    }

    let mesh = terrain.mesh_mut();
    mesh.compute_normals();

    render.update_positions(&mesh.positions);
    render.update_normals(&mesh.normals);
    render.update_colors(&mesh.colors);

    tracing::debug!(
        persistency = params.persistency,
        frequency_gain = params.frequency_gain,
        octave = params.octave,
        height_scale = params.height_scale,
        elapsed_us = start.elapsed().as_micros() as u64,
        "Regenerated terrain"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{build_terrain, build_terrain_with_resolution};
    use glade_mesh::MirrorMesh;

    fn regenerated(params: &NoiseParameters) -> (TerrainMesh, MirrorMesh) {
        let mut terrain = build_terrain();
        let mut mirror = MirrorMesh::upload(terrain.mesh());
        update_terrain(&mut terrain, &mut mirror, &NoiseField::default(), params).unwrap();
        (terrain, mirror)
    }

    #[test]
    fn test_update_preserves_topology() {
        let before = build_terrain();
        let (after, mirror) = regenerated(&NoiseParameters::default());
        assert_eq!(after.mesh().vertex_count(), 10_000);
        assert_eq!(after.mesh().triangle_count(), 19_602);
        assert_eq!(after.mesh().triangles, before.mesh().triangles);
        assert_eq!(after.mesh().uvs, before.mesh().uvs);
        assert_eq!(mirror.index_upload_count(), 1);
    }

    #[test]
    fn test_update_is_idempotent() {
        let params = NoiseParameters::default();
        let mut terrain = build_terrain();
        let mut mirror = MirrorMesh::upload(terrain.mesh());
        let field = NoiseField::default();

        update_terrain(&mut terrain, &mut mirror, &field, &params).unwrap();
        let positions = terrain.mesh().positions.clone();
        let normals = terrain.mesh().normals.clone();

        update_terrain(&mut terrain, &mut mirror, &field, &params).unwrap();
        assert_eq!(terrain.mesh().positions, positions);
        assert_eq!(terrain.mesh().normals, normals);
    }

    #[test]
    fn test_clearing_keeps_base_height() {
        let (terrain, _) = regenerated(&NoiseParameters::default());
        let mut checked = 0;
        for ku in 0..100 {
            for kv in 0..100 {
                let u = terrain.parametric(ku);
                let v = terrain.parametric(kv);
                if in_clearing(u, v) {
                    let z = terrain.mesh().positions[terrain.vertex_index(ku, kv)].z;
                    assert_eq!(z, evaluate_terrain(u, v).z, "Clearing at ({u}, {v})");
                    checked += 1;
                }
            }
        }
        assert!(checked > 0, "The grid should contain clearing vertices");
    }

    #[test]
    fn test_outside_clearing_is_perturbed() {
        let (terrain, _) = regenerated(&NoiseParameters::default());
        for (ku, kv) in [(10, 10), (80, 20), (50, 90), (5, 70)] {
            let u = terrain.parametric(ku);
            let v = terrain.parametric(kv);
            assert!(!in_clearing(u, v));
            let z = terrain.mesh().positions[terrain.vertex_index(ku, kv)].z;
            let base = evaluate_terrain(u, v).z;
            assert!(
                (z - base).abs() > 1e-4,
                "Expected noise at ({u}, {v}): z={z}, base={base}"
            );
        }
    }

    #[test]
    fn test_planar_coordinates_unchanged() {
        let before = build_terrain();
        let (after, _) = regenerated(&NoiseParameters::default());
        for (a, b) in before.mesh().positions.iter().zip(&after.mesh().positions) {
            assert_eq!((a.x, a.y), (b.x, b.y));
        }
    }

    #[test]
    fn test_render_mirror_receives_update() {
        let (terrain, mirror) = regenerated(&NoiseParameters::default());
        assert_eq!(mirror.positions().as_vec3s(), terrain.mesh().positions.as_slice());
        assert_eq!(mirror.normals().as_vec3s(), terrain.mesh().normals.as_slice());
        assert_eq!(mirror.positions().upload_count(), 2);
        assert_eq!(mirror.colors().upload_count(), 2);
    }

    #[test]
    fn test_height_scale_changes_relief() {
        let low = NoiseParameters {
            height_scale: 0.1,
            ..Default::default()
        };
        let high = NoiseParameters {
            height_scale: 1.5,
            ..Default::default()
        };
        let (a, _) = regenerated(&low);
        let (b, _) = regenerated(&high);
        let idx = a.vertex_index(10, 10);
        assert!(b.mesh().positions[idx].z > a.mesh().positions[idx].z);
    }

    #[test]
    fn test_normals_are_unit_after_update() {
        let (terrain, _) = regenerated(&NoiseParameters::default());
        for n in &terrain.mesh().normals {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_topology_mismatch_detected() {
        let mut terrain = build_terrain_with_resolution(4).unwrap();
        terrain.mesh_mut().positions.pop();
        let mut mirror = MirrorMesh::default();
        let err = update_terrain(
            &mut terrain,
            &mut mirror,
            &NoiseField::default(),
            &NoiseParameters::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            TerrainError::TopologyMismatch {
                expected: 16,
                found: 15
            }
        );
    }

    #[test]
    fn test_surface_height_matches_grid() {
        let params = NoiseParameters::default();
        let field = NoiseField::default();
        let (terrain, _) = regenerated(&params);
        let idx = terrain.vertex_index(17, 63);
        let z = surface_height(&field, &params, terrain.parametric(17), terrain.parametric(63));
        assert_eq!(terrain.mesh().positions[idx].z, z);
    }
}
