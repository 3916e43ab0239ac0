//! Uniform parametric grid tessellation of the terrain surface.

use glade_mesh::Mesh;
use glam::Vec2;

use crate::error::TerrainError;
use crate::height::evaluate_terrain;

/// Samples per side of the terrain grid.
pub const GRID_RESOLUTION: usize = 100;

/// Texture repeats across the terrain along each axis.
pub const UV_TILING: f32 = 5.0;

/// Largest resolution whose `resolution²` vertices fit `u32` indices.
const MAX_RESOLUTION: usize = 65_535;

/// CPU-side terrain surface sampled on a `resolution × resolution` grid.
///
/// Vertex `(ku, kv)` lives at index `kv + resolution * ku`. The triangle
/// list and UVs are fixed at build time; regeneration only rewrites
/// positions, normals and colors.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    resolution: usize,
    mesh: Mesh,
}

impl TerrainMesh {
    /// Samples per side.
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// The underlying mesh.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub(crate) fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Index of grid vertex `(ku, kv)`.
    pub fn vertex_index(&self, ku: usize, kv: usize) -> usize {
        kv + self.resolution * ku
    }

    /// Parametric coordinate of grid sample `k` along one axis.
    pub fn parametric(&self, k: usize) -> f32 {
        parametric(k, self.resolution)
    }
}

fn parametric(k: usize, resolution: usize) -> f32 {
    k as f32 / (resolution - 1) as f32
}

/// Builds the terrain at the default [`GRID_RESOLUTION`].
pub fn build_terrain() -> TerrainMesh {
    tessellate(GRID_RESOLUTION)
}

/// Builds the terrain with `resolution` samples per side.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidGridSize`] if `resolution < 2` or the
/// vertex count would not fit 32-bit indices.
pub fn build_terrain_with_resolution(resolution: usize) -> Result<TerrainMesh, TerrainError> {
    if !(2..=MAX_RESOLUTION).contains(&resolution) {
        return Err(TerrainError::InvalidGridSize { resolution });
    }
    Ok(tessellate(resolution))
}

fn tessellate(n: usize) -> TerrainMesh {
    let mut mesh = Mesh::new();
    mesh.positions.resize(n * n, glam::Vec3::ZERO);
    mesh.uvs.resize(n * n, Vec2::ZERO);

    for ku in 0..n {
        for kv in 0..n {
            let u = parametric(ku, n);
            let v = parametric(kv, n);
            let idx = kv + n * ku;
            mesh.positions[idx] = evaluate_terrain(u, v);
            mesh.uvs[idx] = Vec2::new(UV_TILING * u, UV_TILING * v);
        }
    }

    let n32 = n as u32;
    mesh.triangles.reserve(2 * (n - 1) * (n - 1));
    for ku in 0..n32 - 1 {
        for kv in 0..n32 - 1 {
            let idx = kv + n32 * ku;
            mesh.triangles.push([idx, idx + n32 + 1, idx + 1]);
            mesh.triangles.push([idx, idx + n32, idx + n32 + 1]);
        }
    }

    mesh.fill_empty_fields();

    tracing::debug!(
        resolution = n,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "Built terrain grid"
    );

    TerrainMesh {
        resolution: n,
        mesh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_topology_counts() {
        let terrain = build_terrain();
        assert_eq!(terrain.resolution(), 100);
        assert_eq!(terrain.mesh().vertex_count(), 10_000);
        assert_eq!(terrain.mesh().triangle_count(), 19_602);
        assert!(terrain.mesh().indices_in_bounds());
    }

    #[test]
    fn test_all_attributes_filled() {
        let terrain = build_terrain();
        let mesh = terrain.mesh();
        assert_eq!(mesh.uvs.len(), 10_000);
        assert_eq!(mesh.normals.len(), 10_000);
        assert_eq!(mesh.colors.len(), 10_000);
    }

    #[test]
    fn test_corner_vertices_match_base_height() {
        let terrain = build_terrain();
        let mesh = terrain.mesh();
        assert_eq!(mesh.positions[0], evaluate_terrain(0.0, 0.0));
        let last = terrain.vertex_index(99, 99);
        assert_eq!(last, 9_999);
        assert_eq!(mesh.positions[last], evaluate_terrain(1.0, 1.0));
    }

    #[test]
    fn test_uv_tiling() {
        let terrain = build_terrain();
        let mesh = terrain.mesh();
        assert_eq!(mesh.uvs[0], Vec2::ZERO);
        assert_eq!(mesh.uvs[9_999], Vec2::new(5.0, 5.0));
        let idx = terrain.vertex_index(0, 99);
        assert_eq!(mesh.uvs[idx], Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_cell_split_pattern() {
        let terrain = build_terrain_with_resolution(3).unwrap();
        let tris = &terrain.mesh().triangles;
        assert_eq!(tris.len(), 8);
        assert_eq!(tris[0], [0, 4, 1]);
        assert_eq!(tris[1], [0, 3, 4]);
        // Second cell of the first row starts at kv = 1.
        assert_eq!(tris[2], [1, 5, 2]);
    }

    #[test]
    fn test_initial_normals_face_up() {
        let terrain = build_terrain();
        assert!(terrain.mesh().normals.iter().all(|n| n.z > 0.0));
    }

    #[test]
    fn test_invalid_resolutions_rejected() {
        for bad in [0, 1, 70_000] {
            assert_eq!(
                build_terrain_with_resolution(bad).unwrap_err(),
                TerrainError::InvalidGridSize { resolution: bad }
            );
        }
    }

    #[test]
    fn test_minimal_grid() {
        let terrain = build_terrain_with_resolution(2).unwrap();
        assert_eq!(terrain.mesh().vertex_count(), 4);
        assert_eq!(terrain.mesh().triangle_count(), 2);
    }
}
