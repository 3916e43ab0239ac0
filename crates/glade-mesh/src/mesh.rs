//! Triangle mesh with parallel per-vertex attribute arrays.

use glam::{Vec2, Vec3};

/// Normal assigned to vertices that no non-degenerate triangle touches.
pub const DEFAULT_NORMAL: Vec3 = Vec3::Z;

/// Color assigned to vertices that were never colored explicitly.
pub const DEFAULT_COLOR: Vec3 = Vec3::ONE;

/// A CPU-side triangle mesh.
///
/// Attributes are stored as parallel arrays indexed by vertex. After
/// [`fill_empty_fields`](Self::fill_empty_fields) every attribute array has
/// the same length as `positions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Texture coordinates.
    pub uvs: Vec<Vec2>,
    /// Unit vertex normals.
    pub normals: Vec<Vec3>,
    /// Linear RGB vertex colors.
    pub colors: Vec<Vec3>,
    /// Triangles as triples of vertex indices.
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns `true` if every triangle references an existing vertex.
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.positions.len() as u64;
        self.triangles
            .iter()
            .all(|tri| tri.iter().all(|&i| (i as u64) < n))
    }

    /// Fills attribute arrays that are shorter than `positions`.
    ///
    /// Missing UVs become zero, missing colors become [`DEFAULT_COLOR`] and
    /// normals are recomputed from the geometry if any are missing.
    pub fn fill_empty_fields(&mut self) {
        let n = self.positions.len();
        if self.uvs.len() < n {
            self.uvs.resize(n, Vec2::ZERO);
        }
        if self.colors.len() < n {
            self.colors.resize(n, DEFAULT_COLOR);
        }
        if self.normals.len() != n {
            self.compute_normals();
        }
    }

    /// Recomputes per-vertex normals from positions and triangles.
    ///
    /// Each vertex normal is the normalized sum of the unit normals of its
    /// incident faces. Degenerate faces contribute nothing; a vertex with no
    /// usable faces gets [`DEFAULT_NORMAL`]. The normal buffer is reused, so
    /// repeated calls on an unchanged topology do not allocate.
    pub fn compute_normals(&mut self) {
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vec3::ZERO);

        for &[a, b, c] in &self.triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let p0 = self.positions[a];
            let p1 = self.positions[b];
            let p2 = self.positions[c];
            let Some(face) = (p1 - p0).cross(p2 - p0).try_normalize() else {
                continue;
            };
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }

        for normal in &mut self.normals {
            *normal = normal.try_normalize().unwrap_or(DEFAULT_NORMAL);
        }
    }

    /// Appends another mesh, offsetting its indices past the current vertices.
    ///
    /// Attributes of both meshes are completed first so that the parallel
    /// arrays stay aligned.
    pub fn append(&mut self, other: &Mesh) {
        self.fill_empty_fields();
        let mut other = other.clone();
        other.fill_empty_fields();

        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.uvs.extend_from_slice(&other.uvs);
        self.normals.extend_from_slice(&other.normals);
        self.colors.extend_from_slice(&other.colors);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|&[a, b, c]| [a + offset, b + offset, c + offset]),
        );
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Scales every vertex position about the origin.
    pub fn scale(&mut self, factor: f32) {
        for p in &mut self.positions {
            *p *= factor;
        }
    }

    /// Sets every vertex to a single color.
    pub fn fill_color(&mut self, color: Vec3) {
        self.colors.clear();
        self.colors.resize(self.positions.len(), color);
    }
}
