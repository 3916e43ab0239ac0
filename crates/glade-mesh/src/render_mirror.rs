//! Render-side mirrors of CPU meshes.
//!
//! The CPU [`Mesh`] is the source of truth. A [`RenderMesh`] receives pushed
//! copies of the mutable attributes after every CPU-side change and is never
//! read back. Index and UV buffers are uploaded once when the mirror is
//! created.

use std::borrow::Cow;

use glam::Vec3;

use crate::mesh::Mesh;

/// Sink for per-vertex attributes that change when a mesh is regenerated.
pub trait RenderMesh {
    /// Replaces the mirrored vertex positions.
    fn update_positions(&mut self, positions: &[Vec3]);
    /// Replaces the mirrored vertex normals.
    fn update_normals(&mut self, normals: &[Vec3]);
    /// Replaces the mirrored vertex colors.
    fn update_colors(&mut self, colors: &[Vec3]);
}

/// A tightly packed `[f32; 3]` attribute buffer with an upload counter.
#[derive(Clone, Debug, Default)]
pub struct MirrorBuffer {
    data: Vec<[f32; 3]>,
    uploads: u64,
}

impl MirrorBuffer {
    fn from_slice(values: &[Vec3]) -> Self {
        let mut buffer = Self::default();
        buffer.write(values);
        buffer
    }

    /// Overwrites the buffer contents. Reuses the allocation when the length
    /// is unchanged.
    fn write(&mut self, values: &[Vec3]) {
        self.data.clear();
        self.data
            .extend_from_slice(bytemuck::cast_slice::<Vec3, [f32; 3]>(values));
        self.uploads += 1;
    }

    /// Returns the buffer contents as a byte slice for GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Returns the mirrored values.
    pub fn as_vec3s(&self) -> &[Vec3] {
        bytemuck::cast_slice(&self.data)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// How many times this buffer has been written, including creation.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }
}

/// CPU stand-in for a GPU vertex/index buffer set.
///
/// Holds byte-compatible copies of everything a renderer would upload.
/// Positions, normals and colors are refreshed through [`RenderMesh`];
/// UVs and indices are written once by [`MirrorMesh::upload`].
#[derive(Clone, Debug, Default)]
pub struct MirrorMesh {
    positions: MirrorBuffer,
    normals: MirrorBuffer,
    colors: MirrorBuffer,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
    index_uploads: u64,
}

impl MirrorMesh {
    /// Creates a mirror holding an initial copy of every attribute of `mesh`.
    ///
    /// Attributes shorter than the position array are completed the same way
    /// [`Mesh::fill_empty_fields`] would, without touching `mesh`.
    pub fn upload(mesh: &Mesh) -> Self {
        let n = mesh.positions.len();
        let mesh = if mesh.normals.len() == n && mesh.colors.len() == n && mesh.uvs.len() == n {
            Cow::Borrowed(mesh)
        } else {
            let mut complete = mesh.clone();
            complete.fill_empty_fields();
            Cow::Owned(complete)
        };

        let indices: Vec<u32> = mesh.triangles.iter().flatten().copied().collect();
        tracing::debug!(
            vertices = mesh.positions.len(),
            indices = indices.len(),
            "Uploaded mesh mirror"
        );

        Self {
            positions: MirrorBuffer::from_slice(&mesh.positions),
            normals: MirrorBuffer::from_slice(&mesh.normals),
            colors: MirrorBuffer::from_slice(&mesh.colors),
            uvs: bytemuck::cast_slice::<glam::Vec2, [f32; 2]>(&mesh.uvs).to_vec(),
            indices,
            index_uploads: 1,
        }
    }

    /// Mirrored positions.
    pub fn positions(&self) -> &MirrorBuffer {
        &self.positions
    }

    /// Mirrored normals.
    pub fn normals(&self) -> &MirrorBuffer {
        &self.normals
    }

    /// Mirrored colors.
    pub fn colors(&self) -> &MirrorBuffer {
        &self.colors
    }

    /// Mirrored texture coordinates as bytes.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Mirrored index buffer (three indices per triangle).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Mirrored index buffer as bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Number of times the index buffer has been uploaded. Always 1.
    pub fn index_upload_count(&self) -> u64 {
        self.index_uploads
    }
}

impl RenderMesh for MirrorMesh {
    fn update_positions(&mut self, positions: &[Vec3]) {
        self.positions.write(positions);
    }

    fn update_normals(&mut self, normals: &[Vec3]) {
        self.normals.write(normals);
    }

    fn update_colors(&mut self, colors: &[Vec3]) {
        self.colors.write(colors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
            ..Default::default()
        };
        mesh.fill_empty_fields();
        mesh
    }

    #[test]
    fn test_upload_copies_all_attributes() {
        let mesh = triangle();
        let mirror = MirrorMesh::upload(&mesh);
        assert_eq!(mirror.positions().as_vec3s(), mesh.positions.as_slice());
        assert_eq!(mirror.normals().as_vec3s(), mesh.normals.as_slice());
        assert_eq!(mirror.colors().len(), 3);
        assert_eq!(mirror.indices(), &[0, 1, 2]);
        assert_eq!(mirror.index_bytes().len(), 12);
        assert_eq!(mirror.uv_bytes().len(), 24);
    }

    #[test]
    fn test_upload_completes_missing_attributes() {
        let mesh = Mesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            triangles: vec![[0, 1, 2]],
            ..Default::default()
        };
        let mirror = MirrorMesh::upload(&mesh);
        assert_eq!(mirror.normals().len(), 3);
        assert!(mesh.normals.is_empty(), "Source mesh must not be modified");
    }

    #[test]
    fn test_position_bytes_are_tightly_packed() {
        let mirror = MirrorMesh::upload(&triangle());
        assert_eq!(mirror.positions().as_bytes().len(), 3 * 12);
    }

    #[test]
    fn test_updates_count_uploads_but_not_indices() {
        let mut mesh = triangle();
        let mut mirror = MirrorMesh::upload(&mesh);
        mesh.positions[2].z = 4.0;
        mirror.update_positions(&mesh.positions);
        mirror.update_normals(&mesh.normals);

        assert_eq!(mirror.positions().upload_count(), 2);
        assert_eq!(mirror.normals().upload_count(), 2);
        assert_eq!(mirror.colors().upload_count(), 1);
        assert_eq!(mirror.index_upload_count(), 1);
        assert_eq!(mirror.positions().as_vec3s()[2].z, 4.0);
    }
}
