//! Static vegetation meshes assembled from revolved primitives.
//!
//! Props are built once at startup and drawn many times through per-instance
//! translations. Each prop records the vertex range of every sub-mesh so a
//! renderer or test can tell the trunk from the foliage.

use std::ops::Range;

use glam::Vec3;

use crate::mesh::Mesh;
use crate::primitives::{billboard_quad, cone, cylinder};

const TREE_TRUNK_HEIGHT: f32 = 0.7;
const TREE_TRUNK_RADIUS: f32 = 0.1;
const TREE_TRUNK_COLOR: Vec3 = Vec3::new(0.4, 0.3, 0.3);
const TREE_FOLIAGE_COLOR: Vec3 = Vec3::new(0.4, 0.6, 0.3);
const TREE_CONE_COUNT: u32 = 3;

const MUSHROOM_STEM_HEIGHT: f32 = 0.2;
const MUSHROOM_STEM_RADIUS: f32 = 0.05;
const MUSHROOM_STEM_COLOR: Vec3 = Vec3::splat(179.0 / 255.0);
const MUSHROOM_CAP_COLOR: Vec3 = Vec3::new(1.0, 45.0 / 255.0, 0.0);

/// Uniform scale applied to the grass billboard quad.
pub const GRASS_BILLBOARD_SCALE: f32 = 0.4;

/// Which vegetation archetype a [`PropMesh`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropKind {
    Tree,
    Mushroom,
    GrassBillboard,
}

/// A named, uniformly colored vertex range inside a [`PropMesh`].
#[derive(Clone, Debug, PartialEq)]
pub struct SubMesh {
    /// Human-readable part name ("trunk", "foliage", ...).
    pub name: &'static str,
    /// Vertex indices belonging to this part.
    pub vertices: Range<usize>,
    /// Fill color of the part.
    pub color: Vec3,
}

/// An assembled static prop mesh.
#[derive(Clone, Debug)]
pub struct PropMesh {
    /// Archetype.
    pub kind: PropKind,
    /// Combined geometry of all parts.
    pub mesh: Mesh,
    /// Parts in the order they were appended.
    pub parts: Vec<SubMesh>,
}

impl PropMesh {
    fn new(kind: PropKind) -> Self {
        Self {
            kind,
            mesh: Mesh::new(),
            parts: Vec::new(),
        }
    }

    fn push_part(&mut self, name: &'static str, mut part: Mesh, color: Vec3) {
        part.fill_color(color);
        let start = self.mesh.vertex_count();
        self.mesh.append(&part);
        self.parts.push(SubMesh {
            name,
            vertices: start..self.mesh.vertex_count(),
            color,
        });
    }

    /// Looks up a part by name.
    pub fn part(&self, name: &str) -> Option<&SubMesh> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// Brown trunk topped by three stacked green cones.
pub fn build_tree() -> PropMesh {
    let h = TREE_TRUNK_HEIGHT;
    let r = TREE_TRUNK_RADIUS;
    let mut tree = PropMesh::new(PropKind::Tree);

    tree.push_part("trunk", cylinder(r, h), TREE_TRUNK_COLOR);

    let mut foliage = Mesh::new();
    for level in 0..TREE_CONE_COUNT {
        foliage.append(&cone(4.0 * r, 6.0 * r, 2.0 * r * level as f32));
    }
    foliage.translate(Vec3::new(0.0, 0.0, h));
    tree.push_part("foliage", foliage, TREE_FOLIAGE_COLOR);

    tracing::debug!(vertices = tree.mesh.vertex_count(), "Built tree prop");
    tree
}

/// Gray stem under a flat red cap.
pub fn build_mushroom() -> PropMesh {
    let h = MUSHROOM_STEM_HEIGHT;
    let r = MUSHROOM_STEM_RADIUS;
    let mut mushroom = PropMesh::new(PropKind::Mushroom);

    mushroom.push_part("stem", cylinder(r, h), MUSHROOM_STEM_COLOR);

    let mut cap = cone(4.0 * r, 2.0 * r, 0.0);
    cap.translate(Vec3::new(0.0, 0.0, h));
    mushroom.push_part("cap", cap, MUSHROOM_CAP_COLOR);

    tracing::debug!(
        vertices = mushroom.mesh.vertex_count(),
        "Built mushroom prop"
    );
    mushroom
}

/// Textured quad for grass tufts. Colored white so the texture shows as-is.
pub fn build_grass_billboard() -> PropMesh {
    let mut grass = PropMesh::new(PropKind::GrassBillboard);
    let mut quad = billboard_quad();
    quad.scale(GRASS_BILLBOARD_SCALE);
    grass.push_part("blade", quad, Vec3::ONE);
    grass
}
