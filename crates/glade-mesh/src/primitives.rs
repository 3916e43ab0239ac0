//! Revolved primitive shapes used to assemble props.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::mesh::Mesh;

/// Number of radial samples around every revolved primitive.
pub const RADIAL_SEGMENTS: u32 = 20;

fn ring_point(radius: f32, i: u32, z: f32) -> Vec3 {
    let angle = TAU * i as f32 / RADIAL_SEGMENTS as f32;
    Vec3::new(radius * angle.cos(), radius * angle.sin(), z)
}

/// Open cylinder along +Z with its base ring at `z = 0`.
///
/// Vertices alternate bottom/top per radial sample, giving
/// `2 * RADIAL_SEGMENTS` vertices and the same number of side triangles.
pub fn cylinder(radius: f32, height: f32) -> Mesh {
    let n = RADIAL_SEGMENTS;
    let mut mesh = Mesh::new();

    for i in 0..n {
        let p = ring_point(radius, i, 0.0);
        mesh.positions.push(p);
        mesh.positions.push(p + Vec3::new(0.0, 0.0, height));
        let u = i as f32 / n as f32;
        mesh.uvs.push(Vec2::new(u, 0.0));
        mesh.uvs.push(Vec2::new(u, 1.0));
    }

    for i in 0..n {
        let b0 = 2 * i;
        let t0 = b0 + 1;
        let b1 = (b0 + 2) % (2 * n);
        let t1 = (b0 + 3) % (2 * n);
        mesh.triangles.push([b0, b1, t0]);
        mesh.triangles.push([t0, b1, t1]);
    }

    mesh.fill_empty_fields();
    mesh
}

/// Closed cone along +Z whose base ring sits at `z = z_offset`.
///
/// Layout: `RADIAL_SEGMENTS` ring vertices, then the base center, then the
/// apex. The side fan faces outward and the base fan faces down, so the
/// cone reads as solid from any side.
pub fn cone(radius: f32, height: f32, z_offset: f32) -> Mesh {
    let n = RADIAL_SEGMENTS;
    let mut mesh = Mesh::new();

    for i in 0..n {
        mesh.positions.push(ring_point(radius, i, z_offset));
    }
    let center = n;
    let apex = n + 1;
    mesh.positions.push(Vec3::new(0.0, 0.0, z_offset));
    mesh.positions.push(Vec3::new(0.0, 0.0, z_offset + height));

    for i in 0..n {
        let next = (i + 1) % n;
        mesh.triangles.push([i, next, apex]);
        mesh.triangles.push([next, i, center]);
    }

    mesh.fill_empty_fields();
    mesh
}

/// Unit quad in the XZ plane, centered on X with its bottom edge on `z = 0`.
///
/// UVs span `[0, 1]²` so a full texture maps onto the quad.
pub fn billboard_quad() -> Mesh {
    let mut mesh = Mesh {
        positions: vec![
            Vec3::new(-0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 1.0),
            Vec3::new(-0.5, 0.0, 1.0),
        ],
        uvs: vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ],
        triangles: vec![[0, 2, 1], [0, 3, 2]],
        ..Default::default()
    };
    mesh.fill_empty_fields();
    mesh
}
