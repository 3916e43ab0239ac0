//! Mesh data structures, normal recomputation, render-side mirrors and
//! procedural prop geometry (trees, mushrooms, grass billboards).

pub mod mesh;
pub mod primitives;
pub mod props;
pub mod render_mirror;

pub use mesh::{DEFAULT_COLOR, DEFAULT_NORMAL, Mesh};
pub use primitives::{RADIAL_SEGMENTS, billboard_quad, cone, cylinder};
pub use props::{
    GRASS_BILLBOARD_SCALE, PropKind, PropMesh, SubMesh, build_grass_billboard, build_mushroom,
    build_tree,
};
pub use render_mirror::{MirrorBuffer, MirrorMesh, RenderMesh};
