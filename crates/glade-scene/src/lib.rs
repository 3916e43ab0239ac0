//! Scene assembly and the per-frame regeneration contract.
//!
//! [`SceneContext`] carries the live noise parameters that a UI edits.
//! [`Scene`] owns the terrain, its render mirror and the scattered props, and
//! regenerates the terrain once on every frame whose parameters changed.

mod context;
mod scene;

pub use context::{SceneContext, params_from_config};
pub use scene::{FrameStats, PropLayer, Scene, SceneError, SceneSettings};
