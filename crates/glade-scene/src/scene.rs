//! Startup assembly and per-frame update of the terrain scene.

use glade_config::Config;
use glade_mesh::{
    Mesh, MirrorMesh, PropKind, PropMesh, RenderMesh, build_grass_billboard, build_mushroom,
    build_tree,
};
use glade_terrain::{
    NoiseField, ScatterSampler, ScatterSet, TerrainError, TerrainMesh, build_terrain,
    update_terrain,
};
use glam::Vec3;
use tracing::{debug, info};

use crate::context::SceneContext;

/// Scene-level failures.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

/// Fixed settings used once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    /// Seed of the noise lattice.
    pub noise_seed: u32,
    /// Seed of the placement stream shared by all prop categories.
    pub scatter_seed: u64,
    /// Minimum planar distance between props of one category.
    pub min_distance: f32,
    /// Consecutive rejections tolerated per placed prop.
    pub max_attempts_per_point: u32,
    /// Number of trees.
    pub tree_count: usize,
    /// Number of mushrooms.
    pub mushroom_count: usize,
    /// Number of grass billboards.
    pub grass_count: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SceneSettings {
    fn from(config: &Config) -> Self {
        Self {
            noise_seed: config.terrain.noise_seed,
            scatter_seed: config.scatter.seed,
            min_distance: config.scatter.min_distance,
            max_attempts_per_point: config.scatter.max_attempts_per_point,
            tree_count: config.scatter.tree_count,
            mushroom_count: config.scatter.mushroom_count,
            grass_count: config.scatter.grass_count,
        }
    }
}

/// One category of scattered prop: its shared mesh and placement points.
#[derive(Clone, Debug)]
pub struct PropLayer {
    /// Mesh drawn once per instance.
    pub prop: PropMesh,
    /// Base-surface placement points.
    pub positions: ScatterSet,
    translations: Vec<Vec3>,
}

impl PropLayer {
    fn new(prop: PropMesh, positions: ScatterSet) -> Self {
        let translations = Vec::with_capacity(positions.len());
        Self {
            prop,
            positions,
            translations,
        }
    }

    /// Per-instance translations computed for the most recent frame.
    pub fn translations(&self) -> &[Vec3] {
        &self.translations
    }
}

/// What happened during one [`Scene::frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Whether the terrain was regenerated this frame.
    pub regenerated: bool,
    /// Total prop instances placed.
    pub instances: usize,
}

/// The terrain, its render-side mirror and all scattered props.
pub struct Scene<R: RenderMesh = MirrorMesh> {
    field: NoiseField,
    terrain: TerrainMesh,
    render: R,
    layers: Vec<PropLayer>,
}

impl Scene<MirrorMesh> {
    /// Build the scene with a CPU mirror as the render-side mesh.
    pub fn new(settings: &SceneSettings, ctx: &mut SceneContext) -> Result<Self, SceneError> {
        Self::with_render(settings, ctx, MirrorMesh::upload)
    }
}

impl<R: RenderMesh> Scene<R> {
    /// Build the terrain, hand it to `make_render` for the one-time upload,
    /// apply the context's parameters and scatter every prop category.
    ///
    /// Categories are sampled in the order trees, mushrooms, grass from one
    /// placement stream.
    pub fn with_render(
        settings: &SceneSettings,
        ctx: &mut SceneContext,
        make_render: impl FnOnce(&Mesh) -> R,
    ) -> Result<Self, SceneError> {
        let field = NoiseField::new(settings.noise_seed);
        let mut terrain = build_terrain();
        let mut render = make_render(terrain.mesh());

        update_terrain(&mut terrain, &mut render, &field, ctx.params())?;
        ctx.mark_applied();

        let mut sampler = ScatterSampler::new(settings.scatter_seed)
            .with_min_distance(settings.min_distance)
            .with_max_attempts_per_point(settings.max_attempts_per_point);

        let layers = vec![
            PropLayer::new(
                build_tree(),
                sampler.generate_positions(settings.tree_count)?,
            ),
            PropLayer::new(
                build_mushroom(),
                sampler.generate_positions(settings.mushroom_count)?,
            ),
            PropLayer::new(
                build_grass_billboard(),
                sampler.generate_positions(settings.grass_count)?,
            ),
        ];

        info!(
            vertices = terrain.mesh().vertex_count(),
            triangles = terrain.mesh().triangle_count(),
            trees = settings.tree_count,
            mushrooms = settings.mushroom_count,
            grass = settings.grass_count,
            "Scene initialized"
        );

        Ok(Self {
            field,
            terrain,
            render,
            layers,
        })
    }

    /// Run one frame.
    ///
    /// Regenerates the terrain if the context's parameters changed since the
    /// last regeneration, then places every prop instance on the current
    /// surface.
    pub fn frame(&mut self, ctx: &mut SceneContext) -> Result<FrameStats, SceneError> {
        ctx.advance_frame();

        let regenerated = ctx.has_pending_change();
        if regenerated {
            update_terrain(
                &mut self.terrain,
                &mut self.render,
                &self.field,
                ctx.params(),
            )?;
            ctx.mark_applied();
            debug!(frame = ctx.frame(), "Terrain regenerated after parameter change");
        }

        let params = ctx.params();
        let mut instances = 0;
        for layer in &mut self.layers {
            layer.translations.clear();
            layer
                .translations
                .extend(layer.positions.instance_translations(&self.field, params));
            instances += layer.translations.len();
        }

        Ok(FrameStats {
            frame: ctx.frame(),
            regenerated,
            instances,
        })
    }

    /// The CPU terrain mesh.
    pub fn terrain(&self) -> &TerrainMesh {
        &self.terrain
    }

    /// The render-side mirror of the terrain.
    pub fn render(&self) -> &R {
        &self.render
    }

    /// The noise field driving regeneration.
    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    /// All prop layers.
    pub fn layers(&self) -> &[PropLayer] {
        &self.layers
    }

    /// The layer holding props of `kind`.
    pub fn layer(&self, kind: PropKind) -> Option<&PropLayer> {
        self.layers.iter().find(|l| l.prop.kind == kind)
    }
}
