//! Procedural terrain: layered Perlin noise, Gaussian-peak base shape, grid
//! tessellation, in-place regeneration and minimum-distance scatter sampling.

mod error;
mod grid;
mod height;
mod noise_field;
mod params;
mod scatter;
mod update;

pub use error::TerrainError;
pub use grid::{
    GRID_RESOLUTION, TerrainMesh, UV_TILING, build_terrain, build_terrain_with_resolution,
};
pub use height::{GaussianPeak, TERRAIN_PEAKS, WORLD_SIZE, evaluate_terrain, world_to_parametric};
pub use noise_field::{DEFAULT_NOISE_SEED, MAX_OCTAVES, NoiseField};
pub use params::NoiseParameters;
pub use scatter::{
    DEFAULT_MAX_ATTEMPTS_PER_POINT, MIN_SCATTER_DISTANCE, ScatterSampler, ScatterSet,
};
pub use update::{CLEARING_U, CLEARING_V, in_clearing, surface_height, update_terrain};
