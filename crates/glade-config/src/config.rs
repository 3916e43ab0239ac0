//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

const APP_NAME: &str = "glade";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Noise layer parameters applied on top of the base terrain.
    pub terrain: TerrainConfig,
    /// Prop scattering settings.
    pub scatter: ScatterConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Initial noise parameters and noise lattice seed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Per-octave amplitude decay.
    pub persistency: f32,
    /// Per-octave frequency multiplier.
    pub frequency_gain: f32,
    /// Number of noise octaves.
    pub octave: u32,
    /// Multiplier applied to the summed noise.
    pub height_scale: f32,
    /// Seed of the Perlin permutation lattice.
    pub noise_seed: u32,
}

/// Scatter sampling settings, one count per prop category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterConfig {
    /// Seed of the placement random stream.
    pub seed: u64,
    /// Minimum planar distance between two props of one category.
    pub min_distance: f32,
    /// Consecutive rejections tolerated before sampling fails.
    pub max_attempts_per_point: u32,
    /// Number of trees.
    pub tree_count: usize,
    /// Number of mushrooms.
    pub mushroom_count: usize,
    /// Number of grass billboards.
    pub grass_count: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the config in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            persistency: 0.6,
            frequency_gain: 2.392,
            octave: 8,
            height_scale: 0.923,
            noise_seed: 0,
        }
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            min_distance: 0.8,
            max_attempts_per_point: 10_000,
            tree_count: 50,
            mushroom_count: 50,
            grass_count: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

impl TerrainConfig {
    /// First non-finite float among the noise settings.
    fn non_finite_field(&self) -> Option<(&'static str, f32)> {
        [
            ("terrain.persistency", self.persistency),
            ("terrain.frequency_gain", self.frequency_gain),
            ("terrain.height_scale", self.height_scale),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    }
}

// --- Persistence ---

impl Config {
    /// Platform configuration directory for this application.
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_NAME))
    }

    /// Location of the settings file inside `config_dir`.
    pub fn file_in(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }

    /// Read the settings file in `config_dir`, writing the defaults there
    /// first if it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::file_in(config_dir);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default settings to {}", path.display());
            return Ok(config);
        }
        let config = Self::read(&path)?;
        log::info!(
            "Loaded settings from {} (octave {}, {} trees)",
            path.display(),
            config.terrain.octave,
            config.scatter.tree_count
        );
        Ok(config)
    }

    /// Parse and validate one settings file.
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let scatter_spacing = ("scatter.min_distance", config.scatter.min_distance);
        let bad = config
            .terrain
            .non_finite_field()
            .or_else(|| (!scatter_spacing.1.is_finite()).then_some(scatter_spacing));
        if let Some((field, value)) = bad {
            return Err(ConfigError::NonFinite {
                path: path.to_path_buf(),
                field,
                value,
            });
        }
        Ok(config)
    }

    /// Write the settings to `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = Self::file_in(config_dir);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .struct_names(false);
        let text = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-read the settings file and return its terrain section if it
    /// differs from the one in `self`.
    ///
    /// Only the noise parameters can change while the scene is live. Edits
    /// to the other sections are reported and left for the next start.
    pub fn poll_terrain(&self, config_dir: &Path) -> Result<Option<TerrainConfig>, ConfigError> {
        let on_disk = Self::read(&Self::file_in(config_dir))?;

        if on_disk.scatter != self.scatter || on_disk.debug != self.debug {
            log::warn!("Scatter and debug settings changed on disk; restart to apply them");
        }
        if on_disk.terrain == self.terrain {
            return Ok(None);
        }
        log::info!("Terrain settings changed on disk");
        Ok(Some(on_disk.terrain))
    }
}
