//! Live, UI-editable scene parameters with change tracking.

use glade_config::TerrainConfig;
use glade_terrain::NoiseParameters;

/// Parameters shared between the UI and the frame loop.
///
/// The UI mutates [`params_mut`](Self::params_mut); the scene compares the
/// live values with the last ones it regenerated from and rebuilds the
/// terrain only when they differ.
#[derive(Clone, Debug, Default)]
pub struct SceneContext {
    params: NoiseParameters,
    applied: Option<NoiseParameters>,
    frame: u64,
}

impl SceneContext {
    /// Create a context with nothing applied yet.
    pub fn new(params: NoiseParameters) -> Self {
        Self {
            params,
            applied: None,
            frame: 0,
        }
    }

    /// Build the initial parameters from the terrain configuration.
    ///
    /// Values are brought into the slider ranges, the same ones the UI can
    /// produce; non-finite values fall back to the defaults.
    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(params_from_config(config))
    }

    /// Current parameters.
    pub fn params(&self) -> &NoiseParameters {
        &self.params
    }

    /// Mutable access for the UI.
    pub fn params_mut(&mut self) -> &mut NoiseParameters {
        &mut self.params
    }

    /// `true` if the live parameters differ from the last applied ones.
    pub fn has_pending_change(&self) -> bool {
        self.applied != Some(self.params)
    }

    /// Record the live parameters as applied to the terrain.
    pub(crate) fn mark_applied(&mut self) {
        self.applied = Some(self.params);
    }

    /// Parameters the terrain was last regenerated with.
    pub fn applied(&self) -> Option<&NoiseParameters> {
        self.applied.as_ref()
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub(crate) fn advance_frame(&mut self) {
        self.frame += 1;
    }
}

/// Slider-range parameters for a terrain configuration.
pub fn params_from_config(config: &TerrainConfig) -> NoiseParameters {
    let requested = NoiseParameters {
        persistency: config.persistency,
        frequency_gain: config.frequency_gain,
        octave: config.octave,
        height_scale: config.height_scale,
    };
    let params = requested.clamped_to_ui_ranges();
    if params != requested {
        tracing::warn!(?requested, ?params, "Terrain parameters adjusted to slider ranges");
    }
    params
}
