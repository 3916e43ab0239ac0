//! Terrain generation error types.

/// Logical failures of terrain generation and sampling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The grid must have at least two samples per side and fit 32-bit indices.
    #[error("invalid terrain grid size {resolution}: need 2..=65535 samples per side")]
    InvalidGridSize { resolution: usize },

    /// Rejection sampling ran out of attempts before accepting every point.
    #[error(
        "scatter sampling infeasible: accepted {accepted} of {requested} points before \
         {attempts} consecutive rejections"
    )]
    ScatterInfeasible {
        requested: usize,
        accepted: usize,
        attempts: u32,
    },

    /// A mesh handed to the updater does not hold `resolution²` vertices.
    #[error("terrain topology mismatch: expected {expected} vertices, found {found}")]
    TopologyMismatch { expected: usize, found: usize },
}
