//! Configuration for the glade terrain viewer.
//!
//! Settings persist to disk as RON and can be overridden from the command
//! line. The terrain section can be re-read while the scene runs.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, ScatterConfig, TerrainConfig};
pub use error::ConfigError;
