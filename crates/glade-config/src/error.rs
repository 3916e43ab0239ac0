//! Failures of the `config.ron` layer. File-level variants carry the path
//! they refer to.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// A numeric setting is NaN or infinite.
    #[error("{}: `{field}` must be a finite number, found {value}", path.display())]
    NonFinite {
        path: PathBuf,
        field: &'static str,
        value: f32,
    },

    #[error("cannot encode settings as RON: {0}")]
    Encode(#[from] ron::Error),

    #[error("no per-user configuration directory on this platform")]
    NoConfigDir,
}
