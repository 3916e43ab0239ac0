//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "glade", about = "Procedural terrain and vegetation generator")]
pub struct CliArgs {
    /// Noise persistency (per-octave amplitude decay).
    #[arg(long)]
    pub persistency: Option<f32>,

    /// Noise frequency gain (per-octave frequency multiplier).
    #[arg(long)]
    pub frequency_gain: Option<f32>,

    /// Number of noise octaves.
    #[arg(long)]
    pub octave: Option<u32>,

    /// Height multiplier applied to the noise.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Seed of the noise lattice.
    #[arg(long)]
    pub noise_seed: Option<u32>,

    /// Seed of the prop placement stream.
    #[arg(long)]
    pub scatter_seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of frames the headless loop runs.
    #[arg(long, default_value_t = 60)]
    pub frames: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(p) = args.persistency {
            self.terrain.persistency = p;
        }
        if let Some(g) = args.frequency_gain {
            self.terrain.frequency_gain = g;
        }
        if let Some(o) = args.octave {
            self.terrain.octave = o;
        }
        if let Some(h) = args.height_scale {
            self.terrain.height_scale = h;
        }
        if let Some(seed) = args.noise_seed {
            self.terrain.noise_seed = seed;
        }
        if let Some(seed) = args.scatter_seed {
            self.scatter.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            octave: Some(4),
            height_scale: Some(1.5),
            scatter_seed: Some(77),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.terrain.octave, 4);
        assert_eq!(config.terrain.height_scale, 1.5);
        assert_eq!(config.scatter.seed, 77);
        // Non-overridden fields retain defaults
        assert_eq!(config.terrain.persistency, 0.6);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "glade",
            "--frequency-gain",
            "1.8",
            "--log-level",
            "debug",
            "--frames",
            "5",
        ]);
        assert_eq!(args.frequency_gain, Some(1.8));
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.frames, 5);
        assert!(args.octave.is_none());
    }

    #[test]
    fn test_frames_default() {
        let args = CliArgs::parse_from(["glade"]);
        assert_eq!(args.frames, 60);
    }
}
