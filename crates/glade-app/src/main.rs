//! Headless driver for the glade terrain scene.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. The frame loop stands in for a windowed renderer: a scripted sweep
//! plays the role of the UI sliders, and the config file is polled for
//! hot-reloaded terrain parameters.
//!
//! Run with `cargo run -p glade-app -- --frames 120 --octave 4`.

mod sweep;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use glade_config::{CliArgs, Config};
use glade_scene::{Scene, SceneContext, SceneSettings, params_from_config};
use tracing::{info, warn};

use crate::sweep::ParameterSweep;

/// Frames between two slider edits of the scripted sweep.
const SWEEP_PERIOD: u64 = 15;

/// Frames between two polls of the config file.
const RELOAD_PERIOD: u64 = 30;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(Config::default_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let on_disk = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    let log_to_file = cfg!(debug_assertions) && config.debug.log_to_file;
    if let Err(e) = glade_log::init_logging(Some(&log_dir), log_to_file, Some(&config)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match run(&config, on_disk, &config_dir, args.frames) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("glade: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Drive the scene for `frames` frames. `on_disk` is the file content the
/// terrain poll compares against, so CLI overrides persist until the file
/// itself changes.
fn run(
    config: &Config,
    mut on_disk: Config,
    config_dir: &Path,
    frames: u32,
) -> Result<(), glade_scene::SceneError> {
    let settings = SceneSettings::from(config);
    let mut ctx = SceneContext::from_config(&config.terrain);
    let mut scene = Scene::new(&settings, &mut ctx)?;

    let sweep = ParameterSweep::new(SWEEP_PERIOD);
    let mut regenerations = 0;

    for _ in 0..frames {
        let next = ctx.frame() + 1;

        sweep.apply(next, ctx.params_mut());

        if next % RELOAD_PERIOD == 0 {
            match on_disk.poll_terrain(config_dir) {
                Ok(Some(terrain)) => {
                    info!("Applying terrain parameters from disk");
                    *ctx.params_mut() = params_from_config(&terrain);
                    on_disk.terrain = terrain;
                }
                Ok(None) => {}
                Err(e) => warn!("Config reload failed: {e}"),
            }
        }

        let stats = scene.frame(&mut ctx)?;
        if stats.regenerated {
            regenerations += 1;
            info!(
                frame = stats.frame,
                persistency = ctx.params().persistency,
                frequency_gain = ctx.params().frequency_gain,
                octave = ctx.params().octave,
                height_scale = ctx.params().height_scale,
                instances = stats.instances,
                "Frame regenerated terrain"
            );
        }
    }

    let mesh = scene.terrain().mesh();
    let (min_z, max_z) = mesh
        .positions
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.z), hi.max(p.z))
        });
    info!(
        frames = ctx.frame(),
        regenerations,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        min_z,
        max_z,
        "Run finished"
    );
    for layer in scene.layers() {
        info!(
            kind = ?layer.prop.kind,
            instances = layer.translations().len(),
            prop_vertices = layer.prop.mesh.vertex_count(),
            "Prop layer"
        );
    }
    Ok(())
}
