//! Orrery binary: a sun, eight planets, and a starfield in a window.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p orrery-app -- --seed 7 --light` to pick the sky and theme.

use clap::Parser;
use orrery_app::platform::PlatformDirs;
use orrery_app::window;
use orrery_config::{CliArgs, Config};
use orrery_sim::{BodyRegistry, SimulationState};
use tracing::{error, info};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir.clone()),
        None => PlatformDirs::resolve().unwrap_or_else(|e| {
            eprintln!("{e}, using the working directory");
            PlatformDirs::with_config_dir(std::path::PathBuf::from("orrery"))
        }),
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let on_disk = config.clone();
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    let registry = match config.simulation.bodies.clone() {
        Some(bodies) => match BodyRegistry::new(bodies) {
            Ok(registry) => registry,
            Err(e) => {
                error!("Invalid body list in config: {e}");
                std::process::exit(1);
            }
        },
        None => BodyRegistry::solar_system(),
    };
    info!("{} bodies around {}", registry.len() - 1, registry.central().name);

    let mut sim = match config.simulation.seed {
        Some(seed) => SimulationState::new(registry, seed),
        None => SimulationState::from_entropy(registry),
    };
    info!("Orbital phase seed: {}", sim.seed());
    if config.simulation.start_paused {
        info!("Starting paused");
        sim.set_paused(true);
    }

    let source = window::ConfigSource::new(dirs.config_dir.clone(), on_disk);
    if let Err(e) = window::run(config, sim, Some(source)) {
        error!("{e}");
        std::process::exit(1);
    }
}
