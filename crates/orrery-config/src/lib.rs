//! Configuration for the orrery.
//!
//! Settings persist to disk as a RON file in the platform config directory.
//! Every section is `#[serde(default)]`, so older or partial files keep
//! loading as new fields appear. Command-line flags override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, ControlsConfig, DebugConfig, InputConfig,
    SimulationConfig, StarfieldConfig, ThemeConfig, WindowConfig,
};
pub use error::ConfigError;
