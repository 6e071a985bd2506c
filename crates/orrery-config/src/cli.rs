//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Interactive solar system orrery")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Seed for orbital phases. Same seed, same sky.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start with the simulation paused.
    #[arg(long)]
    pub paused: bool,

    /// Start in the light theme.
    #[arg(long)]
    pub light: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(seed) = args.seed {
            self.simulation.seed = Some(seed);
        }
        if args.paused {
            self.simulation.start_paused = true;
        }
        if args.light {
            self.theme.start_dark = false;
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
            width: Some(1920),
            seed: Some(77),
            paused: true,
            light: true,
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.simulation.seed, Some(77));
        assert!(config.simulation.start_paused);
        assert!(!config.theme.start_dark);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let mut config = Config::default();
        config.simulation.start_paused = true;
        let original = config.clone();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::try_parse_from([
            "orrery",
            "--seed",
            "5",
            "--paused",
            "--log-level",
            "debug",
            "--fullscreen",
            "true",
        ])
        .unwrap();
        assert_eq!(args.seed, Some(5));
        assert!(args.paused);
        assert!(!args.light);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert_eq!(args.fullscreen, Some(true));
    }
}
