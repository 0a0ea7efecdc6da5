use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::presets::ScenePreset;

/// Log levels selectable from the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a scene progressively and write the result as a PNG.
#[derive(Debug, Parser)]
#[command(name = "ghd")]
#[command(about = "Progressive Monte Carlo path tracer")]
pub struct Args {
    /// Built-in scene to render (ignored when --scene is given)
    #[arg(long, value_enum, default_value = "floor-sphere")]
    pub preset: ScenePreset,

    /// JSON scene description to render instead of a preset
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// JSON render settings; replaces every settings flag below
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Number of accumulation iterations
    #[arg(long, short = 's', default_value_t = 4)]
    pub samples_per_pixel: u32,

    /// Maximum bounces per path
    #[arg(long, default_value_t = 4)]
    pub max_depth: u32,

    /// Lens aperture (0 disables depth-of-field); required without --settings
    #[arg(long, required_unless_present = "settings")]
    pub aperture: Option<f64>,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output PNG path
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Logging level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
