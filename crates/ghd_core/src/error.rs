//! Validation errors for scenes and render settings.

use thiserror::Error;

/// Errors raised when a scene or render configuration is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid image size {width}x{height}: both dimensions must be at least 1")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    ZeroSamples,

    #[error("Worker count must be at least 1")]
    ZeroThreads,

    #[error("Degenerate camera: {0}")]
    DegenerateCamera(&'static str),

    #[error("Invalid sphere radius {0}: must be positive")]
    InvalidRadius(f64),

    #[error("Sphere center must be finite")]
    NonFiniteCenter,

    #[error("Invalid albedo [{r}, {g}, {b}]: components must lie in [0, 1]")]
    InvalidAlbedo { r: f64, g: f64, b: f64 },

    #[error("Invalid metal fuzz {0}: must lie in [0, 1]")]
    InvalidFuzz(f64),

    #[error("Invalid refractive index {0}: must be positive")]
    InvalidRefractiveIndex(f64),

    #[error("Object {index}: {source}")]
    InvalidObject {
        index: usize,
        #[source]
        source: Box<ConfigError>,
    },
}

/// Result type for validation.
pub type ConfigResult<T> = Result<T, ConfigError>;
