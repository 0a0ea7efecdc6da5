//! Renderer error types.

use ghd_core::ConfigError;
use thiserror::Error;

/// Errors from pixel buffer access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    #[error("Buffer size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    SizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },
}

/// Result type for buffer access.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur while configuring or running the renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;
