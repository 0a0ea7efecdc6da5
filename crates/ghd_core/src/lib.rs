//! GHD Core - scene descriptors and render settings.
//!
//! This crate holds the data handed to the renderer by its collaborators:
//!
//! - **Scene descriptors**: `SceneDescription`, `ObjectDescription`,
//!   `ShapeDescription`, `MaterialDescription`
//! - **Render settings**: `RenderSettings`, `CameraSettings`
//!
//! Both are plain serde types. Validation lives here too, so a bad
//! configuration is rejected before any renderer state is touched.
//!
//! # Example
//!
//! ```
//! use ghd_core::{MaterialDescription, SceneDescription};
//! use ghd_math::Vec3;
//!
//! let mut scene = SceneDescription::new("single sphere");
//! scene.add_sphere(
//!     Vec3::new(0.0, 0.0, -1.0),
//!     0.5,
//!     MaterialDescription::Lambertian { albedo: Vec3::splat(0.5) },
//! );
//! assert!(scene.validate().is_ok());
//! ```

pub mod error;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use error::{ConfigError, ConfigResult};
pub use scene::{MaterialDescription, ObjectDescription, SceneDescription, ShapeDescription};
pub use settings::{CameraSettings, RenderSettings};
