//! GHD Renderer - progressive CPU path tracing.
//!
//! A Monte Carlo path tracer over spheres with diffuse, metal and glass
//! materials, lit by a sky gradient. Samples accumulate over repeated
//! iterations; each iteration sweeps the image row by row on a rayon pool.
//!
//! ```no_run
//! use ghd_core::{CameraSettings, MaterialDescription, RenderSettings, SceneDescription};
//! use ghd_renderer::{ProgressiveRenderer, Vec3};
//!
//! let mut scene = SceneDescription::new("demo");
//! scene.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialDescription::Dielectric {
//!     refractive_index: 1.5,
//! });
//!
//! let settings = RenderSettings {
//!     image_width: 320,
//!     image_height: 180,
//!     samples_per_pixel: 16,
//!     max_bounce_depth: 8,
//!     camera: CameraSettings {
//!         lookfrom: Vec3::ZERO,
//!         lookat: Vec3::new(0.0, 0.0, -1.0),
//!         vup: Vec3::Y,
//!         vertical_fov_degrees: 90.0,
//!         aperture: 0.0,
//!         focus_distance: 1.0,
//!     },
//!     threads: None,
//!     seed: None,
//! };
//!
//! let mut renderer = ProgressiveRenderer::new(settings, &scene)?;
//! while !renderer.is_complete() {
//!     renderer.step()?;
//! }
//! let rgba: &[u8] = renderer.display_buffer();
//! # Ok::<(), ghd_renderer::RenderError>(())
//! ```

mod buffer;
mod camera;
mod error;
mod hittable;
mod material;
mod progressive;
mod ray;
mod renderer;
pub mod sampling;
mod sphere;

pub use buffer::{AccumulationBuffer, DisplayBuffer, BYTES_PER_PIXEL};
pub use camera::Camera;
pub use error::{BufferError, BufferResult, RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, Scene};
pub use material::{reflectance, Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use progressive::{ProgressiveRenderer, StepReport};
pub use ray::Ray;
pub use renderer::{accumulated_to_rgba, linear_to_gamma, ray_color, sky_gradient, T_MIN};
pub use sphere::Sphere;

/// Re-export the vector and color types from ghd_math
pub use ghd_math::{Color, Interval, Vec3};
