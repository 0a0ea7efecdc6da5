//! Render configuration supplied by the UI/configuration collaborator.
//!
//! Any change to these values invalidates the accumulated image, so the
//! renderer only accepts them through `reset()`.

use ghd_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Camera placement and lens parameters.
///
/// There is deliberately no `Default`: the aperture has no canonical value
/// and must always be chosen by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Eye position
    pub lookfrom: Vec3,
    /// Point the camera looks at
    pub lookat: Vec3,
    /// World-space "up" hint used to build the camera basis
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov_degrees: f64,
    /// Lens diameter; 0 disables depth-of-field
    pub aperture: f64,
    /// Distance from the eye to the plane of perfect focus
    pub focus_distance: f64,
}

impl CameraSettings {
    /// Check the camera for degenerate configurations.
    ///
    /// `aspect_ratio` comes from the image size, not from these settings.
    pub fn validate(&self, aspect_ratio: f64) -> ConfigResult<()> {
        if !(aspect_ratio > 0.0) || !aspect_ratio.is_finite() {
            return Err(ConfigError::DegenerateCamera("aspect ratio must be positive"));
        }
        if !(self.vertical_fov_degrees > 0.0 && self.vertical_fov_degrees < 180.0) {
            return Err(ConfigError::DegenerateCamera(
                "vertical field of view must lie in (0, 180) degrees",
            ));
        }
        if !self.lookfrom.is_finite() || !self.lookat.is_finite() || !self.vup.is_finite() {
            return Err(ConfigError::DegenerateCamera("camera vectors must be finite"));
        }

        let view = self.lookfrom - self.lookat;
        if ghd_math::near_zero(view) {
            return Err(ConfigError::DegenerateCamera("lookfrom and lookat coincide"));
        }
        if ghd_math::near_zero(self.vup.cross(view)) {
            return Err(ConfigError::DegenerateCamera(
                "vup is zero or parallel to the view direction",
            ));
        }
        if !(self.aperture >= 0.0) || !self.aperture.is_finite() {
            return Err(ConfigError::DegenerateCamera("aperture must be non-negative"));
        }
        if !(self.focus_distance > 0.0) || !self.focus_distance.is_finite() {
            return Err(ConfigError::DegenerateCamera("focus distance must be positive"));
        }

        Ok(())
    }
}

/// Everything the progressive renderer needs besides the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Image width in pixels
    pub image_width: u32,
    /// Image height in pixels
    pub image_height: u32,
    /// Number of accumulation iterations (one sample per pixel each)
    pub samples_per_pixel: u32,
    /// Maximum number of bounces per path; 0 renders black
    pub max_bounce_depth: u32,
    /// Camera placement and lens
    pub camera: CameraSettings,
    /// Worker count for the row sweep (`None` = one per core)
    #[serde(default)]
    pub threads: Option<usize>,
    /// Base seed for the per-row generators (`None` = fresh seed per reset)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RenderSettings {
    /// Width over height of the output image.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height as f64
    }

    /// Number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.image_width as usize * self.image_height as usize
    }

    /// Reject any configuration the renderer cannot run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::InvalidImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ZeroThreads);
        }
        self.camera.validate(self.aspect_ratio())
    }
}
