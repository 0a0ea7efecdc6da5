//! Thin-lens camera for primary ray generation.

use crate::{sampling, Ray};
use ghd_core::{CameraSettings, ConfigResult};
use ghd_math::Vec3;
use rand::RngCore;

/// Camera mapping normalized screen coordinates to world-space rays.
///
/// All derived quantities are computed once in [`Camera::new`]; a
/// settings change means building a new camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Orthonormal basis: u right, v up, w backwards (away from lookat)
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Build a camera, rejecting degenerate settings.
    pub fn new(settings: &CameraSettings, aspect_ratio: f64) -> ConfigResult<Self> {
        settings.validate(aspect_ratio)?;

        let theta = settings.vertical_fov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = aspect_ratio * viewport_height;

        // Validation guarantees neither of these is near zero
        let w = (settings.lookfrom - settings.lookat).normalize();
        let u = settings.vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = settings.lookfrom;
        let focus = settings.focus_distance;
        let horizontal = focus * viewport_width * u;
        let vertical = focus * viewport_height * v;
        let lower_left_corner = origin - horizontal / 2.0 - vertical / 2.0 - focus * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        })
    }

    /// Generate the ray through screen position `(s, t)`.
    ///
    /// `(0, 0)` is the lower-left corner of the viewport and `(1, 1)` the
    /// upper-right. With a non-zero aperture the origin is jittered over
    /// the lens disk; every such ray still passes through the same point
    /// on the focus plane.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius <= 0.0 {
            Vec3::ZERO
        } else {
            let rd = self.lens_radius * sampling::random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        };

        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin + offset, target - self.origin - offset)
    }

    /// Eye position.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit vector pointing from the scene back towards the eye.
    pub fn w(&self) -> Vec3 {
        self.w
    }

    pub fn lens_radius(&self) -> f64 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghd_core::ConfigError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn settings(aperture: f64) -> CameraSettings {
        CameraSettings {
            lookfrom: Vec3::new(13.0, 2.0, 3.0),
            lookat: Vec3::ZERO,
            vup: Vec3::Y,
            vertical_fov_degrees: 20.0,
            aperture,
            focus_distance: 10.0,
        }
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(&settings(0.0), 16.0 / 9.0).unwrap();

        let expected_w = Vec3::new(13.0, 2.0, 3.0).normalize();
        assert!((camera.w() - expected_w).length() < 1e-12);
        assert!(camera.u.dot(camera.v).abs() < 1e-12);
        assert!(camera.u.dot(camera.w).abs() < 1e-12);
        assert!((camera.v.length() - 1.0).abs() < 1e-12);
        assert_eq!(camera.lens_radius(), 0.0);
    }

    #[test]
    fn test_center_ray_points_at_lookat() {
        let camera = Camera::new(&settings(0.0), 1.5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), camera.origin());

        let expected = (Vec3::ZERO - Vec3::new(13.0, 2.0, 3.0)).normalize();
        assert!((ray.direction().normalize() - expected).length() < 1e-12);
    }

    #[test]
    fn test_corner_orientation() {
        let camera = Camera::new(
            &CameraSettings {
                lookfrom: Vec3::ZERO,
                lookat: Vec3::new(0.0, 0.0, -1.0),
                vup: Vec3::Y,
                vertical_fov_degrees: 90.0,
                aperture: 0.0,
                focus_distance: 1.0,
            },
            2.0,
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let lower_left = camera.get_ray(0.0, 0.0, &mut rng).direction();
        assert!((lower_left - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-12);

        let upper_right = camera.get_ray(1.0, 1.0, &mut rng).direction();
        assert!((upper_right - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_lens_rays_share_focus_point() {
        let camera = Camera::new(&settings(2.0), 1.0).unwrap();
        assert_eq!(camera.lens_radius(), 1.0);

        let mut rng = StdRng::seed_from_u64(5);
        let first = camera.get_ray(0.3, 0.7, &mut rng);
        for _ in 0..100 {
            let ray = camera.get_ray(0.3, 0.7, &mut rng);

            let offset = ray.origin() - camera.origin();
            assert!(offset.length() < 1.0 + 1e-12);
            assert!(offset.dot(camera.w()).abs() < 1e-9);

            // Every lens sample converges on the same focus-plane point
            assert!((ray.at(1.0) - first.at(1.0)).length() < 1e-9);
        }
    }

    #[test]
    fn test_degenerate_configuration_rejected() {
        let mut coincident = settings(0.1);
        coincident.lookat = coincident.lookfrom;
        assert!(matches!(
            Camera::new(&coincident, 1.0),
            Err(ConfigError::DegenerateCamera(_))
        ));

        let mut no_fov = settings(0.1);
        no_fov.vertical_fov_degrees = -10.0;
        assert!(matches!(Camera::new(&no_fov, 1.0), Err(ConfigError::DegenerateCamera(_))));

        assert!(matches!(
            Camera::new(&settings(0.1), 0.0),
            Err(ConfigError::DegenerateCamera(_))
        ));
    }
}
