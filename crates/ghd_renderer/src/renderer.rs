//! Path integrator and radiance-to-byte conversion.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative bounce loop with an explicit depth budget
//! - A vertical sky gradient as the only light source
//! - Gamma-2 correction on output

use crate::{Color, Hittable, Ray};
use ghd_math::{try_unit_vector, Interval};
use rand::RngCore;

/// Smallest accepted hit distance; keeps scattered rays from
/// re-intersecting the surface they left.
pub const T_MIN: f64 = 0.001;

/// Compute the radiance carried back along `ray`.
///
/// Equivalent to the recursive `attenuation * ray_color(scattered, depth - 1)`
/// formulation, unrolled into a loop so stack use does not grow with
/// `max_depth`. A path ends in one of three ways: it escapes to the sky,
/// it is absorbed (black), or it runs out of bounces (black).
pub fn ray_color(ray: &Ray, world: &dyn Hittable, max_depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..max_depth {
        let Some(rec) = world.hit(&ray, Interval::new(T_MIN, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted, no more light is gathered
    Color::ZERO
}

/// Sky color seen by a ray that escapes the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    // A zero direction cannot come out of the camera or a scatter; treat
    // it as horizontal rather than letting NaN through
    let unit_direction = try_unit_vector(ray.direction()).unwrap_or_default();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Map a channel sum over `iterations` samples to a display byte:
/// `clamp(sqrt(sum / iterations), 0, 1) * 255`.
#[inline]
fn channel_to_byte(sum: f64, iterations: u32) -> u8 {
    let mean = sum / iterations as f64;
    (255.0 * linear_to_gamma(mean).clamp(0.0, 1.0)) as u8
}

/// Convert an accumulated radiance sum to opaque 8-bit RGBA.
///
/// Zero iterations means nothing has been accumulated yet and yields
/// transparent black.
pub fn accumulated_to_rgba(sum: Color, iterations: u32) -> [u8; 4] {
    if iterations == 0 {
        return [0; 4];
    }
    [
        channel_to_byte(sum.x, iterations),
        channel_to_byte(sum.y, iterations),
        channel_to_byte(sum.z, iterations),
        255,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Scene, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn single_sphere_scene(material: Material) -> Scene {
        let mut scene = Scene::new();
        scene.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material).unwrap()));
        scene
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);

        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        assert!((down - Color::ONE).length() < 1e-12);

        let horizontal = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X));
        assert!((horizontal - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_miss_returns_sky_exactly() {
        let scene = single_sphere_scene(Material::lambertian(Color::splat(0.5)).unwrap());
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 1.0, 0.2));
        let color = ray_color(&ray, &scene, 10, &mut rng);

        let unit = ray.direction().normalize();
        let a = 0.5 * (unit.y + 1.0);
        let expected = (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0);
        assert_eq!(color, expected);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let scene = Scene::new();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &scene, 0, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_single_bounce_attenuates_sky() {
        // A mirror facing the camera sends the ray straight back (+Z) into the sky
        let albedo = Color::new(0.8, 0.6, 0.2);
        let scene = single_sphere_scene(Material::metal(albedo, 0.0).unwrap());
        let mut rng = StdRng::seed_from_u64(42);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, &scene, 2, &mut rng);
        let expected = albedo * sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z));
        assert!((color - expected).length() < 1e-12);

        // One bounce is not enough to reach the sky
        assert_eq!(ray_color(&ray, &scene, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_deep_paths_stay_bounded() {
        let scene = single_sphere_scene(Material::lambertian(Color::splat(0.5)).unwrap());
        let mut rng = StdRng::seed_from_u64(7);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..100 {
            let color = ray_color(&ray, &scene, 100_000, &mut rng);
            assert!(color.is_finite());
            assert!(color.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_accumulated_to_rgba() {
        assert_eq!(accumulated_to_rgba(Color::ONE, 0), [0, 0, 0, 0]);

        // Mean 0.25 -> gamma 0.5 -> 127; mean 1.0 -> 255; overshoot clamps
        let sum = Color::new(1.0, 4.0, 40.0);
        assert_eq!(accumulated_to_rgba(sum, 4), [127, 255, 255, 255]);
        assert_eq!(accumulated_to_rgba(Color::ZERO, 3), [0, 0, 0, 255]);
    }
}
