//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ghd_core::{ConfigError, ConfigResult};
use ghd_math::{Interval, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f64, material: Material) -> ConfigResult<Self> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(ConfigError::InvalidRadius(radius));
        }
        if !center.is_finite() {
            return Err(ConfigError::NonFiniteCenter);
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghd_math::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Material::lambertian(Color::splat(0.5)).unwrap()).unwrap()
    }

    #[test]
    fn test_sphere_hit_head_on() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        let rec = sphere
            .hit(&ray, Interval::new(0.001, f64::INFINITY))
            .expect("ray should hit the sphere");

        assert!((rec.t - 4.0).abs() < 1e-12);
        assert!((rec.p - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        // Normal is flipped to face the ray
        assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());

        // Sphere entirely behind the origin
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_sphere_rejects_bad_radius() {
        let material = Material::lambertian(Color::ONE).unwrap();
        assert_eq!(
            Sphere::new(Vec3::ZERO, 0.0, material).err(),
            Some(ConfigError::InvalidRadius(0.0))
        );
        assert_eq!(
            Sphere::new(Vec3::ZERO, -2.0, material).err(),
            Some(ConfigError::InvalidRadius(-2.0))
        );
    }
}
