//! Hittable trait, HitRecord, and the scene container.

use crate::{Material, Ray, Sphere};
use ghd_core::{ConfigError, ConfigResult, SceneDescription, ShapeDescription};
use ghd_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal.
    ///
    /// The stored normal is flipped when the ray arrives from inside, and
    /// `front_face` records which side was hit.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            material,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// An unordered collection of primitives, queried for the nearest hit.
///
/// Read-only while rendering; rebuilt from a `SceneDescription` on reset.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build the runtime scene, rejecting invalid primitives or materials.
    pub fn from_description(description: &SceneDescription) -> ConfigResult<Self> {
        let mut scene = Scene::new();

        for (index, object) in description.objects.iter().enumerate() {
            let wrap = |source: ConfigError| ConfigError::InvalidObject {
                index,
                source: Box::new(source),
            };

            let material = Material::try_from(&object.material).map_err(wrap)?;
            match object.shape {
                ShapeDescription::Sphere { center, radius } => {
                    let sphere = Sphere::new(center, radius, material).map_err(wrap)?;
                    scene.add(Box::new(sphere));
                }
            }
        }

        Ok(scene)
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
