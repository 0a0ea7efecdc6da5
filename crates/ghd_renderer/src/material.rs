//! Surface scattering.
//!
//! `Material` is a closed set of variants dispatched by `match`; each
//! variant's `scatter` depends only on the incoming ray, the hit record
//! and the caller's generator.

use crate::{hittable::HitRecord, sampling, Ray};
use ghd_core::{ConfigResult, MaterialDescription};
use ghd_math::{reflect, refract, try_unit_vector, Color};
use rand::RngCore;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Per-channel fraction of the scattered radiance that survives
    pub attenuation: Color,
    /// Continuation ray leaving the surface
    pub scattered: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a diffuse material; albedo components must lie in [0, 1].
    pub fn new(albedo: Color) -> ConfigResult<Self> {
        MaterialDescription::Lambertian { albedo }.validate()?;
        Ok(Self { albedo })
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + sampling::random_unit_vector(rng);

        // Catch degenerate scatter direction
        if ghd_math::near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a metal.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> ConfigResult<Self> {
        MaterialDescription::Metal { albedo, fuzz }.validate()?;
        Ok(Self { albedo, fuzz })
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let unit_direction = try_unit_vector(ray_in.direction())?;
        let reflected = reflect(unit_direction, rec.normal);
        let scattered_dir = reflected + self.fuzz * sampling::random_in_unit_sphere(rng);

        // Fuzzed below the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    refractive_index: f64,
}

impl Dielectric {
    /// Create a dielectric.
    ///
    /// - `refractive_index`: 1.0 = air, 1.5 = glass, 2.4 = diamond
    pub fn new(refractive_index: f64) -> ConfigResult<Self> {
        MaterialDescription::Dielectric { refractive_index }.validate()?;
        Ok(Self { refractive_index })
    }

    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face {
            1.0 / self.refractive_index
        } else {
            self.refractive_index
        };

        let unit_direction = try_unit_vector(ray_in.direction())?;
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        let cannot_refract = refraction_ratio * sin_theta > 1.0;
        let direction = if cannot_refract
            || reflectance(cos_theta, refraction_ratio) > sampling::gen_f64(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Schlick's approximation for reflectance.
pub fn reflectance(cosine: f64, refraction_ratio: f64) -> f64 {
    let r0 = ((1.0 - refraction_ratio) / (1.0 + refraction_ratio)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    pub fn lambertian(albedo: Color) -> ConfigResult<Self> {
        Lambertian::new(albedo).map(Material::Lambertian)
    }

    pub fn metal(albedo: Color, fuzz: f64) -> ConfigResult<Self> {
        Metal::new(albedo, fuzz).map(Material::Metal)
    }

    pub fn dielectric(refractive_index: f64) -> ConfigResult<Self> {
        Dielectric::new(refractive_index).map(Material::Dielectric)
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
        }
    }
}

impl TryFrom<&MaterialDescription> for Material {
    type Error = ghd_core::ConfigError;

    fn try_from(description: &MaterialDescription) -> ConfigResult<Self> {
        match *description {
            MaterialDescription::Lambertian { albedo } => Material::lambertian(albedo),
            MaterialDescription::Metal { albedo, fuzz } => Material::metal(albedo, fuzz),
            MaterialDescription::Dielectric { refractive_index } => {
                Material::dielectric(refractive_index)
            }
        }
    }
}
