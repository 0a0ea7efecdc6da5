//! Built-in demo scenes.

use clap::ValueEnum;
use ghd_core::{MaterialDescription, SceneDescription};
use ghd_math::{Color, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Scenes available from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// A single diffuse sphere resting on a large ground sphere
    FloorSphere,
    /// Glass, diffuse and metal spheres side by side
    ThreeSpheres,
    /// Red and blue spheres at the edges of a wide field of view
    Fov,
    /// The classic field of small random spheres
    Random,
}

impl ScenePreset {
    /// Build the preset. `seed` only affects `Random`.
    pub fn build(self, seed: u64) -> SceneDescription {
        match self {
            ScenePreset::FloorSphere => floor_sphere(),
            ScenePreset::ThreeSpheres => three_spheres(),
            ScenePreset::Fov => fov(),
            ScenePreset::Random => random(seed),
        }
    }
}

fn lambertian(r: f64, g: f64, b: f64) -> MaterialDescription {
    MaterialDescription::Lambertian {
        albedo: Color::new(r, g, b),
    }
}

fn ground(scene: &mut SceneDescription) {
    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, lambertian(0.5, 0.5, 0.5));
}

fn floor_sphere() -> SceneDescription {
    let mut scene = SceneDescription::new("floor sphere");
    ground(&mut scene);
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, lambertian(0.1, 0.2, 0.5));
    scene
}

fn three_spheres() -> SceneDescription {
    let mut scene = SceneDescription::new("three spheres");
    ground(&mut scene);
    scene
        .add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, MaterialDescription::Dielectric {
            refractive_index: 1.5,
        })
        .add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, lambertian(0.4, 0.2, 0.1))
        .add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, MaterialDescription::Metal {
            albedo: Color::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        });
    scene
}

fn fov() -> SceneDescription {
    let r = std::f64::consts::FRAC_PI_4.cos();
    let mut scene = SceneDescription::new("fov");
    scene
        .add_sphere(Vec3::new(-r, 0.0, -1.0), r, lambertian(0.0, 0.0, 1.0))
        .add_sphere(Vec3::new(r, 0.0, -1.0), r, lambertian(1.0, 0.0, 0.0));
    scene
}

fn random(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scene = three_spheres();
    scene.name = "random".to_string();

    for a in -11..11 {
        for b in -11..11 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                MaterialDescription::Lambertian { albedo }
            } else if choose_mat < 0.95 {
                let albedo = Color::new(
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                    rng.gen_range(0.5..1.0),
                );
                MaterialDescription::Metal {
                    albedo,
                    fuzz: rng.gen_range(0.0..0.5),
                }
            } else {
                MaterialDescription::Dielectric { refractive_index: 1.5 }
            };
            scene.add_sphere(center, 0.2, material);
        }
    }

    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for preset in ScenePreset::value_variants() {
            let scene = preset.build(69);
            assert!(scene.object_count() > 0, "{preset:?} is empty");
            assert_eq!(scene.validate(), Ok(()), "{preset:?} is invalid");
        }
    }

    #[test]
    fn test_random_is_seeded() {
        assert_eq!(random(1), random(1));
        assert!(random(1).object_count() > 4);
    }
}
