//! Scene descriptors.
//!
//! A `SceneDescription` is what the scene-construction collaborator hands
//! over: an ordered list of primitives, each with its material parameters.
//! The renderer turns it into its own runtime scene on `reset()`.

use ghd_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Material parameters for one primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDescription {
    /// Ideal diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` 0 is a perfect mirror
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive surface (glass, water)
    Dielectric { refractive_index: f64 },
}

impl MaterialDescription {
    /// Check albedo, fuzz and refractive index ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        match self {
            MaterialDescription::Lambertian { albedo } => validate_albedo(*albedo),
            MaterialDescription::Metal { albedo, fuzz } => {
                validate_albedo(*albedo)?;
                if !(0.0..=1.0).contains(fuzz) {
                    return Err(ConfigError::InvalidFuzz(*fuzz));
                }
                Ok(())
            }
            MaterialDescription::Dielectric { refractive_index } => {
                if !(*refractive_index > 0.0) || !refractive_index.is_finite() {
                    return Err(ConfigError::InvalidRefractiveIndex(*refractive_index));
                }
                Ok(())
            }
        }
    }
}

fn validate_albedo(albedo: Color) -> ConfigResult<()> {
    let in_range = |c: f64| (0.0..=1.0).contains(&c);
    if in_range(albedo.x) && in_range(albedo.y) && in_range(albedo.z) {
        Ok(())
    } else {
        Err(ConfigError::InvalidAlbedo {
            r: albedo.x,
            g: albedo.y,
            b: albedo.z,
        })
    }
}

/// Geometry of one primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDescription {
    Sphere { center: Vec3, radius: f64 },
}

impl ShapeDescription {
    /// Check the geometric parameters.
    pub fn validate(&self) -> ConfigResult<()> {
        match self {
            ShapeDescription::Sphere { center, radius } => {
                if !(*radius > 0.0) || !radius.is_finite() {
                    return Err(ConfigError::InvalidRadius(*radius));
                }
                if !center.is_finite() {
                    return Err(ConfigError::NonFiniteCenter);
                }
                Ok(())
            }
        }
    }
}

/// A primitive paired with its material.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescription {
    pub shape: ShapeDescription,
    pub material: MaterialDescription,
}

impl ObjectDescription {
    pub fn validate(&self) -> ConfigResult<()> {
        self.shape.validate()?;
        self.material.validate()
    }
}

/// Ordered set of primitives making up a scene.
///
/// Order only affects intersection tie-breaks, never the rendered result.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    /// Human-readable scene name (for logging)
    #[serde(default)]
    pub name: String,
    /// Primitives in insertion order
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Create a new empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: ObjectDescription) -> &mut Self {
        self.objects.push(object);
        self
    }

    /// Add a sphere with the given material.
    pub fn add_sphere(&mut self, center: Vec3, radius: f64, material: MaterialDescription) -> &mut Self {
        self.add_object(ObjectDescription {
            shape: ShapeDescription::Sphere { center, radius },
            material,
        })
    }

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Validate every object, reporting the first bad one by index.
    pub fn validate(&self) -> ConfigResult<()> {
        for (index, object) in self.objects.iter().enumerate() {
            object.validate().map_err(|source| ConfigError::InvalidObject {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey() -> MaterialDescription {
        MaterialDescription::Lambertian {
            albedo: Color::splat(0.5),
        }
    }

    #[test]
    fn test_scene_creation() {
        let mut scene = SceneDescription::new("test");
        scene
            .add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, grey())
            .add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialDescription::Dielectric {
                refractive_index: 1.5,
            });

        assert_eq!(scene.name, "test");
        assert_eq!(scene.object_count(), 2);
        assert_eq!(scene.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let mut scene = SceneDescription::new("bad");
        scene.add_sphere(Vec3::ZERO, 1.0, grey());
        scene.add_sphere(Vec3::ZERO, 0.0, grey());

        match scene.validate() {
            Err(ConfigError::InvalidObject { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(*source, ConfigError::InvalidRadius(0.0));
            }
            other => panic!("expected InvalidObject, got {other:?}"),
        }
    }

    #[test]
    fn test_material_ranges() {
        let albedo = Color::new(0.5, 1.5, 0.5);
        assert!(matches!(
            MaterialDescription::Lambertian { albedo }.validate(),
            Err(ConfigError::InvalidAlbedo { .. })
        ));
        assert_eq!(
            MaterialDescription::Metal { albedo: Color::ONE, fuzz: 1.2 }.validate(),
            Err(ConfigError::InvalidFuzz(1.2))
        );
        assert_eq!(
            MaterialDescription::Dielectric { refractive_index: 0.0 }.validate(),
            Err(ConfigError::InvalidRefractiveIndex(0.0))
        );
        assert!(MaterialDescription::Metal { albedo: Color::ONE, fuzz: 0.0 }
            .validate()
            .is_ok());
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "name": "json",
            "objects": [
                {
                    "shape": { "type": "sphere", "center": [0.0, 0.0, -1.0], "radius": 0.5 },
                    "material": { "type": "metal", "albedo": [0.8, 0.6, 0.2], "fuzz": 0.3 }
                }
            ]
        }"#;
        let scene: SceneDescription = serde_json::from_str(json).unwrap();
        assert_eq!(scene.object_count(), 1);
        assert!(matches!(
            scene.objects[0].material,
            MaterialDescription::Metal { fuzz, .. } if fuzz == 0.3
        ));
    }
}
