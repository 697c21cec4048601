use crate::geometry::{Fp, Vec3f};

/// Surface response of a scene object. Plain value, copied freely between
/// samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Vec3f,
    pub diffuse: Fp,
    pub specular_exponent: Fp,
    pub reflectivity: Fp,
}

impl Material {
    pub const fn new(color: [Fp; 3], diffuse: Fp, specular_exponent: Fp, reflectivity: Fp) -> Material {
        Material {
            color: Vec3f::new(color[0], color[1], color[2]),
            diffuse,
            specular_exponent,
            reflectivity,
        }
    }

    /// Tag for rays that escaped the scene. Never lit, never reflects.
    pub fn background(color: Vec3f) -> Material {
        Material {
            color,
            diffuse: 0.0,
            specular_exponent: 1.0,
            reflectivity: 0.0,
        }
    }
}

pub const LIGHT_GRAY: Material = Material::new([0.8, 0.8, 0.8], 0.9, 8.0, 0.2);
pub const RED: Material = Material::new([0.9, 0.2, 0.2], 1.0, 16.0, 0.1);
pub const GREEN: Material = Material::new([0.2, 0.8, 0.3], 1.0, 32.0, 0.0);
pub const BLUE: Material = Material::new([0.2, 0.3, 0.9], 0.8, 16.0, 0.3);
pub const MIRROR: Material = Material::new([0.9, 0.9, 0.9], 0.4, 64.0, 0.8);
