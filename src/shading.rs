use crate::config::{FogConfig, LightingConfig};
use crate::geometry::{Fp, Vec3f};
use crate::sdf::SurfaceSample;
use crate::utils::mix;

/// Light geometry seen from one shaded point.
pub struct LightSample {
    /// Unit direction from the light towards the point.
    pub direction: Vec3f,
    pub distance: Fp,
}

impl LightSample {
    pub fn new(light_position: &Vec3f, point: &Vec3f) -> LightSample {
        let offset = point - light_position;
        let distance = offset.norm();
        LightSample {
            direction: offset.try_normalize(Fp::EPSILON).unwrap_or(-Vec3f::y()),
            distance,
        }
    }
}

/// Lambert term with inverse-square falloff, a specular term that is the
/// diffuse term raised to the material exponent, and a flat ambient.
pub fn shade(
    hit: &SurfaceSample,
    normal: &Vec3f,
    light: &LightSample,
    shadow: Fp,
    lighting: &LightingConfig,
) -> Vec3f {
    let material = &hit.material;
    let distance = light.distance.max(lighting.min_light_distance);
    let falloff = lighting.light_intensity / (distance * distance);
    let diffuse =
        Fp::max(0.0, (-light.direction).dot(normal)) * material.diffuse * shadow * falloff;
    let specular = diffuse.powf(material.specular_exponent);
    material.color * (diffuse + specular + lighting.ambient)
}

pub fn fog_factor(traveled: Fp, fog: &FogConfig) -> Fp {
    let depth = Fp::max(traveled - fog.start_distance, 0.0);
    (1.0 - (-fog.density * depth).exp()).clamp(0.0, 1.0)
}

pub fn apply_fog(color: &Vec3f, traveled: Fp, fog: &FogConfig) -> Vec3f {
    if !fog.enabled {
        return *color;
    }
    mix(color, &fog.color(), fog_factor(traveled, fog))
}
