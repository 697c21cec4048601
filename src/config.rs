//! Render settings. Every tunable constant of the marcher, the shader and the
//! camera lives here; the core reads them and never mutates them.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::{Fp, Vec3f};

/// Upper bound on `reflections.max_bounces`; keeps the per-pixel cost bounded.
pub const MAX_BOUNCES: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub gamma: Fp,
    pub camera: CameraConfig,
    pub marching: MarchingConfig,
    pub shadow: ShadowConfig,
    pub lighting: LightingConfig,
    pub reflections: ReflectionConfig,
    pub fog: FogConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Radians per second.
    pub orbit_speed: Fp,
    pub orbit_radius: Fp,
    pub orbit_height: Fp,
    pub target: [Fp; 3],
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MarchingConfig {
    pub max_distance: Fp,
    pub hit_epsilon: Fp,
    /// Finite-difference offset for normals. Smaller values sharpen the seams
    /// along CSG cuts.
    pub normal_epsilon: Fp,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShadowMode {
    Hard,
    Soft,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    pub mode: ShadowMode,
    pub hardness: Fp,
    pub step_threshold: Fp,
    pub max_steps: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub light_position: [Fp; 3],
    pub light_intensity: Fp,
    pub ambient: Fp,
    pub min_light_distance: Fp,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    pub max_bounces: u32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub enabled: bool,
    pub start_distance: Fp,
    pub density: Fp,
    pub color: [Fp; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            gamma: 2.2,
            camera: CameraConfig::default(),
            marching: MarchingConfig::default(),
            shadow: ShadowConfig::default(),
            lighting: LightingConfig::default(),
            reflections: ReflectionConfig::default(),
            fog: FogConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_speed: 0.3,
            orbit_radius: 6.0,
            orbit_height: 3.0,
            target: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for MarchingConfig {
    fn default() -> Self {
        Self {
            max_distance: 100.0,
            hit_epsilon: 0.001,
            normal_epsilon: 0.0005,
        }
    }
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            mode: ShadowMode::Soft,
            hardness: 16.0,
            step_threshold: 0.02,
            max_steps: 256,
        }
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: [1.0, 6.0, 3.0],
            light_intensity: 40.0,
            ambient: 0.1,
            min_light_distance: 0.01,
        }
    }
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self { max_bounces: 3 }
    }
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            start_distance: 12.0,
            density: 0.08,
            color: [0.6, 0.7, 0.8],
        }
    }
}

fn vec3(v: [Fp; 3]) -> Vec3f {
    Vec3f::new(v[0], v[1], v[2])
}

impl CameraConfig {
    pub fn target(&self) -> Vec3f {
        vec3(self.target)
    }
}

impl LightingConfig {
    pub fn light_position(&self) -> Vec3f {
        vec3(self.light_position)
    }
}

impl FogConfig {
    pub fn color(&self) -> Vec3f {
        vec3(self.color)
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> Result<RenderConfig, ConfigError> {
        let content = fs::read_to_string(path)?;
        RenderConfig::parse(&content)
    }

    pub fn parse(content: &str) -> Result<RenderConfig, ConfigError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (self.width > 0 && self.height > 0, "resolution must be non-zero"),
            (self.gamma > 0.0, "gamma must be positive"),
            (self.camera.orbit_radius > 0.0, "camera.orbit_radius must be positive"),
            (self.marching.max_distance > 0.0, "marching.max_distance must be positive"),
            (self.marching.hit_epsilon > 0.0, "marching.hit_epsilon must be positive"),
            (self.marching.normal_epsilon > 0.0, "marching.normal_epsilon must be positive"),
            (self.shadow.step_threshold > 0.0, "shadow.step_threshold must be positive"),
            (self.shadow.max_steps > 0, "shadow.max_steps must be non-zero"),
            (self.shadow.hardness > 0.0, "shadow.hardness must be positive"),
            (self.lighting.light_intensity >= 0.0, "lighting.light_intensity must not be negative"),
            (self.lighting.ambient >= 0.0, "lighting.ambient must not be negative"),
            (self.lighting.min_light_distance > 0.0, "lighting.min_light_distance must be positive"),
            (self.fog.density >= 0.0, "fog.density must not be negative"),
            (self.reflections.max_bounces <= MAX_BOUNCES, "reflections.max_bounces must be at most 64"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(ConfigError::Invalid(message.to_string())),
            None => Ok(()),
        }
    }
}
