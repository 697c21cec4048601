use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::geometry::{get_reflection_ray, Fp, Ray, Vec3f};
use crate::marching::{estimate_normal, soft_shadow, trace};
use crate::material::Material;
use crate::scene::Scene;
use crate::shading::{apply_fog, shade, LightSample};
use crate::utils::{gamma_encode, mix};

/// Caps the bounce offset for grazing reflections at 20 hit epsilons.
const MIN_BOUNCE_COSINE: Fp = 0.05;

/// One bounce of the reflection loop.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub color: Vec3f,
    pub reflectivity: Fp,
}

/// RGBA frame, row major, top row first. Channels are gamma encoded and in
/// [0, 1].
#[derive(Clone, Debug)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[f32; 4]>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y * self.width + x) as usize]
    }
}

/// Colour of the first surface along `ray`, fogged by how far the ray went.
/// `None` when the ray escapes; the ray position and the hit normal are left
/// for the caller.
fn shade_hit(ray: &mut Ray, scene: &Scene, config: &RenderConfig) -> Option<(Vec3f, Material, Vec3f)> {
    let background = Material::background(config.fog.color());
    let hit = trace(ray, scene, &config.marching, background);
    if hit.is_miss() {
        return None;
    }
    let point = ray.position;
    let normal = estimate_normal(&point, scene, config.marching.normal_epsilon);

    let light_position = config.lighting.light_position();
    let light = LightSample::new(&light_position, &point);
    let lifted = point + normal * config.shadow.step_threshold;
    let mut light_ray = Ray::towards(light_position, lifted);
    let shadow = soft_shadow(
        &mut light_ray,
        scene,
        &config.shadow,
        config.marching.hit_epsilon,
    );

    let color = shade(&hit, &normal, &light, shadow, &config.lighting);
    let color = apply_fog(&color, ray.traveled(), &config.fog);
    Some((color, hit.material, normal))
}

/// Runs the bounce loop. Layers are pushed only for bounces that actually
/// happened; a miss adds a background layer and ends the loop.
pub fn collect_layers(primary: Ray, scene: &Scene, config: &RenderConfig) -> Vec<Layer> {
    let mut layers = Vec::new();
    let mut ray = primary;
    for _ in 0..=config.reflections.max_bounces {
        match shade_hit(&mut ray, scene, config) {
            Some((color, material, normal)) => {
                layers.push(Layer {
                    color,
                    reflectivity: material.reflectivity,
                });
                let direction = get_reflection_ray(&ray.direction, &normal);
                // one hit epsilon of clearance measured along the normal
                let lift = direction.dot(&normal).max(MIN_BOUNCE_COSINE);
                let origin = ray.position + direction * (config.marching.hit_epsilon / lift);
                ray = Ray::new(origin, direction);
            }
            None => {
                layers.push(Layer {
                    color: config.fog.color(),
                    reflectivity: 0.0,
                });
                break;
            }
        }
    }
    layers
}

/// Folds layers from the farthest bounce back to the eye. A layer's
/// reflectivity is how much of what lies behind it shows through.
pub fn composite(layers: &[Layer]) -> Vec3f {
    let Some((last, nearer)) = layers.split_last() else {
        return Vec3f::zeros();
    };
    nearer.iter().rev().fold(last.color, |result, layer| {
        mix(&layer.color, &result, layer.reflectivity)
    })
}

/// Linear colour of one primary ray, before gamma.
pub fn render_ray(primary: Ray, scene: &Scene, config: &RenderConfig) -> Vec3f {
    composite(&collect_layers(primary, scene, config))
}

pub fn render_pixel(
    x: u32,
    y: u32,
    camera: &Camera,
    scene: &Scene,
    config: &RenderConfig,
) -> [f32; 4] {
    let ray = camera.ray_to_pixel(x, y, config.width, config.height);
    let linear = render_ray(ray, scene, config);
    if !linear.iter().all(|c| c.is_finite()) {
        log::trace!("non-finite colour at ({x}, {y}): {linear:?}");
    }
    let color = gamma_encode(&linear, config.gamma);
    [color.x as f32, color.y as f32, color.z as f32, 1.0]
}

fn render_row(y: u32, camera: &Camera, scene: &Scene, config: &RenderConfig) -> Vec<[f32; 4]> {
    (0..config.width)
        .map(|x| render_pixel(x, y, camera, scene, config))
        .collect()
}

/// Renders the whole frame at `time`, one rayon task per row.
pub fn render_frame(scene: &Scene, config: &RenderConfig, time: Fp, progress: bool) -> Frame {
    let camera = Camera::orbit(&config.camera, time);
    log::debug!("camera at t={time:.3}: {:?}", camera);

    let rows = (0..config.height).into_par_iter();
    let pixels: Vec<Vec<[f32; 4]>> = if progress {
        let bar = ProgressBar::new(config.height as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} rows [{elapsed}]") {
            bar.set_style(style);
        }
        let result = rows
            .progress_with(bar.clone())
            .map(|y| render_row(y, &camera, scene, config))
            .collect();
        bar.finish_and_clear();
        result
    } else {
        rows.map(|y| render_row(y, &camera, scene, config)).collect()
    };

    Frame {
        width: config.width,
        height: config.height,
        pixels: pixels.into_iter().flatten().collect(),
    }
}
