use crate::config::{MarchingConfig, ShadowConfig, ShadowMode};
use crate::geometry::{Fp, Ray, Vec3f};
use crate::material::Material;
use crate::scene::Scene;
use crate::sdf::SurfaceSample;

/// Sphere-traces `ray` through the scene, leaving `ray.position` at the last
/// evaluated point.
///
/// Stops on the first sample closer than `hit_epsilon`. When less than
/// `hit_epsilon` of the `max_distance` budget is left the ray is a miss
/// tagged with `background`. The last step is clipped to the budget, and
/// every other non-hit step is at least `hit_epsilon` long, so the loop runs
/// at most `max_distance / hit_epsilon` times.
pub fn trace(
    ray: &mut Ray,
    scene: &Scene,
    config: &MarchingConfig,
    background: Material,
) -> SurfaceSample {
    loop {
        let remaining = config.max_distance - ray.traveled();
        if remaining < config.hit_epsilon {
            return SurfaceSample::miss(background);
        }
        let sample = scene.evaluate(&ray.position);
        if sample.distance < config.hit_epsilon {
            return sample;
        }
        ray.advance(sample.distance.min(remaining));
    }
}

/// Central-difference gradient of the field. At non-differentiable CSG seams
/// the gradient may degenerate; it is still finite and gets normalized as is.
pub fn estimate_normal(point: &Vec3f, scene: &Scene, epsilon: Fp) -> Vec3f {
    let dx = Vec3f::new(epsilon, 0.0, 0.0);
    let dy = Vec3f::new(0.0, epsilon, 0.0);
    let dz = Vec3f::new(0.0, 0.0, epsilon);
    let gradient = Vec3f::new(
        scene.distance(&(point + dx)) - scene.distance(&(point - dx)),
        scene.distance(&(point + dy)) - scene.distance(&(point - dy)),
        scene.distance(&(point + dz)) - scene.distance(&(point - dz)),
    );
    gradient.try_normalize(Fp::EPSILON).unwrap_or(Vec3f::y())
}

/// Occlusion along `light_ray` from its origin up to its target: 0 when
/// blocked, otherwise the penumbra estimate (always 1 in hard mode).
///
/// The penumbra is the running minimum of `hardness * step / distance to
/// target`, a deliberately rough heuristic.
pub fn soft_shadow(
    light_ray: &mut Ray,
    scene: &Scene,
    shadow: &ShadowConfig,
    hit_epsilon: Fp,
) -> Fp {
    let mut penumbra: Fp = 1.0;
    for _ in 0..shadow.max_steps {
        let remaining = light_ray.distance_to_target();
        if remaining <= 2.0 * hit_epsilon {
            break;
        }
        let distance = scene.distance(&light_ray.position);
        if distance < hit_epsilon {
            return 0.0;
        }
        if shadow.mode == ShadowMode::Soft {
            penumbra = penumbra.min(shadow.hardness * distance / remaining);
        }
        let step = if distance > shadow.step_threshold {
            distance
        } else {
            shadow.step_threshold
        };
        // never step past the target
        light_ray.advance(step.min(remaining));
    }
    penumbra
}
