use crate::config::CameraConfig;
use crate::geometry::{Fp, Ray, Vec3f};

/// Elapsed time is wrapped so long runs keep float precision in the orbit.
pub const TIME_WRAP: Fp = 4096.0;

#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3f,
    pub forward: Vec3f,
    pub right: Vec3f,
    pub up: Vec3f,
}

impl Camera {
    /// Camera orbiting the target at fixed radius and height. Phase zero puts
    /// the eye on the +z side of the target.
    pub fn orbit(config: &CameraConfig, time: Fp) -> Camera {
        let phase = (time % TIME_WRAP) * config.orbit_speed;
        let target = config.target();
        let position = target
            + Vec3f::new(
                config.orbit_radius * phase.sin(),
                config.orbit_height,
                config.orbit_radius * phase.cos(),
            );
        Camera::look_at(position, target)
    }

    pub fn look_at(position: Vec3f, target: Vec3f) -> Camera {
        let forward = (target - position).normalize();
        let right = Vec3f::y().cross(&forward).normalize();
        let up = forward.cross(&right);
        Camera {
            position,
            forward,
            right,
            up,
        }
    }

    /// Primary ray through the centre of pixel (`x`, `y`), row 0 on top.
    /// Coordinates are scaled by the image height so pixels stay square.
    pub fn ray_to_pixel(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let w = width as Fp;
        let h = height as Fp;
        let u = (2.0 * (x as Fp + 0.5) - w) / h;
        let v = (h - 2.0 * (y as Fp + 0.5)) / h;
        let direction = self.right * u + self.up * v + self.forward;
        Ray::new(self.position, direction)
    }
}
