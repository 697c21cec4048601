use crate::geometry::{Fp, Vec3f};

/// GLSL-style `mix`: `a` at `t = 0`, `b` at `t = 1`.
pub fn mix(a: &Vec3f, b: &Vec3f, t: Fp) -> Vec3f {
    a * (1.0 - t) + b * t
}

// non-finite channels become black rather than poisoning the frame
pub fn clamp01(color: &Vec3f) -> Vec3f {
    color.map(|c| if c.is_finite() { c.clamp(0.0, 1.0) } else { 0.0 })
}

pub fn gamma_encode(color: &Vec3f, gamma: Fp) -> Vec3f {
    clamp01(color).map(|c| c.powf(1.0 / gamma))
}
