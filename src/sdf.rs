use nalgebra::UnitQuaternion;

use crate::geometry::{Fp, Vec3f};
use crate::material::Material;

/// Nearest-surface distance at a point, together with the material of that
/// surface. Negative inside a solid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    pub material: Material,
    pub distance: Fp,
}

impl SurfaceSample {
    /// Sentinel returned when marching gives up. The distance is a marker and
    /// must not be read as a length.
    pub fn miss(background: Material) -> SurfaceSample {
        SurfaceSample {
            material: background,
            distance: Fp::INFINITY,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.distance == Fp::INFINITY
    }
}

#[derive(Clone, Debug)]
pub enum Shape3D {
    Plane,
    Sphere { radius: Fp },
    Box { s: Vec3f },
}

impl Shape3D {
    /// Distance from the shape to a local point. The local point is the
    /// offset from the query point to the shape anchor, so the plane below
    /// the anchor reads as `-p.y`.
    pub fn distance(&self, local: &Vec3f) -> Fp {
        match self {
            Shape3D::Plane => -local.y,
            Shape3D::Sphere { radius } => local.norm() - radius,
            Shape3D::Box { s } => {
                let q = local.abs() - s;
                // outside part plus the (non-positive) depth below the nearest face
                q.sup(&Vec3f::zeros()).norm() + q.max().min(0.0)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Object3D {
    pub shape: Shape3D,
    pub position: Vec3f,
    pub rotation: UnitQuaternion<Fp>,
    pub material: Material,
}

impl Object3D {
    pub fn new(shape: Shape3D, position: Vec3f, material: Material) -> Object3D {
        Object3D {
            shape,
            position,
            rotation: UnitQuaternion::identity(),
            material,
        }
    }

    pub fn rotated(mut self, rotation: UnitQuaternion<Fp>) -> Object3D {
        self.rotation = rotation;
        self
    }

    pub fn sample(&self, point: &Vec3f) -> SurfaceSample {
        let local = self
            .rotation
            .conjugate()
            .transform_vector(&(self.position - point));
        SurfaceSample {
            material: self.material,
            distance: self.shape.distance(&local),
        }
    }
}

pub fn union(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    if a.distance < b.distance {
        a
    } else {
        b
    }
}

pub fn intersect(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    if a.distance > b.distance {
        a
    } else {
        b
    }
}

/// Carves `a` out of `b`. Near the cut the bound under-approximates the real
/// distance, which is safe for marching.
pub fn subtract(a: SurfaceSample, b: SurfaceSample) -> SurfaceSample {
    if -a.distance > b.distance {
        SurfaceSample {
            material: a.material,
            distance: -a.distance,
        }
    } else {
        b
    }
}
