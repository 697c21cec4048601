use nalgebra::{UnitQuaternion, Vector3};

use crate::geometry::{Fp, Vec3f};
use crate::material::{BLUE, GREEN, LIGHT_GRAY, MIRROR, RED};
use crate::sdf::{intersect, subtract, union, Object3D, Shape3D, SurfaceSample};

/// The demo scene: a ground plane and four solids, two of them CSG pairs.
///
/// The tree shape is fixed; only the parameters live in data. Nothing is
/// cached between queries, so a `&Scene` can be shared by every render
/// thread.
#[derive(Clone, Debug)]
pub struct Scene {
    pub ground: Object3D,
    pub mirror_sphere: Object3D,
    pub tilted_box: Object3D,
    /// Sphere carved out of the top of `carved_body`.
    pub carve_cutter: Object3D,
    pub carved_body: Object3D,
    /// Sphere and box intersected into a rounded cube.
    pub rounded_sphere: Object3D,
    pub rounded_box: Object3D,
}

impl Default for Scene {
    fn default() -> Self {
        Scene {
            ground: Object3D::new(Shape3D::Plane, Vec3f::zeros(), LIGHT_GRAY),
            mirror_sphere: Object3D::new(
                Shape3D::Sphere { radius: 1.0 },
                Vec3f::new(-2.5, 1.0, 0.0),
                MIRROR,
            ),
            tilted_box: Object3D::new(
                Shape3D::Box {
                    s: Vec3f::new(0.75, 0.75, 0.75),
                },
                Vec3f::new(2.5, 0.75, 0.0),
                RED,
            )
            .rotated(UnitQuaternion::from_axis_angle(
                &Vector3::y_axis(),
                std::f64::consts::FRAC_PI_6,
            )),
            carve_cutter: Object3D::new(
                Shape3D::Sphere { radius: 0.9 },
                Vec3f::new(0.0, 1.6, -3.0),
                GREEN,
            ),
            carved_body: Object3D::new(
                Shape3D::Box {
                    s: Vec3f::new(0.8, 0.8, 0.8),
                },
                Vec3f::new(0.0, 0.8, -3.0),
                BLUE,
            ),
            rounded_sphere: Object3D::new(
                Shape3D::Sphere { radius: 1.0 },
                Vec3f::new(3.0, 0.8, -3.5),
                RED,
            ),
            rounded_box: Object3D::new(
                Shape3D::Box {
                    s: Vec3f::new(0.8, 0.8, 0.8),
                },
                Vec3f::new(3.0, 0.8, -3.5),
                GREEN,
            ),
        }
    }
}

impl Scene {
    pub fn evaluate(&self, point: &Vec3f) -> SurfaceSample {
        let carved = subtract(
            self.carve_cutter.sample(point),
            self.carved_body.sample(point),
        );
        let rounded = intersect(
            self.rounded_sphere.sample(point),
            self.rounded_box.sample(point),
        );
        union(
            self.ground.sample(point),
            union(
                union(self.mirror_sphere.sample(point), self.tilted_box.sample(point)),
                union(carved, rounded),
            ),
        )
    }

    pub fn distance(&self, point: &Vec3f) -> Fp {
        self.evaluate(point).distance
    }
}
