use nalgebra::Vector3;

pub type Fp = f64;
pub type Vec3f = Vector3<Fp>;

/// A marching ray. `direction` is unit length and fixed once built; only
/// `position` moves, and only forward along `direction`.
#[derive(Clone, Debug)]
pub struct Ray {
    pub origin: Vec3f,
    pub direction: Vec3f,
    pub target: Vec3f,
    pub position: Vec3f,
}

impl Ray {
    /// Open-ended ray for primary and reflected marching, which is bounded by
    /// the marching budget instead. `target` is just one unit ahead and is only
    /// meaningful for rays built with [`Ray::towards`].
    pub fn new(origin: Vec3f, direction: Vec3f) -> Ray {
        let direction = direction.normalize();
        Ray {
            origin,
            direction,
            target: origin + direction,
            position: origin,
        }
    }

    /// Ray from `origin` aimed at `target`. The target is kept so secondary
    /// passes can stop short of it.
    pub fn towards(origin: Vec3f, target: Vec3f) -> Ray {
        Ray {
            origin,
            direction: (target - origin).normalize(),
            target,
            position: origin,
        }
    }

    pub fn advance(&mut self, distance: Fp) {
        self.position += self.direction * distance;
    }

    pub fn traveled(&self) -> Fp {
        (self.position - self.origin).norm()
    }

    pub fn distance_to_target(&self) -> Fp {
        (self.target - self.position).norm()
    }
}

pub fn get_reflection_ray(ray: &Vec3f, normal: &Vec3f) -> Vec3f {
    let projection = -ray.dot(normal);
    ray + normal * projection * 2.0
}
