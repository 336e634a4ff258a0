//! Ray-sphere intersection.

use cgfs_core::{Sphere, StaticScene};
use cgfs_math::{Interval, Ray};

/// Nearest hit along a ray, if any.
///
/// `sphere` is `None` and `t` is `+inf` when the ray hits nothing inside the
/// requested interval.
#[derive(Debug, Clone, Copy)]
pub struct ClosestIntersection<'a> {
    pub sphere: Option<&'a Sphere>,
    pub t: f32,
}

impl<'a> ClosestIntersection<'a> {
    /// No intersection.
    pub const MISS: ClosestIntersection<'static> = ClosestIntersection {
        sphere: None,
        t: f32::INFINITY,
    };

    pub fn is_hit(&self) -> bool {
        self.sphere.is_some()
    }
}

/// Both roots of `|O + tD - C|^2 = r^2`.
///
/// Returns `(+inf, +inf)` when the discriminant is negative. A zero-length
/// direction is not guarded; the resulting NaN roots fail every interval test.
pub fn intersect_ray_sphere(ray: &Ray, sphere: &Sphere) -> (f32, f32) {
    let co = ray.origin - sphere.center;

    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * co.dot(ray.direction);
    let c = co.dot(co) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return (f32::INFINITY, f32::INFINITY);
    }

    let sqrtd = discriminant.sqrt();
    let t1 = (-b + sqrtd) / (2.0 * a);
    let t2 = (-b - sqrtd) / (2.0 * a);
    (t1, t2)
}

/// Find the nearest sphere hit strictly inside `ray_t`.
pub fn closest_intersection<'a>(
    ray: &Ray,
    ray_t: Interval,
    scene: &'a StaticScene,
) -> ClosestIntersection<'a> {
    let mut closest = ClosestIntersection::MISS;

    for sphere in &scene.spheres {
        let (t1, t2) = intersect_ray_sphere(ray, sphere);
        for t in [t1, t2] {
            if ray_t.surrounds(t) && t < closest.t {
                closest = ClosestIntersection {
                    sphere: Some(sphere),
                    t,
                };
            }
        }
    }

    closest
}

/// True if any sphere is hit strictly inside `ray_t`.
///
/// Used for shadow rays, where any blocker is enough.
pub fn is_occluded(ray: &Ray, ray_t: Interval, scene: &StaticScene) -> bool {
    scene.spheres.iter().any(|sphere| {
        let (t1, t2) = intersect_ray_sphere(ray, sphere);
        ray_t.surrounds(t1) || ray_t.surrounds(t2)
    })
}
