// Copyright @yucwang 2026

use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, INV_PI, INV_TWO_PI, PI, Vector2f, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::warp::square_to_uniform_sphere;

pub struct Sphere {
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius: radius.abs() }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    // Both roots of |o + t d - c|^2 = r^2, nearest first.
    fn roots(&self, ray: &Ray3f) -> Option<(Float, Float)> {
        let oc = ray.origin() - self.center;
        let d = ray.dir();
        let b = oc.dot(&d);
        let c = oc.dot(&oc) - self.radius * self.radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let s = disc.sqrt();
        Some((-b - s, -b + s))
    }

    fn nearest_t(&self, ray: &Ray3f) -> Option<Float> {
        let (t0, t1) = self.roots(ray)?;
        if ray.test_segment(t0) {
            Some(t0)
        } else if ray.test_segment(t1) {
            Some(t1)
        } else {
            None
        }
    }
}

impl Shape for Sphere {
    fn bounding_box(&self) -> AABB {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        AABB::new(self.center - r, self.center + r)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.nearest_t(ray)?;
        let p = ray.at(t);
        let n = (p - self.center) / self.radius;

        let mut phi = n.y.atan2(n.x);
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        let theta = n.z.max(-1.0).min(1.0).acos();
        let uv = Vector2f::new(phi * INV_TWO_PI, theta * INV_PI);

        Some(SurfaceIntersection::new(p, n, n, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.nearest_t(ray).is_some()
    }

    fn sample(&self, u: &Vector2f, _u1: Float) -> SurfaceSampleRecord {
        let n = square_to_uniform_sphere(u);
        let p = self.center + n * self.radius;
        SurfaceSampleRecord::new(p, n, 1.0 / self.surface_area())
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    fn describe(&self) -> String {
        format!("Sphere[center = {:?}, radius = {}]", self.center, self.radius)
    }
}
