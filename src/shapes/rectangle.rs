// Copyright @yucwang 2026

use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::core::shape::Shape;
use crate::math::aabb::AABB;
use crate::math::constants::{ EPSILON, Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

/// Rectangle spanned by two orthogonal half-edges around its center. The
/// normal is `normalize(half_u x half_v)`; hits are reported on both sides.
pub struct Rectangle {
    center: Vector3f,
    half_u: Vector3f,
    half_v: Vector3f,
    normal: Vector3f,
    area: Float,
    inv_area: Float,
}

impl Rectangle {
    pub fn new(center: Vector3f, half_u: Vector3f, half_v: Vector3f) -> Self {
        let cross = half_u.cross(&half_v);
        let area = 4.0 * cross.norm();
        let inv_area = if area > 0.0 { 1.0 / area } else { 0.0 };
        let normal = if area > 0.0 { cross.normalize() } else { Vector3f::new(0.0, 0.0, 1.0) };

        Self { center, half_u, half_v, normal, area, inv_area }
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    // Parametric distance and (u, v) in [-1, 1]^2.
    fn intersect_local(&self, ray: &Ray3f) -> Option<(Float, Float, Float)> {
        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = self.normal.dot(&(self.center - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let local = ray.at(t) - self.center;
        let a = local.dot(&self.half_u) / self.half_u.norm_squared();
        let b = local.dot(&self.half_v) / self.half_v.norm_squared();
        if a.abs() > 1.0 || b.abs() > 1.0 {
            return None;
        }

        Some((t, a, b))
    }
}

impl Shape for Rectangle {
    fn bounding_box(&self) -> AABB {
        let mut bbox = AABB::default();
        for (su, sv) in &[(-1.0, -1.0), (-1.0, 1.0), (1.0, -1.0), (1.0, 1.0)] {
            let p = self.center + self.half_u * *su + self.half_v * *sv;
            bbox.expand_by_point(&p);
        }
        // Keep flat boxes from collapsing to zero thickness.
        let pad = Vector3f::new(EPSILON, EPSILON, EPSILON);
        AABB::new(bbox.p_min - pad, bbox.p_max + pad)
    }

    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let (t, a, b) = self.intersect_local(ray)?;
        let uv = Vector2f::new(0.5 * (a + 1.0), 0.5 * (b + 1.0));

        Some(SurfaceIntersection::new(ray.at(t), self.normal, self.normal, uv, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_local(ray).is_some()
    }

    fn sample(&self, u: &Vector2f, _u1: Float) -> SurfaceSampleRecord {
        let p = self.center
            + self.half_u * (2.0 * u.x - 1.0)
            + self.half_v * (2.0 * u.y - 1.0);
        SurfaceSampleRecord::new(p, self.normal, self.inv_area)
    }

    fn surface_area(&self) -> Float {
        self.area
    }

    fn describe(&self) -> String {
        format!("Rectangle[center = {:?}, normal = {:?}, area = {}]", self.center, self.normal, self.area)
    }
}
