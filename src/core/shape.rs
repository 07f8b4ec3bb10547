// Copyright @yucwang 2023

use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector2f };
use crate::math::ray::Ray3f;

pub trait Shape: Send + Sync {
    fn bounding_box(&self) -> AABB;
    /// Closest hit inside `[ray.min_t, ray.max_t]`.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;
    /// Any hit inside the segment; used for shadow rays.
    fn ray_intersection_t(&self, ray: &Ray3f) -> bool;
    /// Point drawn uniformly over the surface, density per unit area.
    fn sample(&self, u: &Vector2f, u1: Float) -> SurfaceSampleRecord;
    fn surface_area(&self) -> Float;
    fn describe(&self) -> String {
        String::from("Shape")
    }
}
