// Copyright @yucwang 2026

use crate::core::sensor::Sensor;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

pub struct PerspectiveCamera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    near_clip: Float,
    far_clip: Float,
    width: usize,
    height: usize,
}

impl PerspectiveCamera {
    /// Looks from `origin` at `target`; the aspect ratio follows the film size.
    pub fn new(origin: Vector3f,
               target: Vector3f,
               up: Vector3f,
               fov_y_radians: Float,
               width: usize,
               height: usize) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward).normalize();
        let aspect = if height > 0 { width as Float / height as Float } else { 1.0 };

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y_radians).tan(),
            aspect,
            near_clip: 1e-4,
            far_clip: 1e4,
            width,
            height,
        }
    }

    pub fn with_clip(mut self, near_clip: Float, far_clip: Float) -> Self {
        self.near_clip = near_clip;
        self.far_clip = far_clip;
        self
    }
}

impl Sensor for PerspectiveCamera {
    fn sample_ray(&self, u: &Vector2f) -> Ray3f {
        let px = (2.0 * u.x - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * u.y) * self.tan_half_fov_y;

        let d_camera = Vector3f::new(px, py, 1.0).normalize();
        let dir = self.right * d_camera.x + self.up * d_camera.y + self.forward * d_camera.z;

        // Clip planes are perpendicular to the viewing axis.
        let inv_z = 1.0 / d_camera.z;
        Ray3f::new(self.origin, dir, Some(self.near_clip * inv_z), Some(self.far_clip * inv_z))
    }

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn describe(&self) -> String {
        format!("PerspectiveCamera[origin = {:?}, forward = {:?}, fov_y = {:.1} deg, film = {}x{}]",
                self.origin, self.forward,
                2.0 * self.tan_half_fov_y.atan().to_degrees(),
                self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let origin = Vector3f::new(0.0, 0.0, 0.0);
        let target = Vector3f::new(0.0, 0.0, -1.0);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        PerspectiveCamera::new(origin, target, up, std::f32::consts::FRAC_PI_2, 4, 4)
    }

    #[test]
    fn test_perspective_camera_center_ray() {
        let cam = camera();
        let ray = cam.sample_ray(&Vector2f::new(0.5, 0.5));
        let dir = ray.dir();

        assert!((dir.x - 0.0).abs() < 1e-6);
        assert!((dir.y - 0.0).abs() < 1e-6);
        assert!((dir.z + 1.0).abs() < 1e-6);
        assert_eq!(ray.depth(), 0);
        assert_eq!((cam.width(), cam.height()), (4, 4));
    }

    #[test]
    fn test_perspective_camera_corners() {
        let cam = camera();
        // 90 degree fov: the top-left corner direction is (-1, 1, -1) normalized.
        let ray = cam.sample_ray(&Vector2f::new(0.0, 0.0));
        let expected = Vector3f::new(-1.0, 1.0, -1.0).normalize();
        assert!((ray.dir() - expected).norm() < 1e-5);

        let ray = cam.sample_ray(&Vector2f::new(1.0, 1.0));
        let expected = Vector3f::new(1.0, -1.0, -1.0).normalize();
        assert!((ray.dir() - expected).norm() < 1e-5);
        assert!(ray.min_t > 1e-4);
    }
}
