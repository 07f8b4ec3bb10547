// Copyright 2020 @TwoCookingMice

use super::constants::{ EPSILON, FLOAT_INFINITY, Float, UInt, Vector3f };

/// Ray segment `[min_t, max_t]` with a cached reciprocal direction and the
/// recursion depth of the path it belongs to.
///
/// The direction is normalized on construction, so `t` is a world-space
/// distance. `d_rcp` is recomputed by every constructor that sets a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    d_rcp: Vector3f,
    pub min_t: Float,
    pub max_t: Float,
    depth: UInt,
}

fn reciprocal(d: &Vector3f) -> Vector3f {
    d.map(|c| 1.0 / c)
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        let norm = d.norm();
        let dir = if norm > 0.0 { d / norm } else { d };
        Self { origin: o, dir, d_rcp: reciprocal(&dir),
               min_t: min_t.unwrap_or(EPSILON),
               max_t: max_t.unwrap_or(FLOAT_INFINITY),
               depth: 0 }
    }

    /// Ray with the default segment, continuing a path at `depth`.
    pub fn with_depth(o: Vector3f, d: Vector3f, depth: UInt) -> Self {
        let mut ray = Self::new(o, d, None, None);
        ray.depth = depth;
        ray
    }

    /// Copy of this ray covering a different segment.
    pub fn with_segment(&self, min_t: Float, max_t: Float) -> Self {
        Self { min_t, max_t, ..*self }
    }

    /// Same segment, opposite direction.
    pub fn reverse(&self) -> Self {
        Self { dir: -self.dir, d_rcp: -self.d_rcp, ..*self }
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn d_rcp(&self) -> Vector3f {
        self.d_rcp
    }

    pub fn depth(&self) -> UInt {
        self.depth
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn update(&mut self, t: Float) -> bool {
        if t < self.min_t || t > self.max_t {
            false
        } else {
            self.max_t = t;
            true
        }
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::{ Ray3f, EPSILON };

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let mut ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());
        assert_eq!(ray.min_t, EPSILON);
        assert!(ray.max_t.is_infinite());
        assert_eq!(ray.depth(), 0);

        let v1 = ray.at(2.0);
        assert!((v1[0] - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!((v1[1] - 0.0).abs() < 1e-5);
        assert!((v1[2] - std::f32::consts::SQRT_2).abs() < 1e-5);

        let status1 = ray.update(100.0);
        let status2 = ray.update(105.0);
        assert_eq!(status1, true);
        assert_eq!(status2, false);
    }

    #[test]
    fn test_ray3f_reciprocal() {
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, -2.0, 0.5), None, None);
        let d = ray.dir();
        let rcp = ray.d_rcp();
        for idx in 0..3 {
            assert_eq!(rcp[idx], 1.0 / d[idx]);
        }

        let reversed = ray.reverse();
        for idx in 0..3 {
            assert_eq!(reversed.dir()[idx], -d[idx]);
            assert_eq!(reversed.d_rcp()[idx], 1.0 / reversed.dir()[idx]);
        }

        let axis = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(axis.d_rcp().x.is_infinite());
    }

    #[test]
    fn test_ray3f_segment_and_depth() {
        let ray = Ray3f::with_depth(Vector3f::zeros(), Vector3f::new(0.0, 1.0, 0.0), 3);
        let shortened = ray.with_segment(0.5, 2.0);
        assert_eq!(shortened.depth(), 3);
        assert_eq!(shortened.dir(), ray.dir());
        assert!(shortened.test_segment(1.0));
        assert!(!shortened.test_segment(2.5));
        assert!(!shortened.test_segment(0.25));
    }
}
