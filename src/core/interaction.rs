// Copyright @yucwang 2023

use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::frame::Frame;

/// Nearest hit returned by a ray query. The object index refers back into the
/// scene that produced it; the intersection does not own the surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    sh_frame: Frame,
    uv: Vector2f,
    t: Float,
    object_index: Option<usize>,
}

/// Point drawn on a surface together with its area density.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceSampleRecord {
    p: Vector3f,
    normal: Vector3f,
    pdf: Float,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_sh_normal: Vector3f,
               new_uv: Vector2f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal,
               sh_frame: Frame::from_normal(&new_sh_normal),
               uv: new_uv, t: new_t, object_index: None }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn uv(&self) -> Vector2f {
        self.uv
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_normal(&self) -> Vector3f {
        self.sh_frame.n
    }

    pub fn sh_frame(&self) -> &Frame {
        &self.sh_frame
    }

    pub fn object_index(&self) -> Option<usize> {
        self.object_index
    }

    pub fn with_object_index(&self, object_index: Option<usize>) -> Self {
        Self { object_index, ..*self }
    }
}

impl SurfaceSampleRecord {
    pub fn new(new_p: Vector3f, new_normal: Vector3f, new_pdf: Float) -> Self {
        Self { p: new_p, normal: new_normal, pdf: new_pdf }
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    pub fn pdf(&self) -> Float {
        self.pdf
    }
}
