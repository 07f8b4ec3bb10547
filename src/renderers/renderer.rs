// Copyright @yucwang 2021

use crate::core::scene::{ Scene, SceneError };
use crate::math::bitmap::Bitmap;

pub trait Renderer {
    /// Renders an activated scene with its own camera, integrator and sampler.
    fn render(&self, scene: &Scene) -> Result<Bitmap, SceneError>;
}
