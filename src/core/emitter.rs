// Copyright @yucwang 2026

use crate::core::sampler::Sampler;
use crate::math::constants::Vector2f;
use crate::math::spectrum::RGBSpectrum;

pub trait Emitter: Send + Sync {
    /// Radiance leaving the surface, constant over its area.
    fn radiance(&self) -> RGBSpectrum;

    /// Auxiliary 2-D sample drawn from the caller's stream.
    fn sample_2d(&self, sampler: &mut dyn Sampler) -> Vector2f {
        sampler.next_2d()
    }

    fn describe(&self) -> String {
        String::from("Emitter")
    }
}
