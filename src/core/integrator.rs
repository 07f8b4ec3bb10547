// Copyright @yucwang 2026

use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Radiance estimator. One call per camera ray; all randomness comes from
/// `sampler`, which belongs to the calling worker.
pub trait Integrator: Send + Sync {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum;

    fn describe(&self) -> String {
        String::from("Integrator")
    }
}
