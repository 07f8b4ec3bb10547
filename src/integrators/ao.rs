// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_cosine_hemisphere_pdf };

pub const DEFAULT_AO_SAMPLES: u32 = 200;

/// Ambient occlusion: fraction of the cosine-weighted hemisphere above the
/// hit point that reaches nothing.
pub struct AoIntegrator {
    samples: u32,
}

impl AoIntegrator {
    pub fn new(samples: u32) -> Self {
        Self { samples: samples.max(1) }
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl Default for AoIntegrator {
    fn default() -> Self {
        Self::new(DEFAULT_AO_SAMPLES)
    }
}

impl Integrator for AoIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::default(),
        };

        let frame = its.sh_frame();
        let mut visible = 0.0;
        for _ in 0..self.samples {
            let local = square_to_cosine_hemisphere(&sampler.next_2d());
            let pdf = square_to_cosine_hemisphere_pdf(&local);
            if pdf <= 0.0 {
                continue;
            }

            let occlusion_ray = Ray3f::new(its.p(), frame.to_world(&local), None, None);
            if !scene.ray_intersection_t(&occlusion_ray) {
                // Integrand V cos / pi over density cos / pi.
                visible += 1.0;
            }
        }

        RGBSpectrum::splat(visible / self.samples as Float)
    }

    fn describe(&self) -> String {
        format!("AoIntegrator[samples = {}]", self.samples)
    }
}
