// Copyright @yucwang 2026

pub mod ao;
pub mod geometry_term;
pub mod path;
pub mod simple;
pub mod whitted;

use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use self::ao::AoIntegrator;
use self::path::PathIntegrator;
use self::simple::SimpleIntegrator;
use self::whitted::WhittedIntegrator;

/// Closed set of radiance estimators a scene can be rendered with.
pub enum IntegratorType {
    Simple(SimpleIntegrator),
    Ao(AoIntegrator),
    Whitted(WhittedIntegrator),
    Path(PathIntegrator),
}

impl IntegratorType {
    pub fn ao(samples: u32) -> Self {
        IntegratorType::Ao(AoIntegrator::new(samples))
    }

    pub fn whitted() -> Self {
        IntegratorType::Whitted(WhittedIntegrator::new())
    }

    pub fn path_ems() -> Self {
        IntegratorType::Path(PathIntegrator::ems())
    }

    pub fn path_mis() -> Self {
        IntegratorType::Path(PathIntegrator::mis())
    }

    fn inner(&self) -> &dyn Integrator {
        match self {
            IntegratorType::Simple(integrator) => integrator,
            IntegratorType::Ao(integrator) => integrator,
            IntegratorType::Whitted(integrator) => integrator,
            IntegratorType::Path(integrator) => integrator,
        }
    }
}

impl Integrator for IntegratorType {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        self.inner().li(scene, sampler, ray)
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }
}
