// Copyright @yucwang 2026

use crate::core::emitter::Emitter;
use crate::math::spectrum::RGBSpectrum;

/// Diffuse area light attached to one scene object.
#[derive(Debug, Clone, Copy)]
pub struct AreaEmitter {
    radiance: RGBSpectrum,
}

impl AreaEmitter {
    pub fn new(radiance: RGBSpectrum) -> Self {
        Self { radiance }
    }
}

impl Emitter for AreaEmitter {
    fn radiance(&self) -> RGBSpectrum {
        self.radiance
    }

    fn describe(&self) -> String {
        format!("AreaEmitter[radiance = {:?}]", self.radiance)
    }
}
