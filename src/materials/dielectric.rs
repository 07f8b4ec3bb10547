// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDFValue, Measure, BSDF };
use crate::math::constants::{ Float, Vector2f };
use crate::materials::microfacet::{ fresnel_dielectric, reflect, refract };

/// Smooth dielectric interface. Directions are world space; `wi` is the
/// incoming ray direction and `n` the outward normal.
pub struct DielectricBSDF {
    int_ior: Float,
    ext_ior: Float,
}

impl DielectricBSDF {
    pub fn new(int_ior: Float, ext_ior: Float) -> Self {
        Self { int_ior, ext_ior }
    }

    pub fn int_ior(&self) -> Float {
        self.int_ior
    }

    pub fn ext_ior(&self) -> Float {
        self.ext_ior
    }
}

impl Default for DielectricBSDF {
    fn default() -> Self {
        // BK7 borosilicate glass in air.
        Self::new(1.5046, 1.000277)
    }
}

impl BSDF for DielectricBSDF {
    fn eval(&self, _record: &BSDFQueryRecord) -> BSDFValue {
        BSDFValue::default()
    }

    fn pdf(&self, _record: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, record: &mut BSDFQueryRecord, _u: &Vector2f) -> BSDFValue {
        record.measure = Measure::Discrete;
        record.eta = self.ext_ior / self.int_ior;

        // Positive when the ray arrives from the exterior side.
        let cos_theta_i = -record.n.dot(&record.wi);
        let kr = fresnel_dielectric(cos_theta_i, self.ext_ior, self.int_ior);

        record.wr = reflect(&record.wi, &record.n);
        record.wt = refract(&record.wi, &record.n, record.eta);

        BSDFValue::splat(kr)
    }

    fn describe(&self) -> String {
        format!("DielectricBSDF[intIOR = {}, extIOR = {}]", self.int_ior, self.ext_ior)
    }
}
