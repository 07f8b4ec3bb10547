// Copyright @yucwang 2023

use crate::core::bsdf::{ BSDFQueryRecord, BSDFValue, Measure, BSDF };
use crate::math::constants::{ Float, INV_PI, Vector2f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_cosine_hemisphere_pdf };

pub struct LambertianDiffuseBSDF {
    albedo: RGBSpectrum
}

impl BSDF for LambertianDiffuseBSDF {
    fn eval(&self, record: &BSDFQueryRecord) -> BSDFValue {
        if record.measure != Measure::SolidAngle
            || Frame::cos_theta(&record.wi) <= 0.0
            || Frame::cos_theta(&record.wo) <= 0.0 {
            return BSDFValue::default();
        }

        self.albedo * INV_PI
    }

    fn pdf(&self, record: &BSDFQueryRecord) -> Float {
        if record.measure != Measure::SolidAngle
            || Frame::cos_theta(&record.wi) <= 0.0
            || Frame::cos_theta(&record.wo) <= 0.0 {
            return 0.0;
        }

        square_to_cosine_hemisphere_pdf(&record.wo)
    }

    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> BSDFValue {
        if Frame::cos_theta(&record.wi) <= 0.0 {
            return BSDFValue::default();
        }

        record.measure = Measure::SolidAngle;
        record.wo = square_to_cosine_hemisphere(u);
        record.eta = 1.0;

        // eval * cos / pdf, the cosines cancel.
        self.albedo
    }

    fn is_diffuse(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("LambertianDiffuseBSDF[albedo = {:?}]", self.albedo)
    }
}

impl LambertianDiffuseBSDF {
    pub fn new(rgb: RGBSpectrum) -> Self {
        Self {
            albedo: rgb,
        }
    }

    pub fn albedo(&self) -> RGBSpectrum {
        self.albedo
    }
}

#[cfg(test)]
mod tests {
    use super::LambertianDiffuseBSDF;
    use crate::core::bsdf::{ BSDFQueryRecord, Measure, BSDF };
    use crate::math::constants::{ INV_PI, Vector2f, Vector3f };
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_lambertian_eval_and_sample() {
        let bsdf = LambertianDiffuseBSDF::new(RGBSpectrum::new(0.5, 0.25, 1.0));
        let wi = Vector3f::new(0.0, 0.0, 1.0);

        let mut record = BSDFQueryRecord::new(wi);
        let weight = bsdf.sample(&mut record, &Vector2f::new(0.3, 0.7));
        assert_eq!(record.measure, Measure::SolidAngle);
        assert!(record.wo.z > 0.0);
        assert_eq!(weight, RGBSpectrum::new(0.5, 0.25, 1.0));

        let value = bsdf.eval(&record);
        assert!((value[0] - 0.5 * INV_PI).abs() < 1e-6);
        assert!((bsdf.pdf(&record) - record.wo.z * INV_PI).abs() < 1e-6);
    }

    #[test]
    fn test_lambertian_rejects_backside_and_discrete() {
        let bsdf = LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5));
        let up = Vector3f::new(0.0, 0.0, 1.0);
        let down = Vector3f::new(0.0, 0.0, -1.0);

        let backside = BSDFQueryRecord::with_directions(up, down, Measure::SolidAngle);
        assert!(bsdf.eval(&backside).is_black());
        assert_eq!(bsdf.pdf(&backside), 0.0);

        let discrete = BSDFQueryRecord::with_directions(up, up, Measure::Discrete);
        assert!(bsdf.eval(&discrete).is_black());
        assert_eq!(bsdf.pdf(&discrete), 0.0);

        let mut below = BSDFQueryRecord::new(down);
        assert!(bsdf.sample(&mut below, &Vector2f::new(0.5, 0.5)).is_black());
    }
}
