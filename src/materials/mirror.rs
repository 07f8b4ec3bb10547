// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDFValue, Measure, BSDF };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::materials::microfacet::reflect;

/// Ideal mirror. Like every discrete model it works on world-space directions.
pub struct MirrorBSDF;

impl BSDF for MirrorBSDF {
    fn eval(&self, _record: &BSDFQueryRecord) -> BSDFValue {
        BSDFValue::default()
    }

    fn pdf(&self, _record: &BSDFQueryRecord) -> Float {
        0.0
    }

    fn sample(&self, record: &mut BSDFQueryRecord, _u: &Vector2f) -> BSDFValue {
        record.measure = Measure::Discrete;
        record.wr = reflect(&record.wi, &record.n);
        record.wt = Vector3f::zeros();
        record.eta = 1.0;

        BSDFValue::splat(1.0)
    }

    fn describe(&self) -> String {
        String::from("MirrorBSDF[]")
    }
}

#[cfg(test)]
mod tests {
    use super::MirrorBSDF;
    use crate::core::bsdf::{ BSDFQueryRecord, Measure, BSDF };
    use crate::math::constants::{ Vector2f, Vector3f };

    #[test]
    fn test_mirror_reflects() {
        let wi = Vector3f::new(1.0, 0.0, -1.0).normalize();
        let mut record = BSDFQueryRecord::new(wi);
        let kr = MirrorBSDF.sample(&mut record, &Vector2f::new(0.1, 0.1));

        assert_eq!(record.measure, Measure::Discrete);
        assert!((record.wr - Vector3f::new(1.0, 0.0, 1.0).normalize()).norm() < 1e-6);
        assert_eq!(record.wt, Vector3f::zeros());
        assert_eq!(kr[0], 1.0);
        assert!(MirrorBSDF.eval(&record).is_black());
        assert_eq!(MirrorBSDF.pdf(&record), 0.0);
        assert!(!MirrorBSDF.is_diffuse());
    }
}
