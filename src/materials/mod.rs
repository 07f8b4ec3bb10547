// Copyright @yucwang 2026

pub mod dielectric;
pub mod lambertian_diffuse;
pub mod microfacet;
pub mod mirror;

use crate::core::bsdf::{ BSDFQueryRecord, BSDFValue, BSDF };
use crate::math::constants::{ Float, Vector2f };

use self::dielectric::DielectricBSDF;
use self::lambertian_diffuse::LambertianDiffuseBSDF;
use self::microfacet::MicrofacetBSDF;
use self::mirror::MirrorBSDF;

/// Closed set of surface models a scene object can carry.
pub enum Material {
    Diffuse(LambertianDiffuseBSDF),
    Mirror(MirrorBSDF),
    Dielectric(DielectricBSDF),
    Microfacet(MicrofacetBSDF),
}

impl Material {
    fn inner(&self) -> &dyn BSDF {
        match self {
            Material::Diffuse(bsdf) => bsdf,
            Material::Mirror(bsdf) => bsdf,
            Material::Dielectric(bsdf) => bsdf,
            Material::Microfacet(bsdf) => bsdf,
        }
    }
}

impl BSDF for Material {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn eval(&self, record: &BSDFQueryRecord) -> BSDFValue {
        self.inner().eval(record)
    }

    fn pdf(&self, record: &BSDFQueryRecord) -> Float {
        self.inner().pdf(record)
    }

    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> BSDFValue {
        self.inner().sample(record, u)
    }

    fn is_diffuse(&self) -> bool {
        self.inner().is_diffuse()
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }
}

impl From<LambertianDiffuseBSDF> for Material {
    fn from(bsdf: LambertianDiffuseBSDF) -> Self {
        Material::Diffuse(bsdf)
    }
}

impl From<MirrorBSDF> for Material {
    fn from(bsdf: MirrorBSDF) -> Self {
        Material::Mirror(bsdf)
    }
}

impl From<DielectricBSDF> for Material {
    fn from(bsdf: DielectricBSDF) -> Self {
        Material::Dielectric(bsdf)
    }
}

impl From<MicrofacetBSDF> for Material {
    fn from(bsdf: MicrofacetBSDF) -> Self {
        Material::Microfacet(bsdf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_material_dispatch() {
        let diffuse: Material = LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5)).into();
        let glass: Material = DielectricBSDF::default().into();
        let rough: Material = MicrofacetBSDF::default().into();
        let mirror: Material = MirrorBSDF.into();

        assert!(diffuse.is_diffuse());
        assert!(rough.is_diffuse());
        assert!(!glass.is_diffuse());
        assert!(!mirror.is_diffuse());
        assert!(glass.describe().starts_with("DielectricBSDF"));
        assert!(diffuse.name().ends_with("LambertianDiffuseBSDF"));
    }
}
