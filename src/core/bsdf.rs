// Copyright @yucwang 2023

use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;

// Definitions of types used in BSDF sampling and eval
// processes
pub type BSDFValue = RGBSpectrum;

/// Measure the directions of a query are expressed in. A discrete BSDF is a
/// sum of Dirac deltas, so its value and density under the solid-angle
/// measure are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Unknown,
    SolidAngle,
    Discrete,
}

/// Per-event query passed to a BSDF.
///
/// `wi` lives in the local shading frame for diffuse-class models and in world
/// space (the incoming ray direction) for specular-class models. After a
/// discrete sample `wr`/`wt` hold the reflected and transmitted directions; a
/// zero vector marks a branch that carries nothing.
#[derive(Debug, Clone, Copy)]
pub struct BSDFQueryRecord<'a> {
    pub wi: Vector3f,
    pub wo: Vector3f,
    pub wr: Vector3f,
    pub wt: Vector3f,
    pub n: Vector3f,
    pub its: Option<&'a SurfaceIntersection>,
    pub measure: Measure,
    pub eta: Float,
}

impl<'a> BSDFQueryRecord<'a> {
    pub fn new(wi: Vector3f) -> Self {
        Self {
            wi,
            wo: Vector3f::zeros(),
            wr: Vector3f::zeros(),
            wt: Vector3f::zeros(),
            n: Vector3f::new(0.0, 0.0, 1.0),
            its: None,
            measure: Measure::Unknown,
            eta: 1.0,
        }
    }

    pub fn with_directions(wi: Vector3f, wo: Vector3f, measure: Measure) -> Self {
        Self { wo, measure, ..Self::new(wi) }
    }

    /// Attaches the originating hit and takes its shading normal.
    pub fn at(self, its: &'a SurfaceIntersection) -> Self {
        Self { n: its.sh_normal(), its: Some(its), ..self }
    }
}

pub trait BSDF: Send + Sync {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Value of the scattering distribution for the stored directions.
    fn eval(&self, record: &BSDFQueryRecord) -> BSDFValue;

    /// Solid-angle density of `sample` producing `record.wo`.
    fn pdf(&self, record: &BSDFQueryRecord) -> Float;

    /// Draws the outgoing direction(s) and returns the sample weight:
    /// `eval * cos / pdf` for smooth models, the Fresnel reflectance for
    /// discrete ones.
    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> BSDFValue;

    fn is_diffuse(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        String::from(self.name())
    }
}
