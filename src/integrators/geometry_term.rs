// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, Measure, BSDF };
use crate::core::emitter::Emitter;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{ EPSILON, Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Geometric coupling between `x` and a light point `y`:
/// `|n_x . w| |n_y . w| / |x - y|^2`, or zero when `y` faces away from `x`
/// or something blocks the segment.
pub fn geometric_term(scene: &Scene,
                      x: &Vector3f,
                      y: &Vector3f,
                      n_x: &Vector3f,
                      n_y: &Vector3f) -> Float {
    let y2x = x - y;
    let dist2 = y2x.norm_squared();
    let dist = dist2.sqrt();
    if !(dist > 2.0 * EPSILON) {
        return 0.0;
    }

    let w = y2x / dist;
    if n_y.dot(&w) <= 0.0 {
        return 0.0;
    }

    let shadow = Ray3f::new(*y, w, Some(EPSILON), Some(dist - EPSILON));
    if scene.ray_intersection_t(&shadow) {
        return 0.0;
    }

    n_x.dot(&w).abs() * n_y.dot(&w).abs() / dist2
}

/// One-sample estimate of the light arriving at `its` from the emitter
/// object `light_idx`, scattered toward `wo_local`. The result is divided by
/// the area density only; callers account for how the emitter was chosen.
pub fn emitter_contribution(scene: &Scene,
                            sampler: &mut dyn Sampler,
                            its: &SurfaceIntersection,
                            bsdf: &dyn BSDF,
                            wo_local: &Vector3f,
                            light_idx: usize) -> RGBSpectrum {
    let light = match scene.object(light_idx) {
        Some(light) => light,
        None => return RGBSpectrum::default(),
    };
    let emitter = match light.emitter() {
        Some(emitter) => emitter,
        None => return RGBSpectrum::default(),
    };

    let u = emitter.sample_2d(sampler);
    let record = light.shape().sample(&u, sampler.next_1d());
    if !(record.pdf() > 0.0) {
        return RGBSpectrum::default();
    }

    let x = its.p();
    let y = record.p();
    let to_light = y - x;
    let dist = to_light.norm();
    if !(dist > 0.0) {
        return RGBSpectrum::default();
    }

    let wi_local = its.sh_frame().to_local(&(to_light / dist));
    let query = BSDFQueryRecord::with_directions(wi_local, *wo_local, Measure::SolidAngle).at(its);
    let fr = bsdf.eval(&query);
    if fr.is_black() {
        return RGBSpectrum::default();
    }

    let g = geometric_term(scene, &x, &y, &its.sh_normal(), &record.normal());
    let value = fr * emitter.radiance() * (g / record.pdf());
    if value.is_valid() { value } else { RGBSpectrum::default() }
}
