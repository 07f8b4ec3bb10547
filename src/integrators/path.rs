// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDF };
use crate::core::emitter::Emitter;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{ Float, UInt };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use super::geometry_term::emitter_contribution;

/// Recursive path tracer with one explicit emitter sample per diffuse
/// vertex.
///
/// The two presets differ only in recursion budget and in how the weight on
/// the direct term decays per bounce. Emitters reached by a continuation ray
/// are counted as well as sampled, with no weighting between the two
/// strategies. The final estimate is divided by `max_depth`.
pub struct PathIntegrator {
    max_depth: UInt,
    weight_decay: Float,
    label: &'static str,
}

impl PathIntegrator {
    pub fn new(max_depth: UInt, weight_decay: Float) -> Self {
        Self { max_depth, weight_decay, label: "PathIntegrator" }
    }

    /// `path_ems`: 15 bounces, direct weight decays by 0.95 per bounce.
    pub fn ems() -> Self {
        Self { label: "PathEmsIntegrator", ..Self::new(15, 0.95) }
    }

    /// `path_mis`: 16 bounces, constant direct weight.
    pub fn mis() -> Self {
        Self { label: "PathMisIntegrator", ..Self::new(16, 1.0) }
    }

    pub fn max_depth(&self) -> UInt {
        self.max_depth
    }

    pub fn weight_decay(&self) -> Float {
        self.weight_decay
    }

    fn trace(&self,
             scene: &Scene,
             sampler: &mut dyn Sampler,
             ray: &Ray3f,
             its: &SurfaceIntersection,
             weight: Float) -> RGBSpectrum {
        if ray.depth() > self.max_depth {
            return RGBSpectrum::default();
        }
        let object = match scene.surface(its) {
            Some(object) => object,
            None => return RGBSpectrum::default(),
        };
        if let Some(emitter) = object.emitter() {
            return emitter.radiance();
        }

        let bsdf = object.bsdf();
        let mut result = RGBSpectrum::default();

        if bsdf.is_diffuse() {
            let frame = its.sh_frame();
            let wo_local = frame.to_local(&(-ray.dir()));

            if let Some((light_idx, select_pdf)) = scene.sample_emitter(sampler.next_1d()) {
                let direct = emitter_contribution(scene, sampler, its, bsdf, &wo_local, light_idx);
                result += direct * (weight / select_pdf);
            }

            let mut query = BSDFQueryRecord::new(wo_local).at(its);
            let coeff = bsdf.sample(&mut query, &sampler.next_2d());
            if !coeff.is_black() && coeff.is_valid() {
                let next = Ray3f::with_depth(its.p(), frame.to_world(&query.wo), ray.depth() + 1);
                result += coeff * self.continue_path(scene, sampler, &next, weight);
            }
        } else {
            let mut query = BSDFQueryRecord::new(ray.dir()).at(its);
            let kr = bsdf.sample(&mut query, &sampler.next_2d());
            let kt = RGBSpectrum::splat(1.0) - kr;

            for (dir, coeff) in [(query.wt, kt), (query.wr, kr)].iter() {
                if dir.norm_squared() == 0.0 || coeff.is_black() {
                    continue;
                }
                let next = Ray3f::with_depth(its.p(), *dir, ray.depth() + 1);
                result += *coeff * self.continue_path(scene, sampler, &next, weight);
            }
        }

        if result.is_valid() { result } else { RGBSpectrum::default() }
    }

    fn continue_path(&self,
                     scene: &Scene,
                     sampler: &mut dyn Sampler,
                     ray: &Ray3f,
                     weight: Float) -> RGBSpectrum {
        match scene.ray_intersection(ray) {
            Some(its) => self.trace(scene, sampler, ray, &its, weight * self.weight_decay),
            None => RGBSpectrum::default(),
        }
    }
}

impl Integrator for PathIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::default(),
        };
        if let Some(emitter) = scene.surface(&its).and_then(|object| object.emitter()) {
            return emitter.radiance();
        }

        // TODO: replace the max_depth normalization with power-heuristic MIS
        // between the light and BSDF sampling densities.
        self.trace(scene, sampler, ray, &its, 1.0) / self.max_depth as Float
    }

    fn describe(&self) -> String {
        format!("{}[max_depth = {}, weight_decay = {}]", self.label, self.max_depth, self.weight_decay)
    }
}

#[cfg(test)]
mod tests {
    use super::PathIntegrator;
    use crate::core::integrator::Integrator;
    use crate::core::sampler::{ IndependentSampler, Sampler };
    use crate::core::scene::{ Scene, SceneObject };
    use crate::materials::Material;
    use crate::materials::dielectric::DielectricBSDF;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::materials::microfacet::MicrofacetBSDF;
    use crate::materials::mirror::MirrorBSDF;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;
    use std::sync::Arc;

    fn diffuse() -> Material {
        Material::from(LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5)))
    }

    fn lit_scene(center: Material) -> Scene {
        let mut scene = Scene::new();
        // Ceiling light facing down.
        scene.add_object(SceneObject::with_emission(
            Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, 4.0),
                                    Vector3f::new(0.0, 1.0, 0.0),
                                    Vector3f::new(1.0, 0.0, 0.0))),
            diffuse(), RGBSpectrum::new(6.0, 5.0, 4.0)));
        scene.add_object(SceneObject::new(
            Arc::new(Rectangle::new(Vector3f::zeros(),
                                    Vector3f::new(6.0, 0.0, 0.0),
                                    Vector3f::new(0.0, 6.0, 0.0))),
            diffuse()));
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 1.0), 0.75)), center));
        scene.build_bvh();
        scene
    }

    #[test]
    fn test_path_direct_emitter_hit() {
        let scene = lit_scene(diffuse());
        let up = Ray3f::new(Vector3f::new(0.3, 0.2, 3.0), Vector3f::new(0.0, 0.0, 1.0), None, None);

        for integrator in &[PathIntegrator::ems(), PathIntegrator::mis()] {
            let mut a = IndependentSampler::new(1);
            let mut b = IndependentSampler::new(77);
            b.next_2d();
            assert_eq!(integrator.li(&scene, &mut a, &up), RGBSpectrum::new(6.0, 5.0, 4.0));
            assert_eq!(integrator.li(&scene, &mut b, &up), RGBSpectrum::new(6.0, 5.0, 4.0));
        }
    }

    #[test]
    fn test_path_miss_is_black() {
        let scene = lit_scene(diffuse());
        let away = Ray3f::new(Vector3f::new(10.0, 10.0, 1.0), Vector3f::new(1.0, 0.0, 0.0), None, None);
        let mut sampler = IndependentSampler::new(0);
        assert!(PathIntegrator::ems().li(&scene, &mut sampler, &away).is_black());
    }

    #[test]
    fn test_path_presets() {
        let ems = PathIntegrator::ems();
        let mis = PathIntegrator::mis();
        assert_eq!((ems.max_depth(), ems.weight_decay()), (15, 0.95));
        assert_eq!((mis.max_depth(), mis.weight_decay()), (16, 1.0));
        assert!(ems.describe().starts_with("PathEms"));
    }

    #[test]
    fn test_path_diffuse_floor_is_lit() {
        let scene = lit_scene(diffuse());
        // Floor point away from the sphere, straight under the light's edge.
        let ray = Ray3f::new(Vector3f::new(2.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let integrator = PathIntegrator::ems();
        let mut sampler = IndependentSampler::new(11);

        let n = 64;
        let mut mean = RGBSpectrum::default();
        for _ in 0..n {
            let value = integrator.li(&scene, &mut sampler, &ray);
            assert!(value.is_valid());
            mean += value;
        }
        mean = mean / n as f32;
        assert!(mean[0] > 0.0);
        // Red light is brightest.
        assert!(mean[0] > mean[2]);
    }

    #[test]
    fn test_path_glass_and_microfacet_stay_finite() {
        let glass = lit_scene(Material::from(DielectricBSDF::default()));
        let rough = lit_scene(Material::from(MicrofacetBSDF::default()));
        let ray = Ray3f::new(Vector3f::new(0.3, -3.0, 1.2), Vector3f::new(-0.1, 1.0, 0.0), None, None);

        for scene in &[glass, rough] {
            for integrator in &[PathIntegrator::ems(), PathIntegrator::mis()] {
                let mut sampler = IndependentSampler::new(5);
                for _ in 0..16 {
                    let value = integrator.li(scene, &mut sampler, &ray);
                    assert!(value.is_valid());
                }
            }
        }
    }

    fn mirror_corridor() -> Scene {
        // Two facing mirrors at z = 0 and z = 1 with nothing else to hit.
        let mut scene = Scene::new();
        for &z in &[0.0, 1.0] {
            scene.add_object(SceneObject::new(
                Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, z),
                                        Vector3f::new(5.0, 0.0, 0.0),
                                        Vector3f::new(0.0, 5.0, 0.0))),
                Material::from(MirrorBSDF)));
        }
        scene.build_bvh();
        scene
    }

    #[test]
    fn test_path_mirror_corridor_terminates() {
        let scene = mirror_corridor();
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(0.0, 0.0, -1.0), None, None);
        for integrator in &[PathIntegrator::ems(), PathIntegrator::mis()] {
            let mut sampler = IndependentSampler::new(3);
            assert!(integrator.li(&scene, &mut sampler, &ray).is_black());
        }
    }
}
