// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDF };
use crate::core::emitter::Emitter;
use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::UInt;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use super::geometry_term::emitter_contribution;

pub const WHITTED_MAX_DEPTH: UInt = 15;

/// Direct light from every emitter on diffuse surfaces; specular surfaces
/// recurse along the reflected and transmitted directions.
pub struct WhittedIntegrator {
    max_depth: UInt,
}

impl WhittedIntegrator {
    pub fn new() -> Self {
        Self { max_depth: WHITTED_MAX_DEPTH }
    }

    pub fn max_depth(&self) -> UInt {
        self.max_depth
    }
}

impl Default for WhittedIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for WhittedIntegrator {
    fn li(&self, scene: &Scene, sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::default(),
        };
        let object = match scene.surface(&its) {
            Some(object) => object,
            None => return RGBSpectrum::default(),
        };
        if let Some(emitter) = object.emitter() {
            return emitter.radiance();
        }

        let bsdf = object.bsdf();
        let mut result = RGBSpectrum::default();

        if bsdf.is_diffuse() {
            let wo_local = its.sh_frame().to_local(&(-ray.dir()));
            for &light_idx in scene.emitters() {
                result += emitter_contribution(scene, sampler, &its, bsdf, &wo_local, light_idx);
            }
            return result;
        }

        if ray.depth() > self.max_depth {
            return result;
        }

        let mut query = BSDFQueryRecord::new(ray.dir()).at(&its);
        let kr = bsdf.sample(&mut query, &sampler.next_2d());
        let kt = RGBSpectrum::splat(1.0) - kr;

        for (dir, coeff) in [(query.wt, kt), (query.wr, kr)].iter() {
            if dir.norm_squared() == 0.0 || coeff.is_black() {
                continue;
            }
            let next = Ray3f::with_depth(its.p(), *dir, ray.depth() + 1);
            result += *coeff * self.li(scene, sampler, &next);
        }

        if result.is_valid() { result } else { RGBSpectrum::default() }
    }

    fn describe(&self) -> String {
        format!("WhittedIntegrator[max_depth = {}]", self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::WhittedIntegrator;
    use crate::core::integrator::Integrator;
    use crate::core::sampler::IndependentSampler;
    use crate::core::scene::{ Scene, SceneObject };
    use crate::materials::Material;
    use crate::materials::dielectric::DielectricBSDF;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
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

    fn light_panel(z: f32) -> Arc<Rectangle> {
        // Normal points down.
        Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, z),
                                Vector3f::new(0.0, 0.5, 0.0),
                                Vector3f::new(0.5, 0.0, 0.0)))
    }

    #[test]
    fn test_whitted_emitter_and_miss() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::with_emission(light_panel(2.0), diffuse(), RGBSpectrum::new(3.0, 2.0, 1.0)));
        scene.build_bvh();

        let integrator = WhittedIntegrator::new();
        let mut sampler = IndependentSampler::new(1);
        let up = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert_eq!(integrator.li(&scene, &mut sampler, &up), RGBSpectrum::new(3.0, 2.0, 1.0));

        let down = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(integrator.li(&scene, &mut sampler, &down).is_black());
    }

    #[test]
    fn test_whitted_mirror_sees_light() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::with_emission(light_panel(2.0), diffuse(), RGBSpectrum::splat(4.0)));
        // Mirror floor facing up.
        scene.add_object(SceneObject::new(
            Arc::new(Rectangle::new(Vector3f::zeros(),
                                    Vector3f::new(5.0, 0.0, 0.0),
                                    Vector3f::new(0.0, 5.0, 0.0))),
            Material::from(MirrorBSDF)));
        scene.build_bvh();

        let integrator = WhittedIntegrator::new();
        let mut sampler = IndependentSampler::new(1);
        // Looking down from below the panel; the mirror bounces the ray up into it.
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert_eq!(integrator.li(&scene, &mut sampler, &ray), RGBSpectrum::splat(4.0));
    }

    #[test]
    fn test_whitted_glass_sphere_is_finite_and_repeatable() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::with_emission(light_panel(3.0), diffuse(), RGBSpectrum::splat(4.0)));
        scene.add_object(SceneObject::new(
            Arc::new(Sphere::new(Vector3f::zeros(), 1.0)),
            Material::from(DielectricBSDF::default())));
        scene.add_object(SceneObject::new(
            Arc::new(Rectangle::new(Vector3f::new(0.0, 0.0, -2.0),
                                    Vector3f::new(5.0, 0.0, 0.0),
                                    Vector3f::new(0.0, 5.0, 0.0))),
            diffuse()));
        scene.build_bvh();

        let integrator = WhittedIntegrator::new();
        let mut sampler = IndependentSampler::new(9);
        // Misses the panel and enters the sphere off-center.
        let ray = Ray3f::new(Vector3f::new(0.7, 0.1, 5.0), Vector3f::new(0.0, 0.0, -1.0), None, None);
        let value = integrator.li(&scene, &mut sampler, &ray);
        assert!(value.is_valid());

        let mut replay = IndependentSampler::new(9);
        assert_eq!(integrator.li(&scene, &mut replay, &ray), value);
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
    fn test_whitted_mirror_corridor_terminates() {
        let scene = mirror_corridor();
        let integrator = WhittedIntegrator::new();
        let mut sampler = IndependentSampler::new(3);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.5), Vector3f::new(0.0, 0.0, -1.0), None, None);
        assert!(integrator.li(&scene, &mut sampler, &ray).is_black());
    }
}
