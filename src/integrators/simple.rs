// Copyright @yucwang 2026

use crate::core::integrator::Integrator;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::math::constants::{ EPSILON, INV_TWO_PI, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// Debug integrator: a single point light with no BSDF involved.
pub struct SimpleIntegrator {
    position: Vector3f,
    energy: RGBSpectrum,
}

impl SimpleIntegrator {
    pub fn new(position: Vector3f, energy: RGBSpectrum) -> Self {
        Self { position, energy }
    }
}

impl Integrator for SimpleIntegrator {
    fn li(&self, scene: &Scene, _sampler: &mut dyn Sampler, ray: &Ray3f) -> RGBSpectrum {
        let its = match scene.ray_intersection(ray) {
            Some(its) => its,
            None => return RGBSpectrum::default(),
        };

        let to_light = self.position - its.p();
        let dist2 = to_light.norm_squared();
        let dist = dist2.sqrt();
        if !(dist > EPSILON) {
            return RGBSpectrum::default();
        }

        let cos_theta = its.sh_normal().dot(&(to_light / dist));
        if cos_theta <= 0.0 {
            return RGBSpectrum::default();
        }

        let shadow = Ray3f::new(its.p(), to_light, None, Some(dist - EPSILON));
        if scene.ray_intersection_t(&shadow) {
            return RGBSpectrum::default();
        }

        self.energy * (INV_TWO_PI * INV_TWO_PI * cos_theta / dist2)
    }

    fn describe(&self) -> String {
        format!("SimpleIntegrator[position = {:?}, energy = {:?}]", self.position, self.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::SimpleIntegrator;
    use crate::core::integrator::Integrator;
    use crate::core::sampler::IndependentSampler;
    use crate::core::scene::{ Scene, SceneObject };
    use crate::materials::Material;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::math::constants::{ PI, Vector3f };
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;
    use crate::shapes::rectangle::Rectangle;
    use crate::shapes::sphere::Sphere;
    use std::sync::Arc;

    fn floor_scene(blocker: bool) -> Scene {
        let mut scene = Scene::new();
        let diffuse = || Material::from(LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5)));
        scene.add_object(SceneObject::new(
            Arc::new(Rectangle::new(Vector3f::zeros(),
                                    Vector3f::new(4.0, 0.0, 0.0),
                                    Vector3f::new(0.0, 4.0, 0.0))),
            diffuse()));
        if blocker {
            scene.add_object(SceneObject::new(
                Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 1.0), 0.3)), diffuse()));
        }
        scene.build_bvh();
        scene
    }

    #[test]
    fn test_simple_point_light() {
        let integrator = SimpleIntegrator::new(Vector3f::new(0.0, 0.0, 2.0), RGBSpectrum::splat(100.0));
        let mut sampler = IndependentSampler::new(0);
        // Slanted so the camera ray itself misses the blocker.
        let ray = Ray3f::new(Vector3f::new(3.0, 0.0, 3.0), Vector3f::new(-1.0, 0.0, -1.0), None, None);

        let lit = integrator.li(&floor_scene(false), &mut sampler, &ray);
        let expected = 100.0 / (4.0 * PI * PI) / 4.0;
        assert!((lit[1] - expected).abs() < 1e-4);

        let shadowed = integrator.li(&floor_scene(true), &mut sampler, &ray);
        assert!(shadowed.is_black());

        let miss = Ray3f::new(Vector3f::new(0.0, 0.0, 3.0), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(integrator.li(&floor_scene(false), &mut sampler, &miss).is_black());
    }
}
