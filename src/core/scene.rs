// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::bvh::BVH;
use crate::core::emitter::Emitter;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sampler::{ IndependentSampler, Sampler };
use crate::core::sensor::Sensor;
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::integrators::IntegratorType;
use crate::materials::Material;
use crate::math::aabb::AABB;
use crate::math::constants::Float;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    DuplicateSampler,
    DuplicateCamera,
    DuplicateIntegrator,
    MissingCamera,
    MissingIntegrator,
    EmptyScene,
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::DuplicateSampler => write!(f, "scene already has a sampler"),
            SceneError::DuplicateCamera => write!(f, "scene already has a camera"),
            SceneError::DuplicateIntegrator => write!(f, "scene already has an integrator"),
            SceneError::MissingCamera => write!(f, "no camera was specified"),
            SceneError::MissingIntegrator => write!(f, "no integrator was specified"),
            SceneError::EmptyScene => write!(f, "scene contains no objects"),
        }
    }
}

impl std::error::Error for SceneError {}

pub struct SceneObject {
    shape: Arc<dyn Shape>,
    material: Material,
    emitter: Option<AreaEmitter>,
    name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Material) -> Self {
        Self { shape, material, emitter: None, name: None }
    }

    pub fn with_emission(shape: Arc<dyn Shape>, material: Material, radiance: RGBSpectrum) -> Self {
        Self { shape, material, emitter: Some(AreaEmitter::new(radiance)), name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    pub fn bsdf(&self) -> &Material {
        &self.material
    }

    pub fn emitter(&self) -> Option<&AreaEmitter> {
        self.emitter.as_ref()
    }

    pub fn is_emitter(&self) -> bool {
        self.emitter.is_some()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Surfaces plus the single sampler, camera and integrator used to render
/// them. Build it with `add_object`/`set_*`, then call `activate`.
pub struct Scene {
    objects: Vec<SceneObject>,
    emitters: Vec<usize>,
    sampler: Option<Box<dyn Sampler>>,
    camera: Option<Box<dyn Sensor>>,
    integrator: Option<IntegratorType>,
    scene_bounds: AABB,
    bvh: Option<BVH>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            emitters: Vec::new(),
            sampler: None,
            camera: None,
            integrator: None,
            scene_bounds: AABB::default(),
            bvh: None,
        }
    }

    pub fn add_object(&mut self, object: SceneObject) {
        if object.is_emitter() {
            self.emitters.push(self.objects.len());
        }
        self.objects.push(object);
        self.bvh = None;
    }

    pub fn set_sampler(&mut self, sampler: Box<dyn Sampler>) -> Result<(), SceneError> {
        if self.sampler.is_some() {
            return Err(SceneError::DuplicateSampler);
        }
        self.sampler = Some(sampler);
        Ok(())
    }

    pub fn set_camera(&mut self, camera: Box<dyn Sensor>) -> Result<(), SceneError> {
        if self.camera.is_some() {
            return Err(SceneError::DuplicateCamera);
        }
        self.camera = Some(camera);
        Ok(())
    }

    pub fn set_integrator(&mut self, integrator: IntegratorType) -> Result<(), SceneError> {
        if self.integrator.is_some() {
            return Err(SceneError::DuplicateIntegrator);
        }
        self.integrator = Some(integrator);
        Ok(())
    }

    /// Validates the configuration and builds the acceleration structure.
    pub fn activate(&mut self) -> Result<(), SceneError> {
        if self.objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        if self.integrator.is_none() {
            return Err(SceneError::MissingIntegrator);
        }
        if self.camera.is_none() {
            return Err(SceneError::MissingCamera);
        }
        if self.sampler.is_none() {
            log::debug!("No sampler specified, using IndependentSampler");
            self.sampler = Some(Box::new(IndependentSampler::default()));
        }

        self.build_bvh();
        log::info!("Activated scene:\n{}", self.describe());
        Ok(())
    }

    pub fn build_bvh(&mut self) {
        let mut prim_bounds = Vec::with_capacity(self.objects.len());
        let mut prim_centroids = Vec::with_capacity(self.objects.len());
        let mut scene_bounds = AABB::default();
        for obj in &self.objects {
            let bounds = obj.shape.bounding_box();
            prim_centroids.push(bounds.center());
            prim_bounds.push(bounds);
            scene_bounds.expand_by_aabb(&bounds);
        }

        self.bvh = Some(BVH::new(prim_bounds, prim_centroids));
        self.scene_bounds = scene_bounds;
    }

    /// Nearest hit along the ray segment, tagged with the object index.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let hit = match &self.bvh {
            Some(bvh) => bvh.ray_intersection(ray, |prim_idx, ray| {
                self.objects[prim_idx].shape.ray_intersection(ray).map(|h| {
                    let t = h.t();
                    (h, t)
                })
            }),
            None => self.brute_force_intersection(ray),
        };

        hit.map(|(idx, its)| its.with_object_index(Some(idx)))
    }

    /// True if anything blocks the ray segment.
    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        match &self.bvh {
            Some(bvh) => bvh.ray_intersection_t(ray, |prim_idx, ray| {
                self.objects[prim_idx].shape.ray_intersection_t(ray)
            }),
            None => self.objects.iter().any(|obj| obj.shape.ray_intersection_t(ray)),
        }
    }

    fn brute_force_intersection(&self, ray: &Ray3f) -> Option<(usize, SurfaceIntersection)> {
        let mut ray = *ray;
        let mut closest = None;
        for (idx, obj) in self.objects.iter().enumerate() {
            if let Some(its) = obj.shape.ray_intersection(&ray) {
                if ray.update(its.t()) {
                    closest = Some((idx, its));
                }
            }
        }
        closest
    }

    /// Object that produced `its`.
    pub fn surface(&self, its: &SurfaceIntersection) -> Option<&SceneObject> {
        its.object_index().and_then(|idx| self.objects.get(idx))
    }

    /// Emitting objects, by index, in insertion order.
    pub fn emitters(&self) -> &[usize] {
        &self.emitters
    }

    /// Picks an emitter uniformly; returns its object index and the
    /// selection probability.
    pub fn sample_emitter(&self, u1: Float) -> Option<(usize, Float)> {
        if self.emitters.is_empty() {
            return None;
        }

        let count = self.emitters.len();
        let slot = ((u1 * count as Float) as usize).min(count - 1);
        Some((self.emitters[slot], 1.0 / count as Float))
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, idx: usize) -> Option<&SceneObject> {
        self.objects.get(idx)
    }

    pub fn sampler(&self) -> Option<&dyn Sampler> {
        self.sampler.as_deref()
    }

    pub fn camera(&self) -> Option<&dyn Sensor> {
        self.camera.as_deref()
    }

    pub fn integrator(&self) -> Option<&IntegratorType> {
        self.integrator.as_ref()
    }

    pub fn scene_bounds(&self) -> &AABB {
        &self.scene_bounds
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn describe(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Scene[{} objects, {} emitters]", self.objects.len(), self.emitters.len()));
        for (idx, obj) in self.objects.iter().enumerate() {
            lines.push(format!("  #{} {}: {} / {}{}",
                               idx,
                               obj.name().unwrap_or("unnamed"),
                               obj.shape.describe(),
                               obj.material.describe(),
                               obj.emitter.map(|e| format!(" / {}", e.describe()))
                                          .unwrap_or_default()));
        }
        if let Some(sampler) = &self.sampler {
            lines.push(format!("  sampler: {}", sampler.describe()));
        }
        if let Some(camera) = &self.camera {
            lines.push(format!("  camera: {}", camera.describe()));
        }
        if let Some(integrator) = &self.integrator {
            lines.push(format!("  integrator: {}", integrator.describe()));
        }
        lines.join("\n")
    }
}
