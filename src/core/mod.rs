// Copyright @yucwang 2021

pub mod bsdf;
pub mod bvh;
pub mod emitter;
pub mod integrator;
pub mod interaction;
pub mod rng;
pub mod sampler;
pub mod scene;
pub mod sensor;
pub mod settings;
pub mod shape;
