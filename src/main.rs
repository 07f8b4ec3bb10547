// Copyright 2020 TwoCookingMice

use tartelette::core::sampler::IndependentSampler;
use tartelette::core::scene::{ Scene, SceneError, SceneObject };
use tartelette::core::settings::{ IntegratorKind, RenderSettings };
use tartelette::integrators::IntegratorType;
use tartelette::integrators::simple::SimpleIntegrator;
use tartelette::materials::Material;
use tartelette::materials::dielectric::DielectricBSDF;
use tartelette::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use tartelette::materials::microfacet::MicrofacetBSDF;
use tartelette::materials::mirror::MirrorBSDF;
use tartelette::math::constants::Vector3f;
use tartelette::math::spectrum::RGBSpectrum;
use tartelette::renderers::simple::{ SimpleRenderer, Renderer };
use tartelette::sensors::perspective::PerspectiveCamera;
use tartelette::shapes::rectangle::Rectangle;
use tartelette::shapes::sphere::Sphere;

use std::env;
use std::error::Error;
use std::sync::Arc;

fn integrator_for(settings: &RenderSettings) -> IntegratorType {
    match settings.integrator {
        IntegratorKind::Simple => IntegratorType::Simple(SimpleIntegrator::new(
            Vector3f::new(0.0, 3.5, 0.0), RGBSpectrum::splat(300.0))),
        IntegratorKind::Ao => IntegratorType::ao(settings.ao_samples),
        IntegratorKind::Whitted => IntegratorType::whitted(),
        IntegratorKind::PathEms => IntegratorType::path_ems(),
        IntegratorKind::PathMis => IntegratorType::path_mis(),
    }
}

// Floor and back wall, an overhead light panel and one sphere per material.
fn demo_scene(settings: &RenderSettings) -> Result<Scene, SceneError> {
    let mut scene = Scene::new();
    let white = || Material::from(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.75, 0.75, 0.75)));

    scene.add_object(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::zeros(),
                                Vector3f::new(0.0, 0.0, 6.0),
                                Vector3f::new(6.0, 0.0, 0.0))),
        white()).with_name("floor"));
    scene.add_object(SceneObject::new(
        Arc::new(Rectangle::new(Vector3f::new(0.0, 3.0, 4.0),
                                Vector3f::new(0.0, 3.0, 0.0),
                                Vector3f::new(6.0, 0.0, 0.0))),
        Material::from(LambertianDiffuseBSDF::new(RGBSpectrum::new(0.6, 0.3, 0.25)))).with_name("wall"));
    scene.add_object(SceneObject::with_emission(
        Arc::new(Rectangle::new(Vector3f::new(0.0, 4.5, 0.5),
                                Vector3f::new(1.0, 0.0, 0.0),
                                Vector3f::new(0.0, 0.0, 1.0))),
        white(), RGBSpectrum::new(12.0, 11.0, 9.0)).with_name("light"));

    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(-1.6, 0.8, 1.0), 0.8)),
        Material::from(DielectricBSDF::default())).with_name("glass"));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(0.2, 0.7, 2.0), 0.7)),
        Material::from(MicrofacetBSDF::new(0.2, 1.5046, 1.000277,
                                           RGBSpectrum::new(0.2, 0.35, 0.6))))
        .with_name("plastic"));
    scene.add_object(SceneObject::new(
        Arc::new(Sphere::new(Vector3f::new(1.7, 0.5, 0.6), 0.5)),
        Material::from(MirrorBSDF)).with_name("mirror"));

    scene.set_camera(Box::new(PerspectiveCamera::new(
        Vector3f::new(0.0, 1.6, -5.0),
        Vector3f::new(0.0, 1.0, 1.0),
        Vector3f::new(0.0, 1.0, 0.0),
        50f32.to_radians(),
        settings.width,
        settings.height)))?;
    scene.set_sampler(Box::new(IndependentSampler::new(settings.seed)))?;
    scene.set_integrator(integrator_for(settings))?;

    Ok(scene)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let settings = RenderSettings::parse_args(&args)?;
    log::info!("Settings: {:?}", settings);

    let mut scene = demo_scene(&settings)?;
    scene.activate()?;

    let renderer = SimpleRenderer::new(settings.spp);
    let image = renderer.render(&scene)?;

    let invalid = image.invalid_pixels();
    if invalid > 0 {
        log::warn!("{} pixels hold invalid radiance", invalid);
    }
    let mean = image.mean();
    log::info!("Mean radiance: r = {:.5}, g = {:.5}, b = {:.5}", mean[0], mean[1], mean[2]);

    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("Usage: tartelette [--integrator simple|ao|whitted|path_ems|path_mis] \
                   [--spp N] [--seed N] [--size WxH] [--ao-samples N]");
        std::process::exit(1);
    }
}
