// Copyright @yucwang 2021

use crate::core::integrator::Integrator;
use crate::core::sampler::{ IndependentSampler, Sampler };
use crate::core::scene::{ Scene, SceneError };
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{ Float, Vector2f };
use crate::math::spectrum::RGBSpectrum;
use indicatif::{ ProgressBar, ProgressStyle };
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

pub use super::renderer::Renderer;

const DEFAULT_BLOCK_SIZE: usize = 32;

/// Splits the film into square blocks and renders them on all cores. Each
/// block draws from its own fork of the scene's sampler, so the image does
/// not depend on which thread picked up which block.
pub struct SimpleRenderer {
    spp: u32,
    block_size: usize,
    show_progress: bool,
}

struct Block {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    pixels: Vec<RGBSpectrum>,
}

impl SimpleRenderer {
    pub fn new(spp: u32) -> Self {
        Self { spp: spp.max(1), block_size: DEFAULT_BLOCK_SIZE, show_progress: true }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn render_block(&self,
                    scene: &Scene,
                    camera: &dyn Sensor,
                    integrator: &dyn Integrator,
                    sampler: &mut dyn Sampler,
                    (x0, y0, x1, y1): (usize, usize, usize, usize)) -> Block {
        let width = camera.width() as Float;
        let height = camera.height() as Float;
        let inv_spp = 1.0 / self.spp as Float;

        let mut pixels = vec![RGBSpectrum::default(); (x1 - x0) * (y1 - y0)];
        for y in y0..y1 {
            for x in x0..x1 {
                let mut color = RGBSpectrum::default();
                for _sample in 0..self.spp {
                    let jitter = sampler.next_2d();
                    let film = Vector2f::new((x as Float + jitter.x) / width,
                                             (y as Float + jitter.y) / height);
                    let ray = camera.sample_ray(&film);
                    let value = integrator.li(scene, sampler, &ray);
                    if value.is_valid() {
                        color += value;
                    }
                }
                pixels[(x - x0) + (x1 - x0) * (y - y0)] = color * inv_spp;
            }
        }

        Block { x0, y0, x1, y1, pixels }
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene) -> Result<Bitmap, SceneError> {
        let camera = scene.camera().ok_or(SceneError::MissingCamera)?;
        let integrator = scene.integrator().ok_or(SceneError::MissingIntegrator)?;
        let fallback = IndependentSampler::default();
        let base_sampler: &dyn Sampler = scene.sampler().unwrap_or(&fallback);

        let (width, height) = (camera.width(), camera.height());
        let mut bitmap = Bitmap::new(width, height);
        if width == 0 || height == 0 {
            return Ok(bitmap);
        }

        let block_size = self.block_size;
        let blocks_x = (width + block_size - 1) / block_size;
        let blocks_y = (height + block_size - 1) / block_size;
        let total_blocks = blocks_x * blocks_y;

        let progress = if self.show_progress {
            ProgressBar::new(total_blocks as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = AtomicUsize::new(0);
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(total_blocks);
        log::info!("Rendering {}x{} at {} spp: {} blocks on {} threads",
                   width, height, self.spp, total_blocks, thread_count);
        let start = Instant::now();

        let (tx, rx) = mpsc::channel::<Block>();
        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = &next_block;
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * block_size;
                        let y0 = (block_index / blocks_x) * block_size;
                        let x1 = (x0 + block_size).min(width);
                        let y1 = (y0 + block_size).min(height);

                        let mut sampler = base_sampler.fork(block_index as u64);
                        let block = self.render_block(scene, camera, integrator,
                                                      sampler.as_mut(), (x0, y0, x1, y1));
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for block in rx.iter() {
                let block_width = block.x1 - block.x0;
                for y in block.y0..block.y1 {
                    for x in block.x0..block.x1 {
                        bitmap[(x, y)] = block.pixels[(x - block.x0) + block_width * (y - block.y0)];
                    }
                }
                progress.inc(1);
            }
        });
        progress.finish_and_clear();
        log::info!("Rendering finished in {:.2?}", start.elapsed());

        Ok(bitmap)
    }
}
