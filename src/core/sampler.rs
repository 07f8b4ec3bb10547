// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::{ Float, Vector2f };

/// Stream of uniform samples in `[0, 1)`.
///
/// Every piece of code that needs randomness receives the stream explicitly;
/// parallel workers each `fork` a private stream.
pub trait Sampler: Send + Sync {
    fn next_1d(&mut self) -> Float;
    fn next_2d(&mut self) -> Vector2f;

    /// Independent stream for a worker, keyed by `stream`.
    fn fork(&self, stream: u64) -> Box<dyn Sampler>;

    fn describe(&self) -> String {
        String::from("Sampler")
    }
}

#[derive(Debug, Clone)]
pub struct IndependentSampler {
    seed: u64,
    rng: LcgRng,
}

impl IndependentSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: LcgRng::new(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for IndependentSampler {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Sampler for IndependentSampler {
    fn next_1d(&mut self) -> Float {
        self.rng.next_f32()
    }

    fn next_2d(&mut self) -> Vector2f {
        let x = self.rng.next_f32();
        let y = self.rng.next_f32();
        Vector2f::new(x, y)
    }

    fn fork(&self, stream: u64) -> Box<dyn Sampler> {
        // splitmix64 finalizer keeps nearby streams apart.
        let mut z = self.seed ^ stream.wrapping_mul(0x9E3779B97F4A7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^= z >> 31;
        Box::new(IndependentSampler { seed: self.seed, rng: LcgRng::new(z) })
    }

    fn describe(&self) -> String {
        format!("IndependentSampler[seed = {}]", self.seed)
    }
}
