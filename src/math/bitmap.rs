// Copyright 2020 @TwoCookingMice

use super::constants::Float;
use super::spectrum::RGBSpectrum;

use std::ops;
use std::vec::Vec;

/// Row-major RGB image, indexed by `(x, y)`.
#[derive(Debug, Clone)]
pub struct Bitmap {
    data: Vec<RGBSpectrum>,
    height: usize,
    width: usize
}

impl ops::Index<(usize, usize)> for Bitmap {
    type Output = RGBSpectrum;

    fn index(&self, index: (usize, usize)) -> &RGBSpectrum {
        &self.data[index.0 + self.width * index.1]
    }
}

impl ops::IndexMut<(usize, usize)> for Bitmap {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut RGBSpectrum {
        &mut self.data[index.0 + self.width * index.1]
    }
}

impl Bitmap {
    pub fn new(width: usize, height: usize) -> Self {
        let pixel_number = width * height;
        Self { data: vec!(RGBSpectrum::default(); pixel_number),
               width: width,
               height: height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGBSpectrum] {
        &self.data
    }

    /// Per-channel average over all pixels.
    pub fn mean(&self) -> RGBSpectrum {
        if self.data.is_empty() {
            return RGBSpectrum::default();
        }
        let sum: RGBSpectrum = self.data.iter().copied().sum();
        sum / self.data.len() as Float
    }

    /// Number of pixels holding a NaN, infinite or negative value.
    pub fn invalid_pixels(&self) -> usize {
        self.data.iter().filter(|p| !p.is_valid()).count()
    }
}

/* Test for Bitmap */
#[cfg(test)]
mod tests {
    use super::Bitmap;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_bitmap_basic_functions() {
        let mut bitmap = Bitmap::new(256usize, 128usize);
        assert_eq!(bitmap.width(), 256);
        assert_eq!(bitmap.height(), 128);

        bitmap[(5, 6)] = RGBSpectrum::new(1.0, 0.5, 0.6);
        assert_eq!(bitmap[(5, 6)][0], 1.0);
        assert_eq!(bitmap[(2, 6)][0], 0.0);
        assert_eq!(bitmap.pixels()[5 + 256 * 6], RGBSpectrum::new(1.0, 0.5, 0.6));
    }

    #[test]
    fn test_bitmap_mean_and_validity() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap[(0, 0)] = RGBSpectrum::splat(4.0);
        assert!((bitmap.mean()[1] - 1.0).abs() < 1e-6);
        assert_eq!(bitmap.invalid_pixels(), 0);

        bitmap[(1, 1)] = RGBSpectrum::new(std::f32::NAN, 0.0, 0.0);
        assert_eq!(bitmap.invalid_pixels(), 1);
        assert_eq!(Bitmap::new(0, 0).mean(), RGBSpectrum::default());
    }
}
