// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f };

use std::ops;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0f32, 0.0f32, 0.0f32) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    pub fn from_vector(rgb: Vector3f) -> Self {
        Self { rgb }
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        self.rgb.iter().all(|c| *c == 0.0f32)
    }

    /// True when every channel is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.rgb.iter().all(|c| c.is_finite() && *c >= 0.0)
    }

    pub fn max_coeff(&self) -> Float {
        self.rgb.max()
    }

    pub fn luminance(&self) -> Float {
        0.212671 * self.rgb.x + 0.715160 * self.rgb.y + 0.072169 * self.rgb.z
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, idx: usize) -> &Float {
        &self.rgb[idx]
    }
}

impl ops::IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, idx: usize) -> &mut Float {
        &mut self.rgb[idx]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: Self) {
        self.rgb += rhs.rgb;
    }
}

impl ops::Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { rgb: self.rgb - rhs.rgb }
    }
}

impl ops::Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, rhs: Float) -> Self {
        Self { rgb: self.rgb * rhs }
    }
}

impl ops::Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: rhs.rgb * self }
    }
}

impl ops::MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, rhs: Float) {
        self.rgb *= rhs;
    }
}

impl ops::Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, rhs: Float) -> Self {
        Self { rgb: self.rgb / rhs }
    }
}

impl std::iter::Sum for RGBSpectrum {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(RGBSpectrum::default(), |acc, s| acc + s)
    }
}
