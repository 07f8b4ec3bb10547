/* Copyright 2020 @Yuchen Wong */

pub type Float = f32;
pub type UInt = u32;

pub type Vector2f = nalgebra::Vector2<Float>;
pub type Vector3f = nalgebra::Vector3<Float>;

pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f32::consts::PI;
pub const INV_PI: Float = std::f32::consts::FRAC_1_PI;
pub const INV_TWO_PI: Float = 0.5 * std::f32::consts::FRAC_1_PI;
pub const INV_FOUR_PI: Float = 0.25 * std::f32::consts::FRAC_1_PI;

pub const FLOAT_MAX: Float = std::f32::MAX;
pub const FLOAT_MIN: Float = std::f32::MIN;
pub const FLOAT_INFINITY: Float = std::f32::INFINITY;
