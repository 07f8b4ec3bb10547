// Copyright @yucwang 2023

use super::constants::{ INV_FOUR_PI, INV_PI, INV_TWO_PI, PI, Float, Vector2f, Vector3f };

pub fn square_to_uniform_square(u: &Vector2f) -> Vector2f {
    *u
}

pub fn square_to_uniform_square_pdf(p: &Vector2f) -> Float {
    if p.x >= 0.0 && p.x <= 1.0 && p.y >= 0.0 && p.y <= 1.0 {
        1.0
    } else {
        0.0
    }
}

// Inverse CDF of the triangle 1 - |t| on [-1, 1].
fn interval_to_tent(u: Float) -> Float {
    if u < 0.5 {
        1.0 - (2.0 * u).sqrt()
    } else {
        (2.0 * (u - 0.5)).sqrt() - 1.0
    }
}

fn tent(t: Float) -> Float {
    if t >= -1.0 && t <= 1.0 {
        1.0 - t.abs()
    } else {
        0.0
    }
}

pub fn square_to_tent(u: &Vector2f) -> Vector2f {
    Vector2f::new(interval_to_tent(u.x), interval_to_tent(u.y))
}

pub fn square_to_tent_pdf(p: &Vector2f) -> Float {
    tent(p.x) * tent(p.y)
}

pub fn square_to_uniform_disk(u: &Vector2f) -> Vector2f {
    let r = u.x.sqrt();
    let theta = 2.0 * PI * u.y;
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vector2f::new(r * cos_theta, r * sin_theta)
}

pub fn square_to_uniform_disk_pdf(p: &Vector2f) -> Float {
    if p.x * p.x + p.y * p.y <= 1.0 {
        INV_PI
    } else {
        0.0
    }
}

/// Shirley-Chiu concentric mapping of the square onto the unit disk.
pub fn square_to_uniform_disk_concentric(u: &Vector2f) -> Vector2f {
    let r1: Float = 2.0 * u.x - 1.0;
    let r2: Float = 2.0 * u.y - 1.0;

    let phi: Float;
    let r:   Float;

    if r1 == 0. && r2 == 0. {
        r = 0.0;
        phi = 0.0;
    } else if r1 * r1 > r2 * r2 {
        r = r1;
        phi = (PI / 4.0) * (r2 / r1);
    } else {
        r = r2;
        phi = (PI / 2.0) - (r1 / r2) * (PI / 4.0);
    }

    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

pub fn square_to_uniform_sphere(u: &Vector2f) -> Vector3f {
    let z: Float = 1.0 - 2.0 * u.x;
    let r: Float = (1.0 - z * z).max(0.0).sqrt();
    let phi: Float = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn square_to_uniform_sphere_pdf(_v: &Vector3f) -> Float {
    INV_FOUR_PI
}

pub fn square_to_uniform_hemisphere(u: &Vector2f) -> Vector3f {
    let z: Float = u.x;
    let r: Float = (1.0 - z * z).max(0.0).sqrt();
    let phi: Float = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector3f::new(r * cos_phi, r * sin_phi, z)
}

pub fn square_to_uniform_hemisphere_pdf(v: &Vector3f) -> Float {
    if v.z >= 0.0 {
        INV_TWO_PI
    } else {
        0.0
    }
}

pub fn square_to_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let p = square_to_uniform_disk_concentric(u);
    let z = (1.0 - p.x * p.x - p.y * p.y).max(0.0).sqrt();

    Vector3f::new(p.x, p.y, z)
}

pub fn square_to_cosine_hemisphere_pdf(v: &Vector3f) -> Float {
    if v.z >= 0.0 {
        v.z * INV_PI
    } else {
        0.0
    }
}

/// Samples a microfacet normal proportional to `D(m) cos(theta_m)` for the
/// Beckmann distribution with roughness `alpha`.
pub fn square_to_beckmann(u: &Vector2f, alpha: Float) -> Vector3f {
    let alpha = alpha.max(1e-4);
    let phi = 2.0 * PI * u.x;
    let tan2_theta = -alpha * alpha * (1.0 - u.y).ln();
    let theta = tan2_theta.max(0.0).sqrt().atan();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

pub fn square_to_beckmann_pdf(m: &Vector3f, alpha: Float) -> Float {
    let cos_theta = m.z;
    if cos_theta <= 0.0 {
        return 0.0;
    }

    let alpha = alpha.max(1e-4);
    let alpha2 = alpha * alpha;
    let cos2_theta = cos_theta * cos_theta;
    let tan2_theta = (1.0 - cos2_theta).max(0.0) / cos2_theta;
    let cos3_theta = cos2_theta * cos_theta;

    let pdf = (-tan2_theta / alpha2).exp() / (PI * alpha2 * cos3_theta);
    if pdf.is_finite() {
        pdf
    } else {
        0.0
    }
}
