// Copyright @yucwang 2026

use crate::core::bsdf::{ BSDFQueryRecord, BSDFValue, Measure, BSDF };
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::frame::Frame;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ square_to_beckmann, square_to_beckmann_pdf, square_to_cosine_hemisphere };

/// Unpolarized Fresnel reflectance. `cos_theta_i` is measured against the
/// normal on the exterior side; a negative value means the light arrives from
/// inside and the indices are swapped.
pub fn fresnel_dielectric(cos_theta_i: Float, ext_ior: Float, int_ior: Float) -> Float {
    if ext_ior == int_ior {
        return 0.0;
    }

    let mut cos_i = cos_theta_i.max(-1.0).min(1.0);
    let (eta_i, eta_t) = if cos_i < 0.0 {
        cos_i = -cos_i;
        (int_ior, ext_ior)
    } else {
        (ext_ior, int_ior)
    };

    let eta = eta_i / eta_t;
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i).max(0.0);
    if sin2_t > 1.0 {
        return 1.0;
    }
    let cos_t = (1.0 - sin2_t).sqrt();

    let r_s = (eta_i * cos_i - eta_t * cos_t) / (eta_i * cos_i + eta_t * cos_t);
    let r_p = (eta_t * cos_i - eta_i * cos_t) / (eta_t * cos_i + eta_i * cos_t);
    0.5 * (r_s * r_s + r_p * r_p)
}

/// Mirror reflection of an incoming ray direction about `n`.
pub fn reflect(wi: &Vector3f, n: &Vector3f) -> Vector3f {
    wi - 2.0 * wi.dot(n) * n
}

/// Snell refraction of an incoming ray direction through the interface with
/// outward normal `n`, `eta = ext_ior / int_ior`. Returns the zero vector on
/// total internal reflection.
pub fn refract(wi: &Vector3f, n: &Vector3f, eta: Float) -> Vector3f {
    let mut cos_i = n.dot(wi).max(-1.0).min(1.0);
    let mut eta = eta;
    let mut normal = *n;

    if cos_i < 0.0 {
        cos_i = -cos_i;
    } else {
        eta = 1.0 / eta;
        normal = -normal;
    }

    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return Vector3f::zeros();
    }
    eta * wi + (eta * cos_i - k.sqrt()) * normal
}

// Chi+ of the microfacet side test.
fn chi_plus(c: Float) -> Float {
    if c > 0.0 { 1.0 } else { 0.0 }
}

/// Smith shadowing-masking for one direction, rational fit of the Beckmann
/// term below `b = 1.6` and its asymptote above.
pub fn beckmann_g1(alpha: Float, v: &Vector3f, m: &Vector3f) -> Float {
    let cos_v = Frame::cos_theta(v);
    let v_dot_m = v.dot(m);
    if v_dot_m * cos_v <= 0.0 {
        return 0.0;
    }

    let tan_theta = Frame::tan_theta(v).abs();
    if tan_theta == 0.0 {
        return 1.0;
    }

    let b = 1.0 / (alpha * tan_theta);
    let c = chi_plus(v_dot_m / cos_v);
    if b < 1.6 {
        c * (3.535 * b + 2.181 * b * b) / (1.0 + 2.276 * b + 2.577 * b * b)
    } else {
        c
    }
}

/// Diffuse base plus a Beckmann specular lobe, energy split as
/// `ks = 1 - max(kd)`.
pub struct MicrofacetBSDF {
    alpha: Float,
    int_ior: Float,
    ext_ior: Float,
    kd: RGBSpectrum,
    ks: Float,
}

impl MicrofacetBSDF {
    pub fn new(alpha: Float, int_ior: Float, ext_ior: Float, kd: RGBSpectrum) -> Self {
        Self {
            alpha,
            int_ior,
            ext_ior,
            kd,
            ks: 1.0 - kd.max_coeff(),
        }
    }

    pub fn alpha(&self) -> Float {
        self.alpha
    }

    pub fn kd(&self) -> RGBSpectrum {
        self.kd
    }

    pub fn ks(&self) -> Float {
        self.ks
    }

    fn is_upper(record: &BSDFQueryRecord) -> bool {
        record.measure == Measure::SolidAngle
            && Frame::cos_theta(&record.wi) > 0.0
            && Frame::cos_theta(&record.wo) > 0.0
    }

    fn half_vector(record: &BSDFQueryRecord) -> Option<Vector3f> {
        let h = record.wi + record.wo;
        let len = h.norm();
        if len > 0.0 { Some(h / len) } else { None }
    }
}

impl Default for MicrofacetBSDF {
    fn default() -> Self {
        Self::new(0.1, 1.5046, 1.000277, RGBSpectrum::splat(0.5))
    }
}

impl BSDF for MicrofacetBSDF {
    fn eval(&self, record: &BSDFQueryRecord) -> BSDFValue {
        if !Self::is_upper(record) {
            return BSDFValue::default();
        }
        let wh = match Self::half_vector(record) {
            Some(wh) => wh,
            None => return BSDFValue::default(),
        };

        let cos_i = Frame::cos_theta(&record.wi);
        let cos_o = Frame::cos_theta(&record.wo);
        let cos_h = Frame::cos_theta(&wh);

        let d = square_to_beckmann_pdf(&wh, self.alpha);
        let f = fresnel_dielectric(wh.dot(&record.wi), self.ext_ior, self.int_ior);
        let g = beckmann_g1(self.alpha, &record.wi, &wh) * beckmann_g1(self.alpha, &record.wo, &wh);

        let diffuse = self.kd * INV_PI;
        let denom = 4.0 * cos_i * cos_o * cos_h;
        if denom <= 0.0 {
            return diffuse;
        }
        let specular = self.ks * d * f * g / denom;
        if !specular.is_finite() {
            return diffuse;
        }

        diffuse + BSDFValue::splat(specular)
    }

    fn pdf(&self, record: &BSDFQueryRecord) -> Float {
        if !Self::is_upper(record) {
            return 0.0;
        }
        let wh = match Self::half_vector(record) {
            Some(wh) => wh,
            None => return 0.0,
        };

        let diffuse = (1.0 - self.ks) * Frame::cos_theta(&record.wo) * INV_PI;

        // Jacobian of the half-vector mapping.
        let h_dot_o = wh.dot(&record.wo);
        if h_dot_o <= 0.0 {
            return diffuse;
        }
        let specular = self.ks * square_to_beckmann_pdf(&wh, self.alpha) / (4.0 * h_dot_o);

        specular + diffuse
    }

    fn sample(&self, record: &mut BSDFQueryRecord, u: &Vector2f) -> BSDFValue {
        record.measure = Measure::SolidAngle;

        // The Beckmann vector itself is taken as the outgoing direction.
        record.wo = if u.x < self.ks {
            let x = u.x / self.ks;
            square_to_beckmann(&Vector2f::new(x, u.y), self.alpha)
        } else {
            let x = ((u.x - self.ks) / (1.0 - self.ks)).min(1.0);
            square_to_cosine_hemisphere(&Vector2f::new(x, u.y))
        };

        // Relative index of refraction: no change.
        record.eta = 1.0;

        let cos_o = Frame::cos_theta(&record.wo);
        if cos_o <= 0.0 {
            return BSDFValue::default();
        }

        let pdf = self.pdf(record);
        if pdf <= 0.0 || !pdf.is_finite() {
            return BSDFValue::default();
        }
        let weight = self.eval(record) * (cos_o / pdf);
        if weight.is_valid() { weight } else { BSDFValue::default() }
    }

    fn is_diffuse(&self) -> bool {
        // Not perfectly diffuse, but handled by the non-specular strategies.
        true
    }

    fn describe(&self) -> String {
        format!("MicrofacetBSDF[alpha = {}, intIOR = {}, extIOR = {}, kd = {:?}, ks = {}]",
                self.alpha, self.int_ior, self.ext_ior, self.kd, self.ks)
    }
}
