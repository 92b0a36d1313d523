//! Lambertian shading and brightness quantization

use torus_math::Vec3;

use crate::camera::Orientation;
use crate::params::{FrameParams, Rounding};
use crate::sampler::SurfaceSample;

/// Fixed light direction in view space (up and toward the viewer)
///
/// Not normalized; together with the unit surface normal this bounds
/// luminance to `[-√2, √2]`.
pub const LIGHT_DIR: Vec3 = Vec3::new(0.0, 1.0, -1.0);

/// Luminance of a sample under `orientation`
///
/// Dot product of the rotated surface normal with [`LIGHT_DIR`], expanded
/// in closed form. Not clamped.
#[inline]
pub fn luminance(sample: &SurfaceSample, orientation: &Orientation) -> f64 {
    let (a, b) = (orientation.a, orientation.b);
    let (theta, phi) = (sample.theta_trig, sample.phi_trig);

    phi.cos * theta.cos * b.sin - a.cos * theta.cos * phi.sin - a.sin * theta.sin
        + b.cos * (a.cos * theta.sin - theta.cos * a.sin * phi.sin)
}

/// Maps luminance to integer brightness codes in `0..=max_code`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantizer {
    pub max_code: u8,
    /// Luminance mapped to `max_code`
    pub luminance_max: f64,
    pub rounding: Rounding,
}

impl Quantizer {
    pub fn from_params(params: &FrameParams) -> Self {
        Self {
            max_code: params.max_code,
            luminance_max: params.luminance_max,
            rounding: params.rounding,
        }
    }

    /// Quantize one luminance value
    ///
    /// Surfaces facing away from the light or edge-on to it (`L <= 0`) are
    /// unlit and map to 0. Values past `luminance_max` clamp to `max_code`.
    pub fn quantize(&self, luminance: f64) -> u8 {
        if luminance.is_nan() || luminance <= 0.0 {
            return 0;
        }
        let max = f64::from(self.max_code);
        let scaled = self.rounding.apply(luminance / self.luminance_max * max);
        scaled.clamp(0.0, max) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::Torus;
    use torus_math::mat3;

    fn reference_quantizer() -> Quantizer {
        Quantizer::from_params(&FrameParams::default())
    }

    #[test]
    fn test_luminance_matches_rotated_normal() {
        let torus = Torus::new(1.0, 2.0);
        let orientation = Orientation::new(1.0, 1.0);
        for &(theta, phi) in &[(0.0, 0.0), (1.3, 0.4), (5.0, 3.3), (2.2, 6.0)] {
            let sample = SurfaceSample::new(&torus, theta, phi);
            let cross_section = Vec3::new(sample.theta_trig.cos, sample.theta_trig.sin, 0.0);
            let normal = mat3::transform(orientation.matrix(sample.phi_trig), cross_section);
            let expected = normal.dot(LIGHT_DIR);
            assert!((luminance(&sample, &orientation) - expected).abs() < 1e-9,
                "theta={} phi={}", theta, phi);
        }
    }

    #[test]
    fn test_luminance_bounded() {
        let torus = Torus::new(1.0, 2.0);
        let orientation = Orientation::new(0.6, 2.4);
        let bound = 2f64.sqrt() + 1e-12;
        for i in 0..60 {
            for j in 0..60 {
                let sample = SurfaceSample::new(&torus, i as f64 * 0.105, j as f64 * 0.105);
                assert!(luminance(&sample, &orientation).abs() <= bound);
            }
        }
    }

    #[test]
    fn test_unlit_floor() {
        let q = reference_quantizer();
        assert_eq!(q.quantize(0.0), 0);
        assert_eq!(q.quantize(-0.001), 0);
        assert_eq!(q.quantize(-1.41), 0);
        assert_eq!(q.quantize(f64::NAN), 0);
    }

    #[test]
    fn test_full_brightness_clamps() {
        let q = reference_quantizer();
        assert_eq!(q.quantize(1.41), 15);
        // √2 exceeds the 1.41 approximation
        assert_eq!(q.quantize(2f64.sqrt()), 15);
        assert_eq!(q.quantize(100.0), 15);
    }

    #[test]
    fn test_nearest_vs_truncate() {
        let nearest = reference_quantizer();
        let truncate = Quantizer { rounding: Rounding::Truncate, ..nearest };
        // 0.7 / 1.41 * 15 = 7.446...
        assert_eq!(nearest.quantize(0.7), 7);
        assert_eq!(truncate.quantize(0.7), 7);
        // 0.75 / 1.41 * 15 = 7.978...
        assert_eq!(nearest.quantize(0.75), 8);
        assert_eq!(truncate.quantize(0.75), 7);
        // tiny positive luminance rounds down to unlit
        assert_eq!(nearest.quantize(0.01), 0);
    }

    #[test]
    fn test_codes_monotonic_and_in_range() {
        let q = reference_quantizer();
        let mut previous = 0;
        for i in 0..=200 {
            let code = q.quantize(-1.5 + i as f64 * 0.015);
            assert!(code <= 15);
            assert!(code >= previous);
            previous = code;
        }
    }

    #[test]
    fn test_narrow_code_range() {
        let q = Quantizer { max_code: 3, ..reference_quantizer() };
        assert_eq!(q.quantize(1.41), 3);
        assert_eq!(q.quantize(0.7), 1);
    }
}
