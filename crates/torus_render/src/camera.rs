//! Orientation and perspective projection
//!
//! The torus is spun by φ about the Y axis (that is what revolves the
//! cross-section), tilted by A about the X axis, then turned by B about the
//! viewing (Z) axis. The viewer sits at the origin looking down +Z with the
//! torus centre pushed out to `z = K2`.
//!
//! [`Orientation::rotate`] evaluates the expanded product of those rotations
//! directly from precomputed sines and cosines; [`Orientation::matrix`]
//! builds the same rotation from plane rotations and is kept for
//! verification and for callers that want the full matrix.

use torus_math::{mat3, Mat3, SinCos, Vec3};

use crate::error::RenderError;
use crate::params::{FrameParams, Rounding};
use crate::sampler::SurfaceSample;

/// Per-frame orientation: tilt A and spin B
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    pub a: SinCos,
    pub b: SinCos,
}

impl Orientation {
    /// Create an orientation from tilt `a` and spin `b` (radians)
    pub fn new(a: f64, b: f64) -> Self {
        Self { a: SinCos::new(a), b: SinCos::new(b) }
    }

    pub fn from_params(params: &FrameParams) -> Self {
        Self::new(params.angle_a, params.angle_b)
    }

    /// Rotate a sample's surface point into view space (before the K2 offset)
    #[inline]
    pub fn rotate(&self, sample: &SurfaceSample) -> Vec3 {
        let (a, b, phi) = (self.a, self.b, sample.phi_trig);
        let (cx, cy) = (sample.circle_x, sample.circle_y);

        Vec3::new(
            cx * (b.cos * phi.cos + a.sin * b.sin * phi.sin) - cy * a.cos * b.sin,
            cx * (b.sin * phi.cos - a.sin * b.cos * phi.sin) + cy * a.cos * b.cos,
            a.cos * cx * phi.sin + cy * a.sin,
        )
    }

    /// Full rotation for a given φ, applied to the unrevolved cross-section
    /// point `(circlex, circley, 0)`: revolve about Y, tilt about X, spin about Z
    ///
    /// Reference form of [`Orientation::rotate`]; rendering never builds it.
    pub fn matrix(&self, phi: SinCos) -> Mat3 {
        let revolve = mat3::plane_rotation(phi, 0, 2);
        let tilt = mat3::plane_rotation(self.a, 1, 2);
        let spin = mat3::plane_rotation(self.b, 0, 1);
        mat3::mul(spin, mat3::mul(tilt, revolve))
    }
}

/// A projected surface point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    /// Pixel column (may fall outside the raster)
    pub x: i64,
    /// Pixel row (may fall outside the raster)
    pub y: i64,
    /// Inverse depth `1 / z`; larger is nearer
    pub ooz: f64,
}

/// A projected and shaded sample, ready to commit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fragment {
    pub point: ScreenPoint,
    /// Unclamped luminance in `[-√2, √2]`
    pub luminance: f64,
}

/// Perspective projection onto the raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    /// Focal scale K1
    pub focal_scale: f64,
    /// Viewer distance K2
    pub viewer_distance: f64,
    pub rounding: Rounding,
}

impl Projection {
    pub fn from_params(params: &FrameParams) -> Self {
        Self {
            width: params.width,
            height: params.height,
            focal_scale: params.focal_scale(),
            viewer_distance: params.viewer_distance,
            rounding: params.rounding,
        }
    }

    /// Rotate and project one sample
    ///
    /// Raster rows grow downward, so the geometric y axis is flipped. Fails
    /// only if the transformed depth is exactly zero.
    pub fn project(
        &self,
        sample: &SurfaceSample,
        orientation: &Orientation,
    ) -> Result<ScreenPoint, RenderError> {
        let view = orientation.rotate(sample);
        // Summed left to right starting from K2
        let z = self.viewer_distance
            + orientation.a.cos * sample.circle_x * sample.phi_trig.sin
            + sample.circle_y * orientation.a.sin;
        if z == 0.0 {
            return Err(RenderError::DivideByZero { theta: sample.theta, phi: sample.phi });
        }
        let ooz = 1.0 / z;

        let half_w = self.width as f64 / 2.0;
        let half_h = self.height as f64 / 2.0;
        let x = self.rounding.apply(half_w + self.focal_scale * ooz * view.x);
        let y = self.rounding.apply(half_h - self.focal_scale * ooz * view.y);

        Ok(ScreenPoint { x: x as i64, y: y as i64, ooz })
    }
}
