//! Frame parameters and validation
//!
//! [`FrameParams`] gathers every input of a single render: raster size, torus
//! radii, orientation, viewer distance, sampling steps and quantizer range.
//! [`FrameParams::validate`] checks for degenerate values before any sampling
//! starts, so a zero or vanishingly small step can never turn the sampler
//! into an endless loop.

use serde::{Deserialize, Serialize};

use crate::sampler::{step_within_limit, MAX_STEPS_PER_TURN};

/// Largest code that still fits in one hex digit of the output stream
pub const MAX_HEX_CODE: u8 = 15;

/// How continuous values are turned into integers
///
/// Applies to both pixel projection and luminance quantization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Round half away from zero
    #[default]
    Nearest,
    /// Truncate toward zero, as legacy `.mem` generators do
    Truncate,
}

impl Rounding {
    /// Round `value` according to this mode
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Nearest => value.round(),
            Rounding::Truncate => value.trunc(),
        }
    }
}

/// How the (θ, φ) sampling grid is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleGrid {
    /// `index * step` from 0 up to, but not including, 2π
    #[default]
    Indexed,
    /// Running sums as written by legacy `.mem` generators
    ///
    /// θ advances by one step before each row, so the first row is at θ =
    /// step and the last may pass 2π. φ restarts at 0 on every row and
    /// advances one step before each sample and one more after it, so the
    /// samples sit at step, 3·step, 5·step, ... Together with
    /// [`Rounding::Truncate`] this reproduces those files bit for bit.
    Legacy,
}

/// Every input of a single frame render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameParams {
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// Tube (cross-section) radius R1
    pub tube_radius: f64,
    /// Revolution radius R2
    pub revolution_radius: f64,
    /// Tilt angle A in radians
    pub angle_a: f64,
    /// Spin angle B in radians
    pub angle_b: f64,
    /// Viewer distance K2
    pub viewer_distance: f64,
    /// Fit factor c in `K1 = width * K2 / (c * (R1 + R2))`
    pub fit_factor: f64,
    /// Angular step around the tube cross-section
    pub theta_step: f64,
    /// Angular step around the revolution axis
    pub phi_step: f64,
    /// Largest quantized brightness code
    pub max_code: u8,
    /// Luminance mapped to `max_code` (theoretical maximum is √2)
    pub luminance_max: f64,
    /// Rounding used for projection and quantization
    pub rounding: Rounding,
    /// Layout of the sampling grid
    pub sample_grid: SampleGrid,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
            tube_radius: 1.0,
            revolution_radius: 2.0,
            angle_a: 1.0,
            angle_b: 1.0,
            viewer_distance: 5.0,
            fit_factor: 4.0,
            theta_step: 0.07,
            phi_step: 0.02,
            max_code: MAX_HEX_CODE,
            luminance_max: 1.41,
            rounding: Rounding::Nearest,
            sample_grid: SampleGrid::Indexed,
        }
    }
}

impl FrameParams {
    /// The reference frame exactly as legacy `.mem` generators produce it
    pub fn legacy() -> Self {
        Self {
            rounding: Rounding::Truncate,
            sample_grid: SampleGrid::Legacy,
            ..Self::default()
        }
    }

    /// Number of pixels in the raster
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Focal scale K1, chosen so the projected torus fits the raster width
    pub fn focal_scale(&self) -> f64 {
        self.width as f64 * self.viewer_distance
            / (self.fit_factor * (self.tube_radius + self.revolution_radius))
    }

    /// Validate the parameters, returning all errors found
    ///
    /// Returns an empty vector when the parameters are renderable. A tube
    /// radius larger than the revolution radius is accepted (the surface
    /// self-intersects), as is a viewer close enough to put part of the torus
    /// behind it.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.width == 0 || self.height == 0 {
            errors.push(ValidationError::EmptyRaster {
                width: self.width,
                height: self.height,
            });
        }

        let positive = [
            ("tube_radius", self.tube_radius),
            ("revolution_radius", self.revolution_radius),
            ("viewer_distance", self.viewer_distance),
            ("fit_factor", self.fit_factor),
            ("theta_step", self.theta_step),
            ("phi_step", self.phi_step),
            ("luminance_max", self.luminance_max),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ValidationError::NotPositive { name, value });
            }
        }

        for (name, value) in [("theta_step", self.theta_step), ("phi_step", self.phi_step)] {
            if value.is_finite() && value > 0.0 && !step_within_limit(value) {
                errors.push(ValidationError::StepTooFine { name, value });
            }
        }

        for (name, value) in [("angle_a", self.angle_a), ("angle_b", self.angle_b)] {
            if !value.is_finite() {
                errors.push(ValidationError::NonFiniteAngle { name, value });
            }
        }

        if self.max_code == 0 || self.max_code > MAX_HEX_CODE {
            errors.push(ValidationError::MaxCodeOutOfRange(self.max_code));
        }

        errors
    }
}

/// Problem found in a [`FrameParams`]
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Width or height is zero
    EmptyRaster { width: usize, height: usize },
    /// A quantity that must be finite and strictly positive is not
    NotPositive { name: &'static str, value: f64 },
    /// A sampling step gives more than [`MAX_STEPS_PER_TURN`] samples per turn
    StepTooFine { name: &'static str, value: f64 },
    /// An orientation angle is NaN or infinite
    NonFiniteAngle { name: &'static str, value: f64 },
    /// Max code is zero or does not fit in one hex digit
    MaxCodeOutOfRange(u8),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyRaster { width, height } => {
                write!(f, "Raster must be non-empty, got {}x{}", width, height)
            }
            ValidationError::NotPositive { name, value } => {
                write!(f, "{} must be finite and positive, got {}", name, value)
            }
            ValidationError::StepTooFine { name, value } => {
                write!(
                    f,
                    "{} of {} gives more than {} samples per turn",
                    name, value, MAX_STEPS_PER_TURN
                )
            }
            ValidationError::NonFiniteAngle { name, value } => {
                write!(f, "{} must be finite, got {}", name, value)
            }
            ValidationError::MaxCodeOutOfRange(code) => {
                write!(f, "max_code must be in 1..={}, got {}", MAX_HEX_CODE, code)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
