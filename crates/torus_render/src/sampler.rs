//! Parametric surface sampling
//!
//! A torus is the surface swept by a circle of radius R1 (the tube) revolving
//! around the Y axis at distance R2. It is sampled on a regular (θ, φ) grid:
//! θ walks around the tube cross-section, φ around the revolution axis.
//!
//! The grid is deliberately denser than the raster so that every pixel the
//! torus covers receives at least one candidate sample.

use std::f64::consts::TAU;
use std::ops::Range;

use torus_math::{SinCos, Vec3};

use crate::params::{FrameParams, SampleGrid};

/// Torus radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    /// Tube radius R1
    pub tube_radius: f64,
    /// Revolution radius R2
    pub revolution_radius: f64,
}

impl Torus {
    pub fn new(tube_radius: f64, revolution_radius: f64) -> Self {
        Self { tube_radius, revolution_radius }
    }

    /// Cross-section circle point `(R2 + R1·cosθ, R1·sinθ)` before revolving
    #[inline]
    pub fn circle_point(&self, theta: SinCos) -> (f64, f64) {
        (
            self.revolution_radius + self.tube_radius * theta.cos,
            self.tube_radius * theta.sin,
        )
    }
}

/// One point on the torus surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    /// Angle around the tube cross-section
    pub theta: f64,
    /// Angle around the revolution axis
    pub phi: f64,
    pub theta_trig: SinCos,
    pub phi_trig: SinCos,
    /// Cross-section x offset (`circlex`)
    pub circle_x: f64,
    /// Cross-section y offset (`circley`)
    pub circle_y: f64,
}

impl SurfaceSample {
    /// Build the sample at (θ, φ) on `torus`
    pub fn new(torus: &Torus, theta: f64, phi: f64) -> Self {
        let theta_trig = SinCos::new(theta);
        let phi_trig = SinCos::new(phi);
        let (circle_x, circle_y) = torus.circle_point(theta_trig);
        Self { theta, phi, theta_trig, phi_trig, circle_x, circle_y }
    }

    /// Position before rotation: the cross-section point revolved by φ
    ///
    /// Reference form only. Rendering goes through the expanded rotation in
    /// [`Orientation::rotate`](crate::camera::Orientation::rotate), which
    /// this must agree with at A = B = 0.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.circle_x * self.phi_trig.cos,
            self.circle_y,
            self.circle_x * self.phi_trig.sin,
        )
    }

    /// Surface orientation proxy before rotation
    ///
    /// The cross-section direction `(cosθ, sinθ)` revolved by φ. It has unit
    /// length, but it is not renormalized after rotation. Reference form of
    /// the normal that [`luminance`](crate::shading::luminance) expands.
    pub fn normal(&self) -> Vec3 {
        Vec3::new(
            self.theta_trig.cos * self.phi_trig.cos,
            self.theta_trig.sin,
            self.theta_trig.cos * self.phi_trig.sin,
        )
    }
}

/// Largest number of samples along one axis of the grid
///
/// Bounds both the per-axis angle tables and the total sample count, which
/// stays below `2^31` even on 32-bit targets.
pub const MAX_STEPS_PER_TURN: usize = 1 << 15;

/// Whether `step` is positive, finite and coarse enough for the grid
pub fn step_within_limit(step: f64) -> bool {
    step.is_finite() && step > 0.0 && TAU / step <= MAX_STEPS_PER_TURN as f64
}

/// Angles `i * step` for every `i >= 0` with `i * step < 2π`
fn indexed_angles(step: f64) -> Vec<f64> {
    if !step_within_limit(step) {
        return Vec::new();
    }
    (0..=MAX_STEPS_PER_TURN)
        .map(|i| i as f64 * step)
        .take_while(|&angle| angle < TAU)
        .collect()
}

/// Angles of a running sum that advances by `step` before each sample and
/// `trailing_steps` more times after it, while the sum is below 2π
fn running_angles(step: f64, trailing_steps: usize) -> Vec<f64> {
    let mut angles = Vec::new();
    if !step_within_limit(step) {
        return angles;
    }
    let mut angle = 0.0;
    while angle < TAU {
        angle += step;
        angles.push(angle);
        for _ in 0..trailing_steps {
            angle += step;
        }
    }
    angles
}

/// Restartable (θ, φ) grid over a torus
///
/// With [`SampleGrid::Indexed`] θ and φ each advance from 0 up to, but not
/// including, 2π, and angles are computed as `index * step` so no error
/// accumulates along a row. [`SampleGrid::Legacy`] builds the angles as
/// running sums instead; see its documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSampler {
    torus: Torus,
    thetas: Vec<f64>,
    phis: Vec<f64>,
}

impl SurfaceSampler {
    /// Indexed grid with the given steps
    ///
    /// Steps that are not positive, not finite, or finer than
    /// [`MAX_STEPS_PER_TURN`] allows produce an empty sampler.
    pub fn new(torus: Torus, theta_step: f64, phi_step: f64) -> Self {
        Self::with_grid(torus, theta_step, phi_step, SampleGrid::Indexed)
    }

    pub fn with_grid(torus: Torus, theta_step: f64, phi_step: f64, grid: SampleGrid) -> Self {
        let (thetas, phis) = match grid {
            SampleGrid::Indexed => (indexed_angles(theta_step), indexed_angles(phi_step)),
            SampleGrid::Legacy => (running_angles(theta_step, 0), running_angles(phi_step, 1)),
        };
        Self { torus, thetas, phis }
    }

    pub fn from_params(params: &FrameParams) -> Self {
        Self::with_grid(
            Torus::new(params.tube_radius, params.revolution_radius),
            params.theta_step,
            params.phi_step,
            params.sample_grid,
        )
    }

    #[inline]
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// Number of θ rows
    #[inline]
    pub fn theta_count(&self) -> usize {
        self.thetas.len()
    }

    /// Number of φ samples per θ row
    #[inline]
    pub fn phi_count(&self) -> usize {
        self.phis.len()
    }

    /// Total number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.theta_count().saturating_mul(self.phi_count())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every sample, θ-major
    pub fn samples(&self) -> Samples<'_> {
        self.rows(0..self.theta_count())
    }

    /// Iterate over the samples of a contiguous range of θ rows
    ///
    /// The range is clamped to the available rows.
    pub fn rows(&self, rows: Range<usize>) -> Samples<'_> {
        let end = rows.end.min(self.theta_count());
        let start = rows.start.min(end);
        Samples {
            sampler: self,
            theta_index: start,
            theta_end: end,
            phi_index: 0,
            row: None,
        }
    }
}

/// Cached per-row values shared by every φ in a θ row
#[derive(Debug, Clone, Copy)]
struct Row {
    theta: f64,
    theta_trig: SinCos,
    circle_x: f64,
    circle_y: f64,
}

/// Iterator over a [`SurfaceSampler`]'s grid
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    sampler: &'a SurfaceSampler,
    theta_index: usize,
    theta_end: usize,
    phi_index: usize,
    row: Option<Row>,
}

impl Iterator for Samples<'_> {
    type Item = SurfaceSample;

    fn next(&mut self) -> Option<SurfaceSample> {
        let sampler = self.sampler;
        let phi_count = sampler.phi_count();
        if phi_count == 0 {
            return None;
        }
        if self.phi_index == phi_count {
            self.phi_index = 0;
            self.theta_index += 1;
            self.row = None;
        }
        if self.theta_index >= self.theta_end {
            return None;
        }

        let theta_index = self.theta_index;
        let row = *self.row.get_or_insert_with(|| {
            let theta = sampler.thetas[theta_index];
            let theta_trig = SinCos::new(theta);
            let (circle_x, circle_y) = sampler.torus.circle_point(theta_trig);
            Row { theta, theta_trig, circle_x, circle_y }
        });

        let phi = sampler.phis[self.phi_index];
        self.phi_index += 1;

        Some(SurfaceSample {
            theta: row.theta,
            phi,
            theta_trig: row.theta_trig,
            phi_trig: SinCos::new(phi),
            circle_x: row.circle_x,
            circle_y: row.circle_y,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let phi_count = self.sampler.phi_count();
        let remaining = if phi_count == 0 || self.theta_index >= self.theta_end {
            0
        } else {
            (self.theta_end - self.theta_index) * phi_count - self.phi_index
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}
