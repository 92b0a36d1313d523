//! Frame renderer
//!
//! Drives the pipeline: every (θ, φ) sample is rotated, projected, shaded
//! and quantized independently, then offered to the [`FrameBuffer`].
//!
//! With the `parallel` feature the θ rows are split into contiguous chunks
//! rendered into private buffers on the rayon pool. The partial buffers are
//! merged in ascending θ order, which resolves depth ties exactly as the
//! sequential render does, so both paths produce identical frames.

use std::ops::{AddAssign, Range};

use crate::camera::{Fragment, Orientation, Projection};
use crate::error::RenderError;
use crate::frame::{CommitOutcome, Frame, FrameBuffer};
use crate::params::FrameParams;
use crate::sampler::{SurfaceSample, SurfaceSampler};
use crate::shading::{luminance, Quantizer};

/// θ rows per parallel work item
#[cfg(feature = "parallel")]
const ROWS_PER_CHUNK: usize = 6;

/// Counters gathered while rendering
///
/// In a parallel render `accepted` and `occluded` count commits into the
/// partial buffers, so they can differ from a sequential render of the same
/// frame even though the frames are identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Surface samples evaluated
    pub samples: usize,
    /// Fragments that fell outside the raster
    pub clipped: usize,
    /// Fragments that passed the depth test
    pub accepted: usize,
    /// Fragments hidden behind an earlier, nearer fragment
    pub occluded: usize,
}

impl RenderStats {
    fn record(&mut self, outcome: CommitOutcome) {
        self.samples += 1;
        match outcome {
            CommitOutcome::Clipped => self.clipped += 1,
            CommitOutcome::Accepted => self.accepted += 1,
            CommitOutcome::Occluded => self.occluded += 1,
        }
    }
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.samples += other.samples;
        self.clipped += other.clipped;
        self.accepted += other.accepted;
        self.occluded += other.occluded;
    }
}

/// A validated, ready-to-run render
#[derive(Debug, Clone)]
pub struct Renderer {
    params: FrameParams,
    sampler: SurfaceSampler,
    orientation: Orientation,
    projection: Projection,
    quantizer: Quantizer,
}

impl Renderer {
    /// Prepare a render, rejecting invalid parameters
    pub fn new(params: FrameParams) -> Result<Self, RenderError> {
        let errors = params.validate();
        if !errors.is_empty() {
            return Err(RenderError::InvalidParams(errors));
        }

        let renderer = Self {
            sampler: SurfaceSampler::from_params(&params),
            orientation: Orientation::from_params(&params),
            projection: Projection::from_params(&params),
            quantizer: Quantizer::from_params(&params),
            params,
        };
        log::debug!(
            "Renderer ready: {}x{} raster, K1 = {:.4}, {} samples ({} x {})",
            renderer.params.width,
            renderer.params.height,
            renderer.projection.focal_scale,
            renderer.sampler.len(),
            renderer.sampler.theta_count(),
            renderer.sampler.phi_count(),
        );
        Ok(renderer)
    }

    #[inline]
    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    #[inline]
    pub fn sampler(&self) -> &SurfaceSampler {
        &self.sampler
    }

    /// Transform and shade one sample
    pub fn fragment(&self, sample: &SurfaceSample) -> Result<Fragment, RenderError> {
        let point = self.projection.project(sample, &self.orientation)?;
        Ok(Fragment {
            point,
            luminance: luminance(sample, &self.orientation),
        })
    }

    /// Render a range of θ rows into `buffer`
    pub fn render_rows(
        &self,
        rows: Range<usize>,
        buffer: &mut FrameBuffer,
        stats: &mut RenderStats,
    ) -> Result<(), RenderError> {
        for sample in self.sampler.rows(rows) {
            let fragment = self.fragment(&sample)?;
            let code = self.quantizer.quantize(fragment.luminance);
            stats.record(buffer.commit(fragment.point, code));
        }
        Ok(())
    }

    /// Render the whole frame on the current thread
    pub fn render(&self) -> Result<(FrameBuffer, RenderStats), RenderError> {
        let mut buffer = self.new_buffer();
        let mut stats = RenderStats::default();
        self.render_rows(0..self.sampler.theta_count(), &mut buffer, &mut stats)?;
        self.log_stats(&buffer, &stats);
        Ok((buffer, stats))
    }

    /// Render the whole frame on the rayon thread pool
    #[cfg(feature = "parallel")]
    pub fn render_parallel(&self) -> Result<(FrameBuffer, RenderStats), RenderError> {
        use rayon::prelude::*;

        let theta_count = self.sampler.theta_count();
        let chunks: Vec<Range<usize>> = (0..theta_count)
            .step_by(ROWS_PER_CHUNK)
            .map(|start| start..(start + ROWS_PER_CHUNK).min(theta_count))
            .collect();

        let partials = chunks
            .into_par_iter()
            .map(|rows| {
                let mut buffer = self.new_buffer();
                let mut stats = RenderStats::default();
                self.render_rows(rows, &mut buffer, &mut stats)?;
                Ok((buffer, stats))
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        // Merge in θ order so depth ties resolve as in a sequential render
        let mut buffer = self.new_buffer();
        let mut stats = RenderStats::default();
        for (partial, partial_stats) in &partials {
            buffer.merge(partial);
            stats += *partial_stats;
        }
        self.log_stats(&buffer, &stats);
        Ok((buffer, stats))
    }

    fn new_buffer(&self) -> FrameBuffer {
        FrameBuffer::new(self.params.width, self.params.height)
    }

    fn log_stats(&self, buffer: &FrameBuffer, stats: &RenderStats) {
        log::debug!(
            "Rendered {} samples: {} clipped, {} accepted, {} occluded; {} of {} pixels covered",
            stats.samples,
            stats.clipped,
            stats.accepted,
            stats.occluded,
            buffer.covered_pixels(),
            self.params.pixel_count(),
        );
    }
}

/// Render one frame sequentially
pub fn render_frame(params: &FrameParams) -> Result<Frame, RenderError> {
    let (buffer, _) = Renderer::new(params.clone())?.render()?;
    Ok(buffer.into_frame())
}

/// Render one frame on the rayon thread pool
///
/// Produces exactly the same frame as [`render_frame`].
#[cfg(feature = "parallel")]
pub fn render_frame_parallel(params: &FrameParams) -> Result<Frame, RenderError> {
    let (buffer, _) = Renderer::new(params.clone())?.render_parallel()?;
    Ok(buffer.into_frame())
}
