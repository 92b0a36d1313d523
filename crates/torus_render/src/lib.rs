//! Torus Frame Rendering Library
//!
//! Renders one still frame of a rotating torus into a grid of small
//! brightness codes.
//!
//! ## Pipeline
//!
//! - [`sampler::SurfaceSampler`] - Walks (θ, φ) over the torus surface
//! - [`camera::Orientation`] / [`camera::Projection`] - Rotation and perspective projection
//! - [`shading::luminance`] / [`shading::Quantizer`] - Lambertian shading to integer codes
//! - [`frame::FrameBuffer`] - Depth-tested frame assembly
//! - [`renderer::Renderer`] - Drives the pipeline, sequentially or in parallel
//!
//! Data flows strictly forward; only the [`frame::FrameBuffer`] holds mutable state.

pub mod error;
pub mod params;
pub mod sampler;
pub mod camera;
pub mod shading;
pub mod frame;
pub mod renderer;

pub use error::RenderError;
pub use params::{FrameParams, Rounding, SampleGrid, ValidationError};
pub use sampler::{SurfaceSample, SurfaceSampler, Torus, MAX_STEPS_PER_TURN};
pub use camera::{Fragment, Orientation, Projection, ScreenPoint};
pub use shading::{luminance, Quantizer, LIGHT_DIR};
pub use frame::{CommitOutcome, Frame, FrameBuffer};
pub use renderer::{render_frame, Renderer, RenderStats};

#[cfg(feature = "parallel")]
pub use renderer::render_frame_parallel;

// Re-export math types used in the public API
pub use torus_math::{SinCos, Vec3};
