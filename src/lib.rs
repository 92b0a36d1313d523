//! Torus Frame - single-frame torus renderer
//!
//! Glue around [`torus_render`]: layered configuration and the `.mem`
//! output format consumed by hardware memory initializers.

pub mod config;
pub mod mem_file;

pub use torus_render::{Frame, FrameParams};
