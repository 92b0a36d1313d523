//! 3D Mathematics Library
//!
//! Small, dependency-light math types used by the torus renderer.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat3`] - 3x3 matrix for rotations (column-major)
//! - [`SinCos`] - Precomputed sine and cosine of an angle

mod vec3;
mod trig;
pub mod mat3;

pub use vec3::Vec3;
pub use trig::SinCos;
pub use mat3::Mat3;
