//! 3x3 Matrix utilities for rigid rotations
//!
//! Rotations are built one plane at a time and composed with [`mul`]. The
//! renderer's closed-form projection and shading formulas are the expanded
//! product of these matrices, so this module doubles as their reference:
//! the render path never builds a matrix, and the renderer's tests check the
//! closed forms against it.

use crate::{SinCos, Vec3};

/// 3x3 matrix type (column-major: `m[col][row]`)
pub type Mat3 = [[f64; 3]; 3];

/// Identity matrix
pub const IDENTITY: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// Positive angles turn axis `p1` toward axis `p2`.
///
/// # Arguments
/// * `angle` - Precomputed sine/cosine of the rotation angle
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
///
/// # Example
/// ```
/// use torus_math::{mat3::plane_rotation, SinCos};
/// // Tilt about the X axis (Y toward Z)
/// let tilt = plane_rotation(SinCos::new(0.5), 1, 2);
/// ```
pub fn plane_rotation(angle: SinCos, p1: usize, p2: usize) -> Mat3 {
    let mut m = IDENTITY;

    m[p1][p1] = angle.cos;
    m[p2][p2] = angle.cos;
    m[p1][p2] = angle.sin;
    m[p2][p1] = -angle.sin;

    m
}

/// Multiply two 3x3 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat3, b: Mat3) -> Mat3 {
    let mut result = [[0.0f64; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a Vec3 by a 3x3 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat3, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z,
    )
}
