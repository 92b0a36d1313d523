//! Precomputed trigonometry

/// Sine and cosine of one angle, computed once and reused
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SinCos {
    pub sin: f64,
    pub cos: f64,
}

impl SinCos {
    /// Identity angle (0 radians)
    pub const ZERO: Self = Self { sin: 0.0, cos: 1.0 };

    /// Evaluate sine and cosine of `angle` (radians)
    #[inline]
    pub fn new(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { sin, cos }
    }
}
