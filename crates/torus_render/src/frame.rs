//! Depth-tested frame assembly
//!
//! [`FrameBuffer`] owns the inverse-depth buffer and the brightness-code
//! buffer together; the only way to write either is [`FrameBuffer::commit`],
//! which updates both or neither. Once sampling is done the depth buffer is
//! dropped and the codes become a read-only [`Frame`].
//!
//! Both grids are row-major: pixel (x, y) lives at `y * width + x`.

use crate::camera::ScreenPoint;

/// Result of offering one fragment to a [`FrameBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Outside the raster; dropped without touching either buffer
    Clipped,
    /// Nearer than anything seen at this pixel; both buffers updated
    Accepted,
    /// Not strictly nearer; dropped
    Occluded,
}

/// Depth buffer and code buffer for one render
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    /// Largest inverse depth committed per pixel (0 = nothing drawn)
    depth: Vec<f64>,
    codes: Vec<u8>,
}

impl FrameBuffer {
    /// Create a cleared buffer: every pixel infinitely far with code 0
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: vec![0.0; width * height],
            codes: vec![0; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Linear address of (x, y), or None if outside the raster
    #[inline]
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Offer a fragment at `point` carrying brightness `code`
    ///
    /// Only a strictly larger inverse depth wins, so among equal depths the
    /// first fragment committed stays.
    pub fn commit(&mut self, point: ScreenPoint, code: u8) -> CommitOutcome {
        let Some(idx) = self.index(point.x, point.y) else {
            return CommitOutcome::Clipped;
        };
        if point.ooz > self.depth[idx] {
            self.depth[idx] = point.ooz;
            self.codes[idx] = code;
            CommitOutcome::Accepted
        } else {
            CommitOutcome::Occluded
        }
    }

    /// Inverse depth stored at (x, y)
    pub fn depth_at(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|idx| self.depth[idx])
    }

    /// Code stored at (x, y)
    pub fn code_at(&self, x: i64, y: i64) -> Option<u8> {
        self.index(x, y).map(|idx| self.codes[idx])
    }

    /// Whether any fragment was ever accepted at (x, y)
    pub fn is_covered(&self, x: i64, y: i64) -> bool {
        self.depth_at(x, y).is_some_and(|d| d > 0.0)
    }

    /// Number of pixels any fragment was accepted at
    pub fn covered_pixels(&self) -> usize {
        self.depth.iter().filter(|&&d| d > 0.0).count()
    }

    /// Fold another buffer of the same size into this one
    ///
    /// Each of `other`'s pixels is committed with the usual strict test, so
    /// merging partial buffers in their sampling order gives the same result
    /// as sampling everything into one buffer. Returns the number of pixels
    /// taken from `other`.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn merge(&mut self, other: &FrameBuffer) -> usize {
        assert_eq!(
            (self.width, self.height),
            (other.width, other.height),
            "cannot merge frame buffers of different sizes"
        );
        let mut taken = 0;
        for idx in 0..self.depth.len() {
            if other.depth[idx] > self.depth[idx] {
                self.depth[idx] = other.depth[idx];
                self.codes[idx] = other.codes[idx];
                taken += 1;
            }
        }
        taken
    }

    /// Drop the depth buffer and keep the codes
    pub fn into_frame(self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            codes: self.codes,
        }
    }
}

/// Luminance ramp for text previews, darkest to brightest
const PREVIEW_RAMP: &[u8] = b".,-~:;=!*#$@";

/// A finished frame of brightness codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    codes: Vec<u8>,
}

impl Frame {
    /// Wrap row-major codes, or None if the length is not `width * height`
    pub fn from_codes(width: usize, height: usize, codes: Vec<u8>) -> Option<Self> {
        (codes.len() == width * height).then_some(Self { width, height, codes })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major codes, `y * width + x`
    #[inline]
    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    /// Code at (x, y)
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.codes[y * self.width + x])
        } else {
            None
        }
    }

    /// Iterate over pixel rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on 0
        self.codes.chunks_exact(self.width.max(1))
    }

    /// Number of pixels with a non-zero code
    pub fn lit_pixels(&self) -> usize {
        self.codes.iter().filter(|&&c| c > 0).count()
    }

    /// Render a text preview, one line per pixel row
    ///
    /// Code 0 becomes a space; other codes map onto a fixed ramp scaled by
    /// `max_code`.
    pub fn to_ascii(&self, max_code: u8) -> String {
        let max = usize::from(max_code.max(1));
        let top = PREVIEW_RAMP.len() - 1;
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            for &code in row {
                if code == 0 {
                    out.push(' ');
                } else {
                    let step = (usize::from(code).min(max) * top).div_ceil(max);
                    out.push(PREVIEW_RAMP[step] as char);
                }
            }
            out.push('\n');
        }
        out
    }
}
