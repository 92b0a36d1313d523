//! `.mem` frame files
//!
//! One line per pixel, each holding a single lowercase hex digit, in
//! row-major order (`address = y * width + x`). This is the layout a
//! hardware memory initializer such as `$readmemh` expects, so the line
//! order is part of the contract.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use torus_render::Frame;

/// Error type for reading and writing `.mem` files
#[derive(Debug)]
pub enum MemError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// A line is not exactly one hex digit
    InvalidDigit { line: usize, text: String },
    /// A code does not fit in one hex digit
    CodeOutOfRange { index: usize, code: u8 },
    /// The stream holds the wrong number of pixels
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for MemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemError::Io(err) => write!(f, "Mem IO error: {}", err),
            MemError::InvalidDigit { line, text } => {
                write!(f, "Mem parse error on line {}: expected one hex digit, got {:?}", line, text)
            }
            MemError::CodeOutOfRange { index, code } => {
                write!(f, "Mem encode error: pixel {} has code {} (max 15)", index, code)
            }
            MemError::LengthMismatch { expected, found } => {
                write!(f, "Mem length mismatch: expected {} pixels, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for MemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MemError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MemError {
    fn from(err: io::Error) -> Self {
        MemError::Io(err)
    }
}

/// Write `frame` as one hex digit per line
pub fn write_mem<W: Write>(frame: &Frame, writer: &mut W) -> Result<(), MemError> {
    for (index, &code) in frame.codes().iter().enumerate() {
        if code > 0xf {
            return Err(MemError::CodeOutOfRange { index, code });
        }
        writeln!(writer, "{:x}", code)?;
    }
    Ok(())
}

/// Create (or truncate) `path` and write `frame` to it
pub fn save_mem<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), MemError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_mem(frame, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Decode a `.mem` stream into a `width` x `height` frame
///
/// Accepts `\n` or `\r\n` terminators and either hex case. Stops at the
/// first pixel past `width * height`.
pub fn read_mem<R: BufRead>(reader: R, width: usize, height: usize) -> Result<Frame, MemError> {
    let expected = width * height;
    let mut codes = Vec::with_capacity(expected);

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.strip_suffix('\r').unwrap_or(&line);
        let mut chars = text.chars();
        let digit = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(16),
            _ => None,
        };
        match digit {
            Some(d) => codes.push(d as u8),
            None => {
                return Err(MemError::InvalidDigit { line: i + 1, text: text.to_string() });
            }
        }
        if codes.len() > expected {
            return Err(MemError::LengthMismatch { expected, found: codes.len() });
        }
    }

    let found = codes.len();
    Frame::from_codes(width, height, codes).ok_or(MemError::LengthMismatch { expected, found })
}

/// Open `path` and decode it into a `width` x `height` frame
pub fn load_mem<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Frame, MemError> {
    read_mem(io::BufReader::new(File::open(path)?), width, height)
}
