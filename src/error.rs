// THEORY:
// Failures are split by what a caller can do about them:
// - `Io` and `Format` mean the byte source is unusable. No partial `Image` is ever
//   returned, and a pipeline should abort.
// - `InvalidRange` means one sampling query was malformed. The `Image` is still
//   valid and other zones can be sampled, so a pipeline may skip just that zone.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EdgeError>;

/// The top-level error type of the crate.
#[derive(Debug, Error)]
pub enum EdgeError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("bitmap format error: {0}")]
    Format(#[from] FormatError),
    #[error("invalid sampling range: {0}")]
    InvalidRange(#[from] RangeError),
}

impl EdgeError {
    /// True when the failure only affects a single sampling query.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EdgeError::InvalidRange(_))
    }
}

/// The byte stream is not an uncompressed 24-bit bitmap, or ends early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("stream ended inside the {expected}-byte header")]
    TruncatedHeader { expected: usize },
    #[error("unsupported bit depth {0}, only 24 bits per pixel is supported")]
    UnsupportedBitDepth(u16),
    #[error("unsupported compression method {0}, only uncompressed bitmaps are supported")]
    UnsupportedCompression(u32),
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("pixel data ended at row {row} of {height}")]
    TruncatedPixelData { row: u32, height: u32 },
    #[error("expected {expected} pixels, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },
}

/// A sampling query that would average zero pixels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("number of sections must be greater than zero")]
    NoSections,
    #[error("range {start}..={end} is empty after clamping")]
    EmptyRange { start: i64, end: i64 },
    #[error("section {index} contains no pixels")]
    EmptySection { index: usize },
}
