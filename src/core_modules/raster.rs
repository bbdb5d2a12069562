// THEORY:
// `Image` is the in-memory pixel grid shared by the decoder and the sampler. It is a
// flat, row-major `Vec<Color>` plus its dimensions, nothing more.
//
// The flat layout is deliberate and load-bearing: the pixel at (x, y) always lives at
// `y * width + x`. Single-row sampling slices one contiguous run of that vector, and
// the decoder fills it strictly in file order. Rows are kept in the order they were
// stored, so a bottom-up bitmap yields an `Image` whose row 0 is the bottom scanline.
// `flipped_vertically` exists for callers that want top-to-bottom orientation.
//
// An `Image` is immutable once built. Its constructor enforces the single invariant:
// positive dimensions and exactly `width * height` pixels.

use crate::core_modules::color::color::Color;
use crate::error::FormatError;
use image::RgbImage;

/// A decoded, immutable RGB image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Pixels per row.
    width: u32,
    /// Number of rows.
    height: u32,
    /// Row-major pixel data, `width * height` entries.
    pixels: Vec<Color>,
}

impl Image {
    /// Creates an image, checking that the dimensions are positive and match `pixels`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, FormatError> {
        if width == 0 || height == 0 {
            return Err(FormatError::InvalidDimensions {
                width: clamp_to_i32(width),
                height: clamp_to_i32(height),
            });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FormatError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Creates an image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, FormatError> {
        Self::new(width, height, vec![color; width as usize * height as usize])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Position of (x, y) in the flat pixel vector.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    /// The pixel at (x, y).
    ///
    /// # Panics
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} image",
            self.width,
            self.height
        );
        self.pixels[self.index(x, y)]
    }

    /// All pixels of row `y`, left to right.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[Color] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// A copy of this image with the row order reversed.
    pub fn flipped_vertically(&self) -> Self {
        let pixels = (0..self.height)
            .rev()
            .flat_map(|y| self.row(y).iter().copied())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }

    /// Converts into an `image` crate buffer, keeping the row order as is.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| self.pixel(x, y).into())
    }
}

impl TryFrom<&RgbImage> for Image {
    type Error = FormatError;

    fn try_from(buffer: &RgbImage) -> Result<Self, Self::Error> {
        let pixels = buffer.pixels().map(|rgb| Color::from(*rgb)).collect();
        Image::new(buffer.width(), buffer.height(), pixels)
    }
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
