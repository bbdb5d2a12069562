// THEORY:
// Every sampling operation in the crate reduces to the same step: walk a set of pixel
// coordinates, sum each channel independently, divide by the pixel count. That step
// lives here and nowhere else, so the many sampling shapes cannot drift apart.
//
// Key principles:
// 1.  **Wide sums**: channels are summed into `u64`, which cannot overflow for any
//     image a 32-bit header can describe.
// 2.  **Truncating mean**: each channel sum is divided by the count with integer
//     division. The result always fits a channel because it is a mean of `u8`s.
// 3.  **Empty is an error**: averaging zero pixels has no answer. It surfaces as a
//     `RangeError` so the caller can skip that one zone.

use crate::core_modules::color::color::{Channel, Color};
use crate::core_modules::raster::Image;
use crate::error::RangeError;

/// Running per-channel sums for a set of pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorAccumulator {
    sum_red: u64,
    sum_green: u64,
    sum_blue: u64,
    count: u64,
}

impl ColorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, color: Color) {
        self.sum_red += u64::from(color.red);
        self.sum_green += u64::from(color.green);
        self.sum_blue += u64::from(color.blue);
        self.count += 1;
    }

    /// Number of pixels added so far.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The truncated per-channel mean, or `None` if nothing was added.
    pub fn average(&self) -> Option<Color> {
        if self.count == 0 {
            return None;
        }
        Some(Color::new(
            mean_channel(self.sum_red, self.count),
            mean_channel(self.sum_green, self.count),
            mean_channel(self.sum_blue, self.count),
        ))
    }
}

impl Extend<Color> for ColorAccumulator {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, colors: I) {
        for color in colors {
            self.add(color);
        }
    }
}

impl FromIterator<Color> for ColorAccumulator {
    fn from_iter<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        let mut accumulator = Self::new();
        accumulator.extend(colors);
        accumulator
    }
}

#[inline]
fn mean_channel(sum: u64, count: u64) -> Channel {
    (sum / count) as Channel
}

/// Averages the pixels of `image` at the given (x, y) coordinates.
///
/// `section` is reported back in the error when no coordinate is produced.
pub fn average_of<I>(image: &Image, coordinates: I, section: usize) -> Result<Color, RangeError>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    coordinates
        .into_iter()
        .map(|(x, y)| image.pixel(x, y))
        .collect::<ColorAccumulator>()
        .average()
        .ok_or(RangeError::EmptySection { index: section })
}
