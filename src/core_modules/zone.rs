// THEORY:
// A `Zone` describes *where* to sample, never *how*. It is a throwaway query value:
// built for one call, resolved against an `Image` into an inclusive pixel rectangle,
// and then walked by the shared averaging primitive.
//
// Clamping policy: every bound is clamped independently into the image before use.
// Bounds are not reordered, so a start that ends up past its end after clamping is an
// empty zone and resolves to `RangeError::EmptyRange`.

use crate::core_modules::raster::Image;
use crate::error::RangeError;

/// A region of an image to average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Every pixel of the image.
    Whole,
    /// Columns `start_x..=end_x` across all rows.
    Columns { start_x: i64, end_x: i64 },
    /// Rows `start_y..=end_y` across all columns.
    Rows { start_y: i64, end_y: i64 },
    /// Pixels `start_x..=end_x` of the single row `y`.
    RowSegment { y: i64, start_x: i64, end_x: i64 },
    /// Pixels `start_y..=end_y` of the single column `x`.
    ColumnSegment { x: i64, start_y: i64, end_y: i64 },
}

/// An inclusive, non-empty pixel rectangle inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start_x: u32,
    pub end_x: u32,
    pub start_y: u32,
    pub end_y: u32,
}

impl Bounds {
    /// Row-major (x, y) coordinates of every covered pixel.
    pub fn coordinates(self) -> impl Iterator<Item = (u32, u32)> {
        (self.start_y..=self.end_y)
            .flat_map(move |y| (self.start_x..=self.end_x).map(move |x| (x, y)))
    }
}

impl Zone {
    /// Clamps the zone into `image` and checks that it covers at least one pixel.
    pub fn resolve(&self, image: &Image) -> Result<Bounds, RangeError> {
        let width = image.width();
        let height = image.height();
        let full_x = (0, width - 1);
        let full_y = (0, height - 1);

        let ((start_x, end_x), (start_y, end_y)) = match *self {
            Zone::Whole => (full_x, full_y),
            Zone::Columns { start_x, end_x } => (
                (clamp_axis(start_x, width), clamp_axis(end_x, width)),
                full_y,
            ),
            Zone::Rows { start_y, end_y } => (
                full_x,
                (clamp_axis(start_y, height), clamp_axis(end_y, height)),
            ),
            Zone::RowSegment { y, start_x, end_x } => {
                let y = clamp_axis(y, height);
                (
                    (clamp_axis(start_x, width), clamp_axis(end_x, width)),
                    (y, y),
                )
            }
            Zone::ColumnSegment { x, start_y, end_y } => {
                let x = clamp_axis(x, width);
                (
                    (x, x),
                    (clamp_axis(start_y, height), clamp_axis(end_y, height)),
                )
            }
        };

        ensure_ordered(start_x, end_x)?;
        ensure_ordered(start_y, end_y)?;
        Ok(Bounds {
            start_x,
            end_x,
            start_y,
            end_y,
        })
    }
}

/// Clamps `value` into `0..=extent - 1`. `extent` is always positive for an `Image`.
pub(crate) fn clamp_axis(value: i64, extent: u32) -> u32 {
    value.clamp(0, i64::from(extent) - 1) as u32
}

fn ensure_ordered(start: u32, end: u32) -> Result<(), RangeError> {
    if start > end {
        return Err(RangeError::EmptyRange {
            start: i64::from(start),
            end: i64::from(end),
        });
    }
    Ok(())
}
