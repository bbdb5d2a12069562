// THEORY:
// The `ZoneSampler` is the analytical half of the crate. It borrows a decoded `Image`
// read-only and answers "what is the mean color of this part of the picture?" for the
// shapes an ambient-lighting strip needs: whole image, column and row strips, edge
// lines cut into sections, and column bands cut into subsections.
//
// Key principles:
// 1.  **One primitive**: every operation builds `Zone`s and hands their coordinates to
//     `accumulator::average_of`. The operations differ only in how they cut an edge.
// 2.  **Truncating sections**: an extent of `n` pixels split into `k` sections gives
//     sections of `n / k` pixels. The remainder is dropped, never spread out, so
//     identical inputs always produce identical section boundaries.
// 3.  **Stable ordering**: results are ordered by increasing coordinate. Visual or LED
//     ordering (right-to-left, bottom-to-top) is the caller's concern.
// 4.  **Stateless**: no caching between queries; each call rescans its pixels.

use crate::core_modules::accumulator::average_of;
use crate::core_modules::color::color::Color;
use crate::core_modules::raster::Image;
use crate::core_modules::zone::{Zone, clamp_axis};
use crate::error::{RangeError, Result};
use log::debug;

/// Read-only sampling queries over a borrowed `Image`.
#[derive(Debug, Clone, Copy)]
pub struct ZoneSampler<'a> {
    image: &'a Image,
}

impl<'a> ZoneSampler<'a> {
    pub fn new(image: &'a Image) -> Self {
        Self { image }
    }

    /// Mean color of an arbitrary zone.
    pub fn zone_average(&self, zone: &Zone) -> Result<Color> {
        self.section_average(zone, 0)
    }

    /// Mean color of the whole image.
    pub fn average(&self) -> Result<Color> {
        self.zone_average(&Zone::Whole)
    }

    /// Mean color of columns `start_x..=end_x` over all rows.
    pub fn vertical_strip(&self, start_x: i64, end_x: i64) -> Result<Color> {
        self.zone_average(&Zone::Columns { start_x, end_x })
    }

    /// Mean color of rows `start_y..=end_y` over all columns.
    pub fn horizontal_strip(&self, start_y: i64, end_y: i64) -> Result<Color> {
        self.zone_average(&Zone::Rows { start_y, end_y })
    }

    /// Splits row 0 into `sections` runs of `width / sections` pixels, left to right.
    pub fn top_line(&self, sections: usize) -> Result<Vec<Color>> {
        self.line_sections(self.image.width(), sections, |start_x, end_x| {
            Zone::RowSegment {
                y: 0,
                start_x,
                end_x,
            }
        })
    }

    /// Same sectioning as [`top_line`](Self::top_line), over the last row.
    pub fn bottom_line(&self, sections: usize) -> Result<Vec<Color>> {
        let y = i64::from(self.image.height()) - 1;
        self.line_sections(self.image.width(), sections, |start_x, end_x| {
            Zone::RowSegment { y, start_x, end_x }
        })
    }

    /// Splits the last column into `sections` runs of `height / sections` pixels,
    /// ordered by increasing y.
    pub fn right_line(&self, sections: usize) -> Result<Vec<Color>> {
        let x = i64::from(self.image.width()) - 1;
        self.line_sections(self.image.height(), sections, |start_y, end_y| {
            Zone::ColumnSegment { x, start_y, end_y }
        })
    }

    /// Same sectioning as [`right_line`](Self::right_line), over column 0.
    pub fn left_line(&self, sections: usize) -> Result<Vec<Color>> {
        self.line_sections(self.image.height(), sections, |start_y, end_y| {
            Zone::ColumnSegment {
                x: 0,
                start_y,
                end_y,
            }
        })
    }

    /// Splits the column band `start_x..=end_x` into `subsections` full-height strips,
    /// ordered by increasing x.
    ///
    /// Both bounds are clamped into the image first. Each subsection is then pinned
    /// back into the band with `max(start_x, min(bound, end_x))`, so a band narrower
    /// than `subsections`, or one whose start lies past its end, collapses onto the
    /// single column `start_x` instead of failing.
    pub fn vertical_subsections(
        &self,
        start_x: i64,
        end_x: i64,
        subsections: usize,
    ) -> Result<Vec<Color>> {
        if subsections == 0 {
            return Err(RangeError::NoSections.into());
        }
        let width = self.image.width();
        let start_x = i64::from(clamp_axis(start_x, width));
        let end_x = i64::from(clamp_axis(end_x, width));

        let range_width = end_x - start_x + 1;
        let subsection_width = range_width / subsections as i64;
        if subsection_width <= 0 {
            debug!(
                "band {start_x}..={end_x} is narrower than {subsections} subsections, collapsing"
            );
        }
        let pin = |bound: i64| start_x.max(bound.min(end_x));

        (0..subsections)
            .map(|index| {
                let sub_start = start_x + index as i64 * subsection_width;
                let sub_end = sub_start + subsection_width - 1;
                let zone = Zone::Columns {
                    start_x: pin(sub_start),
                    end_x: pin(sub_end),
                };
                self.section_average(&zone, index)
            })
            .collect()
    }

    /// Cuts `0..extent` into `sections` equal runs and averages the zone built for each.
    fn line_sections<F>(&self, extent: u32, sections: usize, zone_for: F) -> Result<Vec<Color>>
    where
        F: Fn(i64, i64) -> Zone,
    {
        if sections == 0 {
            return Err(RangeError::NoSections.into());
        }
        let step = extent as usize / sections;
        if step == 0 {
            return Err(RangeError::EmptySection { index: 0 }.into());
        }

        (0..sections)
            .map(|index| {
                let start = (index * step) as i64;
                let end = ((index + 1) * step) as i64 - 1;
                self.section_average(&zone_for(start, end), index)
            })
            .collect()
    }

    fn section_average(&self, zone: &Zone, index: usize) -> Result<Color> {
        let bounds = zone.resolve(self.image)?;
        Ok(average_of(self.image, bounds.coordinates(), index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EdgeError;

    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    /// Each pixel encodes its own position: red = x, green = y.
    fn coordinate_image(width: u32, height: u32) -> Image {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| Color::new(x as u8, y as u8, 7)))
            .collect();
        Image::new(width, height, pixels).expect("valid image")
    }

    fn range_error(result: Result<Vec<Color>>) -> RangeError {
        match result {
            Err(EdgeError::InvalidRange(err)) => err,
            other => panic!("expected a range error, got {other:?}"),
        }
    }

    #[test]
    fn uniform_image_averages_to_its_color() {
        let image = Image::filled(7, 3, BLUE).expect("valid image");
        assert_eq!(ZoneSampler::new(&image).average().expect("non-empty"), BLUE);
    }

    #[test]
    fn vertical_strip_uses_all_rows_of_the_range() {
        let image = coordinate_image(6, 4);
        let sampler = ZoneSampler::new(&image);
        // x in 2..=4 -> mean 3, y in 0..=3 -> mean 1 (truncated from 1.5).
        assert_eq!(sampler.vertical_strip(2, 4).expect("non-empty"), Color::new(3, 1, 7));
    }

    #[test]
    fn horizontal_strip_clamps_out_of_range_bounds() {
        let image = coordinate_image(4, 5);
        let sampler = ZoneSampler::new(&image);
        assert_eq!(
            sampler.horizontal_strip(3, 99).expect("non-empty"),
            sampler.horizontal_strip(3, 4).expect("non-empty")
        );
    }

    #[test]
    fn full_strips_match_the_whole_image() {
        let image = coordinate_image(9, 5);
        let sampler = ZoneSampler::new(&image);
        let whole = sampler.average().expect("non-empty");
        assert_eq!(sampler.vertical_strip(0, 8).expect("non-empty"), whole);
        assert_eq!(sampler.horizontal_strip(0, 4).expect("non-empty"), whole);
    }

    #[test]
    fn reversed_strip_is_an_invalid_range() {
        let image = coordinate_image(4, 4);
        let err = ZoneSampler::new(&image).vertical_strip(3, 1).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn top_line_drops_the_remainder() {
        // Width 10 into 3 sections: x 0..=2, 3..=5, 6..=8. Column 9 is never sampled.
        let image = coordinate_image(10, 2);
        let colors = ZoneSampler::new(&image).top_line(3).expect("valid sections");
        assert_eq!(
            colors,
            vec![Color::new(1, 0, 7), Color::new(4, 0, 7), Color::new(7, 0, 7)]
        );
    }

    #[test]
    fn bottom_line_reads_the_last_row() {
        let image = coordinate_image(4, 3);
        let colors = ZoneSampler::new(&image).bottom_line(2).expect("valid sections");
        assert_eq!(colors, vec![Color::new(0, 2, 7), Color::new(2, 2, 7)]);
    }

    #[test]
    fn side_lines_read_the_outer_columns() {
        let image = coordinate_image(5, 6);
        let sampler = ZoneSampler::new(&image);
        assert_eq!(
            sampler.right_line(3).expect("valid sections"),
            vec![Color::new(4, 0, 7), Color::new(4, 2, 7), Color::new(4, 4, 7)]
        );
        assert_eq!(
            sampler.left_line(2).expect("valid sections"),
            vec![Color::new(0, 1, 7), Color::new(0, 4, 7)]
        );
    }

    #[test]
    fn zero_sections_are_rejected() {
        let image = Image::filled(4, 2, RED).expect("valid image");
        let sampler = ZoneSampler::new(&image);
        assert_eq!(range_error(sampler.top_line(0)), RangeError::NoSections);
        assert_eq!(range_error(sampler.right_line(0)), RangeError::NoSections);
        assert_eq!(
            range_error(sampler.vertical_subsections(0, 3, 0)),
            RangeError::NoSections
        );
    }

    #[test]
    fn more_sections_than_pixels_is_an_empty_section() {
        let image = Image::filled(4, 2, RED).expect("valid image");
        assert_eq!(
            range_error(ZoneSampler::new(&image).top_line(5)),
            RangeError::EmptySection { index: 0 }
        );
    }

    #[test]
    fn subsections_split_the_band() {
        let image = coordinate_image(12, 2);
        // Band 2..=9 has width 8 -> four strips of two columns.
        let colors = ZoneSampler::new(&image)
            .vertical_subsections(2, 9, 4)
            .expect("valid band");
        let reds: Vec<u8> = colors.iter().map(|c| c.red).collect();
        assert_eq!(reds, vec![2, 4, 6, 8]);
    }

    #[test]
    fn single_subsection_equals_the_strip() {
        let image = coordinate_image(11, 3);
        let sampler = ZoneSampler::new(&image);
        assert_eq!(
            sampler.vertical_subsections(3, 8, 1).expect("valid band"),
            vec![sampler.vertical_strip(3, 8).expect("non-empty")]
        );
    }

    #[test]
    fn narrow_band_collapses_onto_its_first_column() {
        let image = coordinate_image(10, 2);
        let colors = ZoneSampler::new(&image)
            .vertical_subsections(4, 5, 3)
            .expect("collapsed band");
        assert_eq!(colors, vec![Color::new(4, 0, 7); 3]);
    }

    #[test]
    fn reversed_band_collapses_onto_its_start_column() {
        let image = coordinate_image(100, 2);
        let sampler = ZoneSampler::new(&image);
        let column = sampler.vertical_strip(28, 28).expect("non-empty");
        assert_eq!(
            sampler.vertical_subsections(28, 10, 4).expect("collapsed band"),
            vec![column; 4]
        );
    }

    #[test]
    fn subsection_bounds_are_clamped_into_the_image() {
        let image = coordinate_image(6, 2);
        let sampler = ZoneSampler::new(&image);
        assert_eq!(
            sampler.vertical_subsections(-10, 100, 2).expect("valid band"),
            sampler.vertical_subsections(0, 5, 2).expect("valid band")
        );
    }

    #[test]
    fn failed_query_leaves_the_image_usable() {
        let image = Image::filled(4, 2, RED).expect("valid image");
        let sampler = ZoneSampler::new(&image);
        assert!(sampler.top_line(0).is_err());
        assert_eq!(sampler.top_line(2).expect("valid sections"), vec![RED, RED]);
    }
}
