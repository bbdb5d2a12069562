// THEORY:
// The `pipeline` module is the top-level API for driving an LED strip from a still
// image. It ties the core together: given a decoded `Image` and an `EdgeLayout`, it
// samples all four edges with the `ZoneSampler` and returns the colors per edge, plus
// a single sequence in the order LEDs are usually wired around a screen.
//
// How many LEDs sit on each edge is a property of the physical installation, so the
// layout only carries plain counts and column bands. Turning a monitor size into
// counts is left to the caller.

use crate::core_modules::color::color::Color;
use crate::core_modules::raster::Image;
use crate::core_modules::zone_sampler::ZoneSampler;
use crate::error::Result;
use log::{debug, warn};

const DEFAULT_TOP_SECTIONS: usize = 8;
const DEFAULT_BOTTOM_SECTIONS: usize = 8;
const DEFAULT_SIDE_SUBSECTIONS: usize = 4;

/// A band of columns split into full-height subsections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalBand {
    pub start_x: i64,
    pub end_x: i64,
    pub subsections: usize,
}

/// Configuration for the `EdgePipeline`: how each edge is cut into LED zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeLayout {
    /// Sections along the first stored row.
    pub top_sections: usize,
    /// Sections along the last stored row.
    pub bottom_sections: usize,
    pub left: VerticalBand,
    pub right: VerticalBand,
}

impl EdgeLayout {
    /// A layout with default section counts and side bands `band_width` columns wide,
    /// hugging the left and right borders of an image `image_width` pixels wide.
    pub fn new(image_width: u32, band_width: u32) -> Self {
        let image_width = i64::from(image_width);
        let band_width = i64::from(band_width.max(1));
        Self {
            top_sections: DEFAULT_TOP_SECTIONS,
            bottom_sections: DEFAULT_BOTTOM_SECTIONS,
            left: VerticalBand {
                start_x: 0,
                end_x: band_width - 1,
                subsections: DEFAULT_SIDE_SUBSECTIONS,
            },
            right: VerticalBand {
                start_x: image_width - band_width,
                end_x: image_width - 1,
                subsections: DEFAULT_SIDE_SUBSECTIONS,
            },
        }
    }
}

/// Sampled colors for each edge, every list ordered by increasing coordinate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeColors {
    pub top: Vec<Color>,
    pub right: Vec<Color>,
    pub bottom: Vec<Color>,
    pub left: Vec<Color>,
}

impl EdgeColors {
    /// All colors as one clockwise strip: top left to right, right as sampled, bottom
    /// right to left, left reversed.
    pub fn strip_order(&self) -> Vec<Color> {
        self.top
            .iter()
            .chain(self.right.iter())
            .chain(self.bottom.iter().rev())
            .chain(self.left.iter().rev())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.right.len() + self.bottom.len() + self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Samples the four edges of images according to an `EdgeLayout`.
#[derive(Debug, Clone)]
pub struct EdgePipeline {
    layout: EdgeLayout,
}

impl EdgePipeline {
    pub fn new(layout: EdgeLayout) -> Self {
        Self { layout }
    }

    /// Samples every edge of `image`.
    ///
    /// An edge whose layout is invalid for this image (zero sections, or more sections
    /// than pixels) is logged and left empty. Other errors abort.
    pub fn sample(&self, image: &Image) -> Result<EdgeColors> {
        let sampler = ZoneSampler::new(image);
        let layout = &self.layout;

        let colors = EdgeColors {
            top: skip_invalid("top", sampler.top_line(layout.top_sections))?,
            right: skip_invalid(
                "right",
                sampler.vertical_subsections(
                    layout.right.start_x,
                    layout.right.end_x,
                    layout.right.subsections,
                ),
            )?,
            bottom: skip_invalid("bottom", sampler.bottom_line(layout.bottom_sections))?,
            left: skip_invalid(
                "left",
                sampler.vertical_subsections(
                    layout.left.start_x,
                    layout.left.end_x,
                    layout.left.subsections,
                ),
            )?,
        };
        debug!(
            "sampled {} edge colors from {}x{} image",
            colors.len(),
            image.width(),
            image.height()
        );
        Ok(colors)
    }
}

fn skip_invalid(edge: &str, result: Result<Vec<Color>>) -> Result<Vec<Color>> {
    match result {
        Err(err) if err.is_recoverable() => {
            warn!("skipping {edge} edge: {err}");
            Ok(Vec::new())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quadrant_image() -> Image {
        // 8x4: left half red, right half blue, row 0 overridden to green.
        let pixels = (0..4u32)
            .flat_map(|y| {
                (0..8u32).map(move |x| match (x, y) {
                    (_, 0) => Color::new(0, 255, 0),
                    (0..=3, _) => Color::new(255, 0, 0),
                    _ => Color::new(0, 0, 255),
                })
            })
            .collect();
        Image::new(8, 4, pixels).expect("valid image")
    }

    #[test]
    fn layout_bands_hug_the_borders() {
        let layout = EdgeLayout::new(100, 10);
        assert_eq!((layout.left.start_x, layout.left.end_x), (0, 9));
        assert_eq!((layout.right.start_x, layout.right.end_x), (90, 99));
    }

    #[test]
    fn samples_every_edge() {
        let image = quadrant_image();
        let layout = EdgeLayout {
            top_sections: 2,
            bottom_sections: 2,
            left: VerticalBand {
                start_x: 0,
                end_x: 1,
                subsections: 1,
            },
            right: VerticalBand {
                start_x: 6,
                end_x: 7,
                subsections: 2,
            },
        };
        let colors = EdgePipeline::new(layout).sample(&image).expect("valid layout");

        assert_eq!(colors.top, vec![Color::new(0, 255, 0); 2]);
        assert_eq!(
            colors.bottom,
            vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]
        );
        // One green row and three red rows: (255 * 3) / 4 and 255 / 4.
        assert_eq!(colors.left, vec![Color::new(191, 63, 0)]);
        assert_eq!(colors.right, vec![Color::new(0, 63, 191); 2]);
    }

    #[test]
    fn strip_order_reverses_bottom_and_left() {
        let a = Color::new(1, 0, 0);
        let b = Color::new(2, 0, 0);
        let colors = EdgeColors {
            top: vec![a, b],
            right: vec![a, b],
            bottom: vec![a, b],
            left: vec![a, b],
        };
        assert_eq!(colors.strip_order(), vec![a, b, a, b, b, a, b, a]);
    }

    #[test]
    fn reversed_side_band_still_yields_colors() {
        let image = quadrant_image();
        let mut layout = EdgeLayout::new(image.width(), 2);
        layout.left = VerticalBand {
            start_x: 5,
            end_x: 1,
            subsections: 3,
        };

        let colors = EdgePipeline::new(layout).sample(&image).expect("valid layout");
        assert_eq!(colors.left, vec![Color::new(0, 63, 191); 3]);
    }

    #[test]
    fn invalid_edge_is_skipped() {
        let image = quadrant_image();
        let mut layout = EdgeLayout::new(image.width(), 2);
        layout.top_sections = 0;
        layout.bottom_sections = 2;

        let colors = EdgePipeline::new(layout).sample(&image).expect("other edges valid");
        assert!(colors.top.is_empty());
        assert_eq!(colors.bottom.len(), 2);
        assert_eq!(colors.left.len(), 4);
    }
}
