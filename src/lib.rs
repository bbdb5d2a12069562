// THEORY:
// This file is the main entry point for the `edgelight` library crate.
// It exposes two layers to external consumers (an LED driver, a capture loop, the
// example runner in `main.rs`):
//
// 1.  **Core modules**: the bitmap decoder that turns a byte stream into an `Image`,
//     and the `ZoneSampler` that averages colors over edge zones of that image.
// 2.  **Pipeline**: a thin orchestration layer that samples all four edges of an
//     `Image` according to an `EdgeLayout` and hands back LED-ordered colors.
//
// Everything is synchronous and read-only once an `Image` has been decoded.

pub mod core_modules;
pub mod error;
pub mod pipeline;

pub use crate::core_modules::bitmap::{decode, decode_bytes, decode_file};
pub use crate::core_modules::color::color::Color;
pub use crate::core_modules::raster::Image;
pub use crate::core_modules::zone::Zone;
pub use crate::core_modules::zone_sampler::ZoneSampler;
pub use crate::error::{EdgeError, FormatError, RangeError, Result};
pub use crate::pipeline::{EdgeColors, EdgeLayout, EdgePipeline, VerticalBand};
