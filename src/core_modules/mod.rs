pub mod accumulator;
pub mod bitmap;
pub mod color;
pub mod raster;
pub mod utils;
pub mod zone;
pub mod zone_sampler;
