// Example runner for the `edgelight` library: decodes a bitmap, samples its edges and
// prints the resulting LED colors in strip order.

use anyhow::{Context, bail};
use edgelight::core_modules::utils::image_helper::image_helper;
use edgelight::{EdgeLayout, EdgePipeline, decode_file};
use log::info;
use std::env;

/// Side bands cover this fraction of the image width.
const BAND_WIDTH_DIVISOR: u32 = 10;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: edgelight <input.bmp> [preview.png]");
    }
    let input_path = &args[1];

    let image = decode_file(input_path).with_context(|| format!("decoding {input_path}"))?;
    info!("decoded {}x{} bitmap", image.width(), image.height());

    if let Some(preview_path) = args.get(2) {
        image_helper::save_png(preview_path, &image)
            .with_context(|| format!("writing preview {preview_path}"))?;
        info!("wrote preview to {preview_path}");
    }

    let layout = EdgeLayout::new(image.width(), image.width() / BAND_WIDTH_DIVISOR);
    let colors = EdgePipeline::new(layout).sample(&image)?;

    for (index, color) in colors.strip_order().iter().enumerate() {
        println!(
            "LED {index:3}: R={}, G={}, B={}",
            color.red, color.green, color.blue
        );
    }
    Ok(())
}
