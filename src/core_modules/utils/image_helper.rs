pub mod image_helper {
    use crate::core_modules::raster::Image;
    use image::ImageEncoder;
    use std::path::Path;

    /// Writes `image` as an RGB PNG, rows in the order they are stored.
    pub fn save_png<P: AsRef<Path>>(path: P, image: &Image) -> Result<(), image::error::ImageError> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);
        let buffer = image.to_rgb_image();

        encoder.write_image(
            buffer.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )?;

        Ok(())
    }
}
