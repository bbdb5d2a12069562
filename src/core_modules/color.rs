// THEORY:
// The `Color` module is the most fundamental unit of the crate. It is a "dumb" value
// type holding three 8-bit channel intensities, with no alpha and no color-space
// semantics. Everything else (decoding, averaging, LED ordering) produces or consumes
// `Color`s but never changes what a `Color` is.
//
// Bitmaps store channels in blue-green-red order. The reordering to red-green-blue
// happens here, in one place, so the decoder and the tests agree on it.

pub mod color {
    pub type Byte = u8;
    pub type Channel = Byte;

    /// Number of bytes a 24-bit pixel occupies in a bitmap.
    pub const BYTES_PER_PIXEL: usize = 3;

    /// A single RGB color with 8-bit channels.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Color {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    impl Color {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Color { red, green, blue }
        }

        /// Builds a color from a pixel triple as stored in a bitmap (blue, green, red).
        pub const fn from_bgr(bytes: [Byte; BYTES_PER_PIXEL]) -> Self {
            Color::new(bytes[2], bytes[1], bytes[0])
        }

        /// The bitmap byte layout of this color (blue, green, red).
        pub const fn to_bgr(self) -> [Byte; BYTES_PER_PIXEL] {
            [self.blue, self.green, self.red]
        }
    }

    impl From<image::Rgb<u8>> for Color {
        fn from(rgb: image::Rgb<u8>) -> Self {
            let [red, green, blue] = rgb.0;
            Color::new(red, green, blue)
        }
    }

    impl From<Color> for image::Rgb<u8> {
        fn from(color: Color) -> Self {
            image::Rgb([color.red, color.green, color.blue])
        }
    }
}
