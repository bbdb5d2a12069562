// THEORY:
// The `bitmap` module is the decoder: it turns a byte stream holding an uncompressed
// 24-bit bitmap into an `Image`. It is the only place in the crate that knows about
// the file format.
//
// Key principles:
// 1.  **Fixed header contract**: the leading 54 bytes are read in one go and the four
//     fields we care about are decoded as little-endian integers at named offsets.
//     Anything that is not 24 bits per pixel with no compression is rejected before a
//     single pixel is read.
// 2.  **File order is preserved**: rows are appended in the order they appear in the
//     stream. Bitmaps usually store the bottom scanline first, so row 0 of the decoded
//     `Image` is typically the bottom of the picture. Flipping is the caller's call.
// 3.  **Row padding**: every stored row is padded to a multiple of 4 bytes. The padding
//     is skipped with a relative seek, which is why the decoder needs `Read + Seek`.
// 4.  **All or nothing**: a short stream fails the whole decode. No partial `Image` is
//     ever returned.

use crate::core_modules::color::color::{BYTES_PER_PIXEL, Color};
use crate::core_modules::raster::Image;
use crate::error::{FormatError, Result};
use log::{debug, trace};
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Size of the file header plus the info header of an uncompressed bitmap.
pub const HEADER_SIZE: usize = 54;

const WIDTH_OFFSET: usize = 18;
const HEIGHT_OFFSET: usize = 22;
const BITS_PER_PIXEL_OFFSET: usize = 28;
const COMPRESSION_OFFSET: usize = 30;

const SUPPORTED_BITS_PER_PIXEL: u16 = 24;
/// The `BI_RGB` compression code.
const COMPRESSION_NONE: u32 = 0;
/// Stored rows are aligned to this many bytes.
const ROW_ALIGNMENT: usize = 4;

/// Caps the up-front allocation so a lying header cannot exhaust memory before the
/// stream runs dry.
const MAX_PREALLOCATED_PIXELS: usize = 1 << 24;

/// Pixels read per call while walking a row. Keeps the read buffer a fixed size
/// whatever width the header declares.
const READ_CHUNK_PIXELS: usize = 1024;

/// The header fields the decoder relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapHeader {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: u32,
}

impl BitmapHeader {
    /// Parses and validates the fixed-size header region.
    pub fn parse(header: &[u8; HEADER_SIZE]) -> std::result::Result<Self, FormatError> {
        let bits_per_pixel = read_u16_le(header, BITS_PER_PIXEL_OFFSET);
        if bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            return Err(FormatError::UnsupportedBitDepth(bits_per_pixel));
        }
        let compression = read_u32_le(header, COMPRESSION_OFFSET);
        if compression != COMPRESSION_NONE {
            return Err(FormatError::UnsupportedCompression(compression));
        }

        let width = read_i32_le(header, WIDTH_OFFSET);
        let height = read_i32_le(header, HEIGHT_OFFSET);
        if width <= 0 || height <= 0 {
            return Err(FormatError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width: width as u32,
            height: height as u32,
            bits_per_pixel,
            compression,
        })
    }

    /// Bytes of pixel data in one stored row, without padding.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Bytes of padding that follow every stored row.
    pub fn row_padding(&self) -> usize {
        (ROW_ALIGNMENT - self.row_bytes() % ROW_ALIGNMENT) % ROW_ALIGNMENT
    }
}

/// Decodes an uncompressed 24-bit bitmap from a seekable byte source.
pub fn decode<R: Read + Seek>(mut reader: R) -> Result<Image> {
    let mut header_bytes = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header_bytes).map_err(|err| {
        eof_as_format(err, FormatError::TruncatedHeader {
            expected: HEADER_SIZE,
        })
    })?;
    let header = BitmapHeader::parse(&header_bytes)?;
    let padding = header.row_padding();
    debug!(
        "bitmap header: {}x{}, {} bpp, {} padding bytes per row",
        header.width, header.height, header.bits_per_pixel, padding
    );

    let total = header.width as usize * header.height as usize;
    let mut pixels = Vec::with_capacity(total.min(MAX_PREALLOCATED_PIXELS));
    let mut chunk = [0u8; READ_CHUNK_PIXELS * BYTES_PER_PIXEL];

    for row in 0..header.height {
        let mut remaining = header.row_bytes();
        while remaining > 0 {
            let chunk_len = chunk.len();
            let buffer = &mut chunk[..remaining.min(chunk_len)];
            reader.read_exact(buffer).map_err(|err| {
                eof_as_format(err, FormatError::TruncatedPixelData {
                    row,
                    height: header.height,
                })
            })?;
            pixels.extend(
                buffer
                    .chunks_exact(BYTES_PER_PIXEL)
                    .map(|bgr| Color::from_bgr([bgr[0], bgr[1], bgr[2]])),
            );
            remaining -= buffer.len();
        }
        if padding > 0 {
            reader.seek(SeekFrom::Current(padding as i64))?;
        }
        trace!("decoded row {row}");
    }

    Ok(Image::new(header.width, header.height, pixels)?)
}

/// Decodes a bitmap held entirely in memory.
pub fn decode_bytes(bytes: &[u8]) -> Result<Image> {
    decode(Cursor::new(bytes))
}

/// Opens and decodes a bitmap file.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    debug!("decoding bitmap {}", path.display());
    let file = File::open(path)?;
    decode(BufReader::new(file))
}

fn eof_as_format(err: io::Error, format_error: FormatError) -> crate::error::EdgeError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        format_error.into()
    } else {
        err.into()
    }
}

fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn read_i32_le(bytes: &[u8], offset: usize) -> i32 {
    read_u32_le(bytes, offset) as i32
}
