/// Builds an uncompressed 24-bit bitmap from rows of `(red, green, blue)` triples.
///
/// Rows are written in the order given, so `rows[0]` is the first row in the file.
pub fn encode_rows(rows: &[Vec<(u8, u8, u8)>]) -> Vec<u8> {
    assert!(!rows.is_empty(), "bitmap needs at least one row");
    let width = rows[0].len();
    assert!(rows.iter().all(|row| row.len() == width), "rows must have equal width");

    let padding = (4 - (width * 3) % 4) % 4;
    let pixel_bytes = (width * 3 + padding) * rows.len();
    let mut bytes = header(width as i32, rows.len() as i32, 24, 0, pixel_bytes);
    for row in rows {
        for &(red, green, blue) in row {
            bytes.extend_from_slice(&[blue, green, red]);
        }
        bytes.extend(std::iter::repeat_n(0u8, padding));
    }
    bytes
}

/// A bitmap of `width * height` pixels, all the same color.
pub fn encode_filled(width: usize, height: usize, color: (u8, u8, u8)) -> Vec<u8> {
    encode_rows(&vec![vec![color; width]; height])
}

/// The 54-byte file and info header of a bitmap.
pub fn header(
    width: i32,
    height: i32,
    bits_per_pixel: u16,
    compression: u32,
    pixel_bytes: usize,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(54 + pixel_bytes);
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&((54 + pixel_bytes) as u32).to_le_bytes());
    bytes.extend_from_slice(&[0u8; 4]);
    bytes.extend_from_slice(&54u32.to_le_bytes());
    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&bits_per_pixel.to_le_bytes());
    bytes.extend_from_slice(&compression.to_le_bytes());
    bytes.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
    bytes.extend_from_slice(&[0u8; 16]);
    assert_eq!(bytes.len(), 54);
    bytes
}
