use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use terrain_core::Color;
use tracing::debug;

use crate::error::StorageError;

pub const HEADER_SIZE: u32 = 54;
const INFO_HEADER_SIZE: u32 = 40;
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
const BYTES_PER_PIXEL: u64 = 3;

// Zero bytes closing each scanline so its length is a multiple of 4
#[inline]
pub fn row_padding(width: usize) -> usize {
    width % 4
}

pub fn bmp_file_size(width: usize, height: usize) -> u64 {
    let row = width as u64 * BYTES_PER_PIXEL + row_padding(width) as u64;
    HEADER_SIZE as u64 + row * height as u64
}

// 24-bit uncompressed bitmap. `pixels` must already be in scanline order:
// bottom row first, left to right.
pub fn encode_bmp<W: Write>(
    out: &mut W,
    width: usize,
    height: usize,
    pixels: &[Color],
) -> Result<(), StorageError> {
    let expected = width
        .checked_mul(height)
        .ok_or(StorageError::Dimensions { width, height })?;
    if expected != pixels.len() {
        return Err(StorageError::PixelCount {
            expected,
            actual: pixels.len(),
        });
    }
    let (w, h) = match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => return Err(StorageError::Dimensions { width, height }),
    };
    let file_size = u32::try_from(bmp_file_size(width, height))
        .map_err(|_| StorageError::Dimensions { width, height })?;
    let image_size = file_size - HEADER_SIZE;

    // File header
    out.write_all(b"BM")?;
    out.write_all(&file_size.to_le_bytes())?;
    out.write_all(&0u32.to_le_bytes())?; // reserved
    out.write_all(&HEADER_SIZE.to_le_bytes())?;

    // Info header
    out.write_all(&INFO_HEADER_SIZE.to_le_bytes())?;
    out.write_all(&w.to_le_bytes())?;
    out.write_all(&h.to_le_bytes())?; // positive height: bottom-up rows
    out.write_all(&PLANES.to_le_bytes())?;
    out.write_all(&BITS_PER_PIXEL.to_le_bytes())?;
    out.write_all(&0u32.to_le_bytes())?; // no compression
    out.write_all(&image_size.to_le_bytes())?;
    // resolution and palette counts left at zero
    out.write_all(&[0u8; 16])?;

    let padding = [0u8; 3];
    let pad = row_padding(width);
    let mut row_buf = Vec::with_capacity(width * 3 + pad);
    for row in pixels.chunks_exact(width.max(1)) {
        row_buf.clear();
        for c in row {
            row_buf.extend_from_slice(&[c.blue, c.green, c.red]);
        }
        row_buf.extend_from_slice(&padding[..pad]);
        out.write_all(&row_buf)?;
    }
    Ok(())
}

pub fn write_bmp(
    path: &Path,
    width: usize,
    height: usize,
    pixels: &[Color],
) -> Result<(), StorageError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    encode_bmp(&mut out, width, height, pixels)?;
    out.flush()?;
    debug!(path = %path.display(), width, height, "bitmap written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use palette::Srgb;

    use super::*;

    fn encode(width: usize, height: usize, pixels: &[Color]) -> Vec<u8> {
        let mut buf = Vec::new();
        encode_bmp(&mut buf, width, height, pixels).unwrap();
        buf
    }

    #[test]
    fn header_layout() {
        let px = vec![Srgb::new(1, 2, 3); 2 * 3];
        let buf = encode(2, 3, &px);
        assert_eq!(&buf[0..2], b"BM");
        assert_eq!(u32::from_le_bytes(buf[2..6].try_into().unwrap()), buf.len() as u32);
        assert_eq!(u32::from_le_bytes(buf[10..14].try_into().unwrap()), 54);
        assert_eq!(u32::from_le_bytes(buf[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(buf[18..22].try_into().unwrap()), 2);
        assert_eq!(i32::from_le_bytes(buf[22..26].try_into().unwrap()), 3);
        assert_eq!(u16::from_le_bytes(buf[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(buf[28..30].try_into().unwrap()), 24);
        assert!(buf[30..34].iter().all(|&b| b == 0));
        assert!(buf[38..54].iter().all(|&b| b == 0));
    }

    #[test]
    fn pixels_are_bgr_with_padded_rows() {
        let px = vec![Srgb::new(10, 20, 30), Srgb::new(40, 50, 60)];
        let buf = encode(1, 2, &px);
        // width 1 -> 3 data bytes + 1 pad byte per row
        assert_eq!(buf.len(), 54 + 2 * 4);
        assert_eq!(&buf[54..], &[30u8, 20, 10, 0, 60, 50, 40, 0]);
    }

    #[test]
    fn file_size_accounts_for_padding() {
        assert_eq!(bmp_file_size(500, 500), 54 + 500 * 500 * 3);
        assert_eq!(bmp_file_size(501, 2), 54 + 2 * (501 * 3 + 1));
        assert_eq!(row_padding(501), 1);
        assert_eq!(row_padding(503), 3);
    }

    #[test]
    fn pixel_count_mismatch_is_rejected() {
        let mut buf = Vec::new();
        let err = encode_bmp(&mut buf, 2, 2, &[Srgb::new(0, 0, 0)]).unwrap_err();
        assert!(matches!(
            err,
            StorageError::PixelCount {
                expected: 4,
                actual: 1
            }
        ));
        assert!(buf.is_empty());
    }
}
