//! 24-bit uncompressed BMP decoder.

use super::fields::Cursor;
use super::header::{BmpHeader, row_stride};
use crate::BitmapError;
use crate::bitmap::{Bitmap, Pixel};

/// Decode the pixel array described by `header`.
///
/// Stored rows run bottom to top; the returned bitmap has its top row first.
/// Row padding is skipped and never reaches the pixel data.
pub(crate) fn decode_pixels(data: &[u8], header: &BmpHeader) -> Result<Bitmap, BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(header.width),
        height: u64::from(header.height),
    };
    let w = header.width as usize;
    let h = header.height as usize;
    let stride = row_stride(header.width).ok_or_else(too_large)?;
    let pixel_bytes = w * 3;
    let pad = stride - pixel_bytes;

    let mut cursor = Cursor::new(data);
    cursor.set_position(header.data_offset)?;

    // Check the whole array is present before allocating for it.
    let needed = stride.checked_mul(h).ok_or_else(too_large)?;
    let available = data.len() - cursor.position();
    // Some writers drop the final row's padding.
    if available.saturating_add(pad) < needed {
        return Err(BitmapError::UnexpectedEof);
    }

    let count = w.checked_mul(h).ok_or_else(too_large)?;
    let mut pixels = vec![Pixel::default(); count];

    for row in (0..h).rev() {
        let src = cursor.take(pixel_bytes)?;
        let dst = &mut pixels[row * w..(row + 1) * w];
        for (px, bgr) in dst.iter_mut().zip(src.chunks_exact(3)) {
            *px = Pixel {
                b: bgr[0],
                g: bgr[1],
                r: bgr[2],
            };
        }
        if row > 0 {
            cursor.skip(pad)?;
        }
    }

    Bitmap::new(header.width, header.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: u32, height: u32) -> BmpHeader {
        BmpHeader {
            width,
            height,
            data_offset: 0,
        }
    }

    #[test]
    fn flips_rows_and_swaps_channels() {
        // 1x2: stored bottom row first, each row padded to 4 bytes
        let data = [
            1, 2, 3, 0, // bottom: b=1 g=2 r=3
            4, 5, 6, 0, // top
        ];
        let bmp = decode_pixels(&data, &header(1, 2)).unwrap();
        assert_eq!(bmp.get(0, 0), Some(Pixel { b: 4, g: 5, r: 6 }));
        assert_eq!(bmp.get(0, 1), Some(Pixel { b: 1, g: 2, r: 3 }));
    }

    #[test]
    fn padding_never_leaks() {
        // width 5: 15 pixel bytes + 1 pad byte per row
        let mut data = Vec::new();
        for _ in 0..2 {
            data.extend(std::iter::repeat_n(7u8, 15));
            data.push(0xEE);
        }
        let bmp = decode_pixels(&data, &header(5, 2)).unwrap();
        assert!(bmp.pixels().iter().all(|p| *p == Pixel { b: 7, g: 7, r: 7 }));
    }

    #[test]
    fn missing_final_padding_is_tolerated() {
        let data = [9, 9, 9, 0, 8, 8, 8];
        let bmp = decode_pixels(&data, &header(1, 2)).unwrap();
        assert_eq!(bmp.get(0, 0), Some(Pixel { b: 8, g: 8, r: 8 }));
    }

    #[test]
    fn truncated_rows_are_eof() {
        let data = [9, 9, 9, 0, 8, 8];
        assert!(matches!(
            decode_pixels(&data, &header(1, 2)),
            Err(BitmapError::UnexpectedEof)
        ));
    }
}
