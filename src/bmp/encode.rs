//! BMP encoder: uncompressed 24-bit, bottom-up.

use super::header::{self, HEADERS_SIZE, row_stride};
use crate::BitmapError;
use crate::bitmap::Bitmap;

/// Encode a bitmap as a complete BMP file.
pub(crate) fn encode_bmp(bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
    if bitmap.is_empty() {
        return Err(BitmapError::InvalidInput(format!(
            "cannot encode an empty {}x{} bitmap",
            bitmap.width(),
            bitmap.height()
        )));
    }

    let width = bitmap.width();
    let height = bitmap.height();
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(width),
        height: u64::from(height),
    };

    let stride = row_stride(width).ok_or_else(too_large)?;
    let pixel_data_size = stride
        .checked_mul(height as usize)
        .ok_or_else(too_large)?;
    let file_size = pixel_data_size
        .checked_add(HEADERS_SIZE)
        .ok_or_else(too_large)?;
    let file_size_field = u32::try_from(file_size).map_err(|_| too_large())?;

    let (file_header, info_header) = header::for_24bit(width, height, file_size_field)?;

    let mut out = Vec::with_capacity(file_size);
    file_header.write(&mut out);
    info_header.write(&mut out);

    let pad_bytes = stride - width as usize * 3;
    for row in bitmap.rows().rev() {
        for px in row {
            out.extend_from_slice(&[px.b, px.g, px.r]);
        }
        out.extend(std::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Pixel;

    #[test]
    fn header_fields() {
        let bmp = Bitmap::filled(3, 2, Pixel { b: 1, g: 2, r: 3 }).unwrap();
        let out = encode_bmp(&bmp).unwrap();

        assert_eq!(&out[0..2], b"BM");
        let u32_at = |o: usize| u32::from_le_bytes(out[o..o + 4].try_into().unwrap());
        let u16_at = |o: usize| u16::from_le_bytes(out[o..o + 2].try_into().unwrap());
        assert_eq!(u32_at(2) as usize, out.len());
        assert_eq!(u32_at(2), 54 + 12 * 2);
        assert_eq!(u32_at(6), 0); // reserved
        assert_eq!(u32_at(10), 54);
        assert_eq!(u32_at(14), 40);
        assert_eq!(u32_at(18), 3);
        assert_eq!(u32_at(22), 2);
        assert_eq!(u16_at(26), 1);
        assert_eq!(u16_at(28), 24);
        for off in (30..54).step_by(4) {
            assert_eq!(u32_at(off), 0, "field at {off}");
        }
    }

    #[test]
    fn rows_are_bottom_up_bgr() {
        let top = Pixel { b: 10, g: 20, r: 30 };
        let bottom = Pixel { b: 40, g: 50, r: 60 };
        let bmp = Bitmap::new(1, 2, vec![top, bottom]).unwrap();
        let out = encode_bmp(&bmp).unwrap();
        assert_eq!(&out[54..], &[40, 50, 60, 0, 10, 20, 30, 0]);
    }

    #[test]
    fn padding_per_row() {
        let px = Pixel { b: 1, g: 1, r: 1 };

        let five = encode_bmp(&Bitmap::filled(5, 3, px).unwrap()).unwrap();
        assert_eq!(five.len(), 54 + 16 * 3);
        for row in five[54..].chunks_exact(16) {
            assert_eq!(row[15], 0);
            assert!(row[..15].iter().all(|&b| b == 1));
        }

        let four = encode_bmp(&Bitmap::filled(4, 3, px).unwrap()).unwrap();
        assert_eq!(four.len(), 54 + 12 * 3);
        assert!(four[54..].iter().all(|&b| b == 1));
    }

    #[test]
    fn empty_bitmap_is_invalid_input() {
        let empty = Bitmap::new(0, 0, Vec::new()).unwrap();
        assert!(matches!(
            encode_bmp(&empty),
            Err(BitmapError::InvalidInput(_))
        ));
    }
}
