//! BITMAPFILEHEADER and BITMAPINFOHEADER.

use super::fields::{Cursor, le_struct};
use crate::BitmapError;

/// `"BM"`.
pub(crate) const SIGNATURE: [u8; 2] = *b"BM";
/// Size of the only info header version this codec decodes.
pub(crate) const INFO_HEADER_SIZE: u32 = 40;
/// File header plus info header; also the pixel data offset we write.
pub(crate) const HEADERS_SIZE: usize = FileHeader::SIZE + InfoHeader::SIZE;

le_struct! {
    /// The 14-byte file header.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct FileHeader {
        signature: [u8; 2],
        file_size: u32,
        reserved1: u16,
        reserved2: u16,
        /// Offset from the start of the file to the pixel array.
        data_offset: u32,
    }
}

le_struct! {
    /// The 40-byte BITMAPINFOHEADER.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub(crate) struct InfoHeader {
        header_size: u32,
        width: i32,
        /// Positive = bottom-up rows, negative = top-down.
        height: i32,
        planes: u16,
        bits_per_pixel: u16,
        compression: u32,
        /// May be 0 for uncompressed images.
        image_size: u32,
        x_pixels_per_meter: i32,
        y_pixels_per_meter: i32,
        colors_used: u32,
        colors_important: u32,
    }
}

/// Both headers as read from the start of a file, before any validation
/// beyond the signature.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawHeaders {
    pub file: FileHeader,
    pub info: InfoHeader,
}

/// Headers that passed validation for decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub width: u32,
    pub height: u32,
    pub data_offset: usize,
}

/// Bytes per stored row for a 24-bit image: `width * 3` rounded up to a
/// multiple of 4.
pub(crate) fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Read the file header and the fixed 40 bytes of the info header.
///
/// Only the signature and the info header size are checked here. Headers
/// of 40 bytes or more share the same leading layout, so newer versions
/// are still read as their first 40 bytes; the shorter OS/2 headers use
/// 16-bit dimensions and are rejected before anything is misread.
pub(crate) fn read_raw_headers(cursor: &mut Cursor<'_>) -> Result<RawHeaders, BitmapError> {
    if cursor.read_fixed_bytes::<2>()? != SIGNATURE {
        return Err(BitmapError::UnrecognizedFormat);
    }
    cursor.set_position(0)?;

    let file = FileHeader::read(cursor)?;
    let header_size = cursor.peek::<u32>()?;
    if header_size < INFO_HEADER_SIZE {
        return Err(header_size_error(header_size));
    }
    let info = InfoHeader::read(cursor)?;
    Ok(RawHeaders { file, info })
}

fn header_size_error(header_size: u32) -> BitmapError {
    match header_size {
        12 | 16 | 52 | 56 | 64 | 108 | 124 => BitmapError::UnsupportedVariant(format!(
            "BMP info header version with size {header_size}"
        )),
        other => BitmapError::InvalidHeader(format!("unknown BMP info header size: {other}")),
    }
}

/// Validate headers for a 24-bit, uncompressed, bottom-up image.
pub(crate) fn validate(raw: &RawHeaders) -> Result<BmpHeader, BitmapError> {
    let info = &raw.info;

    if info.header_size != INFO_HEADER_SIZE {
        return Err(header_size_error(info.header_size));
    }

    if info.planes != 1 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP planes field is {}, expected 1",
            info.planes
        )));
    }

    match info.bits_per_pixel {
        24 => {}
        1 | 2 | 4 | 8 | 16 | 32 => {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP bit depth {} unsupported",
                info.bits_per_pixel
            )));
        }
        other => {
            return Err(BitmapError::InvalidHeader(format!(
                "invalid BMP bit depth: {other}"
            )));
        }
    }

    match info.compression {
        0 => {}
        1..=6 => {
            return Err(BitmapError::UnsupportedVariant(format!(
                "BMP compression method {} unsupported",
                info.compression
            )));
        }
        other => {
            return Err(BitmapError::InvalidHeader(format!(
                "unknown BMP compression method: {other}"
            )));
        }
    }

    if info.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP width is {}",
            info.width
        )));
    }
    if info.height == 0 {
        return Err(BitmapError::InvalidHeader("BMP height is zero".into()));
    }
    if info.height < 0 {
        return Err(BitmapError::UnsupportedVariant(
            "top-down BMP row order".into(),
        ));
    }

    let data_offset = raw.file.data_offset as usize;
    if data_offset < HEADERS_SIZE {
        return Err(BitmapError::InvalidHeader(format!(
            "BMP pixel data offset {data_offset} overlaps the headers"
        )));
    }

    Ok(BmpHeader {
        width: info.width as u32,
        height: info.height as u32,
        data_offset,
    })
}

/// Headers for an uncompressed 24-bit bottom-up image of the given size.
pub(crate) fn for_24bit(
    width: u32,
    height: u32,
    file_size: u32,
) -> Result<(FileHeader, InfoHeader), BitmapError> {
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u64::from(width),
        height: u64::from(height),
    };
    let width = i32::try_from(width).map_err(|_| too_large())?;
    let height = i32::try_from(height).map_err(|_| too_large())?;

    let file = FileHeader {
        signature: SIGNATURE,
        file_size,
        reserved1: 0,
        reserved2: 0,
        data_offset: HEADERS_SIZE as u32,
    };
    let info = InfoHeader {
        header_size: INFO_HEADER_SIZE,
        width,
        height,
        planes: 1,
        bits_per_pixel: 24,
        compression: 0,
        image_size: 0,
        x_pixels_per_meter: 0,
        y_pixels_per_meter: 0,
        colors_used: 0,
        colors_important: 0,
    };
    Ok((file, info))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(width: i32, height: i32) -> RawHeaders {
        let (file, mut info) = for_24bit(1, 1, 58).unwrap();
        info.width = width;
        info.height = height;
        RawHeaders { file, info }
    }

    #[test]
    fn header_sizes() {
        assert_eq!(FileHeader::SIZE, 14);
        assert_eq!(InfoHeader::SIZE, 40);
        assert_eq!(HEADERS_SIZE, 54);
    }

    #[test]
    fn stride_rounds_up_to_four() {
        assert_eq!(row_stride(1), Some(4));
        assert_eq!(row_stride(4), Some(12));
        assert_eq!(row_stride(5), Some(16));
        assert_eq!(row_stride(0), Some(0));
    }

    #[test]
    fn accepts_plain_24bit() {
        let h = validate(&raw(3, 2)).unwrap();
        assert_eq!(
            h,
            BmpHeader {
                width: 3,
                height: 2,
                data_offset: 54
            }
        );
    }

    #[test]
    fn top_down_is_unsupported() {
        assert!(matches!(
            validate(&raw(3, -2)),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn zero_dimensions_are_invalid() {
        assert!(matches!(
            validate(&raw(0, 2)),
            Err(BitmapError::InvalidHeader(_))
        ));
        assert!(matches!(
            validate(&raw(2, 0)),
            Err(BitmapError::InvalidHeader(_))
        ));
        assert!(matches!(
            validate(&raw(-2, 2)),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_other_depths_and_compression() {
        let mut r = raw(1, 1);
        r.info.bits_per_pixel = 32;
        assert!(matches!(
            validate(&r),
            Err(BitmapError::UnsupportedVariant(_))
        ));
        r.info.bits_per_pixel = 7;
        assert!(matches!(validate(&r), Err(BitmapError::InvalidHeader(_))));

        let mut r = raw(1, 1);
        r.info.compression = 1;
        assert!(matches!(
            validate(&r),
            Err(BitmapError::UnsupportedVariant(_))
        ));

        let mut r = raw(1, 1);
        r.info.planes = 2;
        assert!(matches!(validate(&r), Err(BitmapError::InvalidHeader(_))));

        let mut r = raw(1, 1);
        r.info.header_size = 124;
        assert!(matches!(
            validate(&r),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    fn core_header(width: u16, height: u16) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&30u32.to_le_bytes());
        out.extend_from_slice(&[0; 4]);
        out.extend_from_slice(&26u32.to_le_bytes());
        out.extend_from_slice(&12u32.to_le_bytes());
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&[0, 0, 255, 0]);
        out
    }

    #[test]
    fn short_core_header_is_unsupported_not_eof() {
        let data = core_header(1, 1);
        assert_eq!(data.len(), 30);
        assert!(matches!(
            read_raw_headers(&mut Cursor::new(&data)),
            Err(BitmapError::UnsupportedVariant(_))
        ));
    }

    #[test]
    fn tiny_unknown_header_size_is_invalid() {
        let mut data = core_header(1, 1);
        data[14..18].copy_from_slice(&20u32.to_le_bytes());
        assert!(matches!(
            read_raw_headers(&mut Cursor::new(&data)),
            Err(BitmapError::InvalidHeader(_))
        ));
    }

    #[test]
    fn offset_inside_headers_is_invalid() {
        let mut r = raw(1, 1);
        r.file.data_offset = 40;
        assert!(matches!(validate(&r), Err(BitmapError::InvalidHeader(_))));
    }

    #[test]
    fn oversized_dimensions_for_encode() {
        assert!(matches!(
            for_24bit(u32::MAX, 1, 0),
            Err(BitmapError::DimensionsTooLarge { .. })
        ));
    }
}
