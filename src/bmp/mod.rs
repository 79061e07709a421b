//! 24-bit BMP decoder and encoder (internal).
//!
//! Use top-level [`crate::decode_bmp`], [`crate::encode_bmp`], etc.

mod decode;
mod encode;
mod fields;
mod header;

use tracing::debug;

use crate::BitmapError;
use crate::bitmap::Bitmap;
use crate::decode::ImageInfo;
use crate::limits::Limits;
use fields::Cursor;

/// Probe the headers without validating or decoding pixel data.
pub(crate) fn probe(data: &[u8]) -> Result<ImageInfo, BitmapError> {
    let raw = header::read_raw_headers(&mut Cursor::new(data))?;
    Ok(ImageInfo {
        width: raw.info.width.unsigned_abs(),
        height: raw.info.height.unsigned_abs(),
        bits_per_pixel: raw.info.bits_per_pixel,
        compression: raw.info.compression,
        top_down: raw.info.height < 0,
        data_offset: raw.file.data_offset,
    })
}

/// Decode BMP data into a top-row-first bitmap.
pub(crate) fn decode(data: &[u8], limits: Option<&Limits>) -> Result<Bitmap, BitmapError> {
    let raw = header::read_raw_headers(&mut Cursor::new(data))?;
    debug!(
        file_size = raw.file.file_size,
        data_offset = raw.file.data_offset,
        header_size = raw.info.header_size,
        width = raw.info.width,
        height = raw.info.height,
        bits_per_pixel = raw.info.bits_per_pixel,
        compression = raw.info.compression,
        "parsed BMP headers"
    );
    let header = header::validate(&raw)?;
    check_limits(limits, header.width, header.height)?;
    decode::decode_pixels(data, &header)
}

fn check_limits(limits: Option<&Limits>, width: u32, height: u32) -> Result<(), BitmapError> {
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(width, height)?;
    }
    Ok(())
}

/// Encode to BMP.
pub(crate) fn encode(bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
    let out = encode::encode_bmp(bitmap)?;
    debug!(
        width = bitmap.width(),
        height = bitmap.height(),
        bytes = out.len(),
        "encoded 24-bit BMP"
    );
    Ok(out)
}
