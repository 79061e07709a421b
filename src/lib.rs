//! # sepiabmp
//!
//! Uncompressed 24-bit BMP decoder and encoder, plus a sepia-tone filter.
//!
//! The pipeline is three steps, each owning its buffer: decode a file into a
//! [`Bitmap`], run a [`PixelFilter`] over it to get a new [`Bitmap`], encode
//! that back to BMP.
//!
//! ## Supported Format
//!
//! - BITMAPINFOHEADER (40-byte) files, 24 bits per pixel, uncompressed,
//!   bottom-up row order. Any color table or gap before the pixel array is
//!   skipped using the file header's data offset.
//! - Encoding always writes that same variant.
//!
//! Other bit depths, RLE/bitfield compression, newer header versions and
//! top-down files are reported as [`BitmapError::UnsupportedVariant`].
//! [`ImageInfo::from_bytes`] can still probe them.
//!
//! ## Usage
//!
//! ```no_run
//! use sepiabmp::{apply_sepia, read_bmp_file, write_bmp_file, Sepia};
//!
//! let bitmap = read_bmp_file("photo.bmp")?;
//! let strength = Sepia::from_fraction(0.8)?.strength();
//! let toned = apply_sepia(&bitmap, strength)?;
//! write_bmp_file(&toned, "sepia.bmp")?;
//! # Ok::<(), sepiabmp::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
mod bmp;
mod decode;
mod error;
mod limits;

pub mod filter;

use std::fs;
use std::path::Path;

use tracing::debug;

// Re-exports
pub use bitmap::{Bitmap, Pixel};
pub use decode::{DecodeRequest, ImageInfo};
pub use error::{BitmapError, ErrorKind};
pub use filter::{PixelFilter, Sepia, apply_filter, apply_sepia};
pub use limits::Limits;

/// Decode BMP bytes with no resource limits.
pub fn decode_bmp(data: &[u8]) -> Result<Bitmap, BitmapError> {
    DecodeRequest::new(data).decode()
}

/// Encode a bitmap as 24-bit BMP bytes.
///
/// Empty bitmaps are rejected with [`BitmapError::InvalidInput`].
pub fn encode_bmp(bitmap: &Bitmap) -> Result<Vec<u8>, BitmapError> {
    bmp::encode(bitmap)
}

/// Read and decode a BMP file.
///
/// The file is read completely and closed before decoding starts.
pub fn read_bmp_file(path: impl AsRef<Path>) -> Result<Bitmap, BitmapError> {
    read_bmp_file_with_limits(path, &Limits::default())
}

/// Read and decode a BMP file, enforcing `limits`.
pub fn read_bmp_file_with_limits(
    path: impl AsRef<Path>,
    limits: &Limits,
) -> Result<Bitmap, BitmapError> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    debug!(path = %path.display(), bytes = data.len(), "read BMP file");
    DecodeRequest::new(&data).with_limits(limits).decode()
}

/// Encode a bitmap and write it to `path`, replacing any existing file.
///
/// Nothing is created when encoding fails.
pub fn write_bmp_file(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let data = encode_bmp(bitmap)?;
    fs::write(path, &data)?;
    debug!(path = %path.display(), bytes = data.len(), "wrote BMP file");
    Ok(())
}
