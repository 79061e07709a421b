use crate::BitmapError;
use crate::bitmap::Bitmap;
use crate::limits::Limits;

/// Header facts about a BMP file, read without decoding pixels.
///
/// Probing succeeds for any file with a "BM" signature and an info header of
/// 40 bytes or more, including variants [`DecodeRequest`] rejects (other bit
/// depths, compression, top-down rows, V4/V5 headers). The 12- and 16-byte
/// OS/2 headers are reported as [`BitmapError::UnsupportedVariant`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    /// BI_* compression method, 0 for uncompressed.
    pub compression: u32,
    /// Rows stored top to bottom (negative height field).
    pub top_down: bool,
    /// Offset of the pixel array from the start of the file.
    pub data_offset: u32,
}

impl ImageInfo {
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        crate::bmp::probe(data)
    }
}

/// Decode request with optional resource limits.
///
/// ```no_run
/// use sepiabmp::{DecodeRequest, Limits};
///
/// let data = std::fs::read("photo.bmp")?;
/// let limits = Limits {
///     max_pixels: Some(64 * 1024 * 1024),
///     ..Default::default()
/// };
/// let bitmap = DecodeRequest::new(&data).with_limits(&limits).decode()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode into an owned bitmap, top row first.
    pub fn decode(self) -> Result<Bitmap, BitmapError> {
        crate::bmp::decode(self.data, self.limits)
    }
}
