use crate::{BitmapError, Pixel};

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded pixel buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BitmapError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BitmapError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BitmapError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check the decoded buffer for a `width` x `height` bitmap against the
    /// memory limit.
    pub(crate) fn check_memory(&self, width: u32, height: u32) -> Result<(), BitmapError> {
        if let Some(max_mem) = self.max_memory_bytes {
            let bytes = u64::from(width)
                .saturating_mul(u64::from(height))
                .saturating_mul(size_of::<Pixel>() as u64);
            if bytes > max_mem {
                return Err(BitmapError::LimitExceeded(format!(
                    "{width}x{height} bitmap needs {bytes} bytes, memory limit is {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
