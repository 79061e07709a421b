//! Per-pixel color filters.
//!
//! A filter is a pure function from one [`Pixel`] to another. [`apply_filter`]
//! runs it over a whole bitmap and returns a new bitmap of the same size.

mod sepia;

pub use sepia::{Sepia, apply_sepia, sepia_target};

use crate::BitmapError;
use crate::bitmap::{Bitmap, Pixel};

/// A pure pixel-to-pixel color transform.
///
/// Closures `Fn(Pixel) -> Pixel` are filters too.
pub trait PixelFilter {
    fn apply_pixel(&self, pixel: Pixel) -> Pixel;
}

impl<F> PixelFilter for F
where
    F: Fn(Pixel) -> Pixel,
{
    fn apply_pixel(&self, pixel: Pixel) -> Pixel {
        self(pixel)
    }
}

/// Apply `filter` to every pixel of `bitmap`, producing a new bitmap.
///
/// The source bitmap is never modified. An empty bitmap is rejected with
/// [`BitmapError::InvalidInput`].
pub fn apply_filter<F>(bitmap: &Bitmap, filter: &F) -> Result<Bitmap, BitmapError>
where
    F: PixelFilter + ?Sized,
{
    if bitmap.is_empty() {
        return Err(BitmapError::InvalidInput(format!(
            "cannot filter an empty {}x{} bitmap",
            bitmap.width(),
            bitmap.height()
        )));
    }
    Ok(bitmap.map(|p| filter.apply_pixel(p)))
}
