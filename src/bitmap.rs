//! In-memory 24-bit bitmap.

use crate::BitmapError;

/// One pixel: blue, green and red channels, 8 bits each, in BMP wire order.
///
/// There is no alpha channel and no packed-integer view; construct with a
/// struct literal, e.g. `Pixel { b: 0, g: 128, r: 255 }`.
pub type Pixel = rgb::alt::BGR8;

/// An owned, row-major grid of [`Pixel`]s.
///
/// Row 0 is the visual top row. The pixel buffer always holds exactly
/// `width * height` entries; `(x, y)` lives at index `y * width + x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Wrap an existing pixel buffer.
    ///
    /// Returns [`BitmapError::InvalidInput`] if `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BitmapError::InvalidInput(format!(
                "{width}x{height} bitmap needs {expected} pixels, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A bitmap with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Result<Self, BitmapError> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; count],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when the bitmap holds no pixels (either dimension is zero).
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major, top row first.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// The pixel at `(x, y)`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        let i = self.index(x, y)?;
        Some(&mut self.pixels[i])
    }

    /// One row, `width` pixels long.
    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.pixels[start..start + w])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Pixel]> + ExactSizeIterator {
        // chunks_exact(0) panics; a zero-width bitmap has no pixels anyway
        self.pixels.chunks_exact(self.width.max(1) as usize)
    }

    /// Build a new bitmap of the same dimensions by applying `f` to every pixel.
    ///
    /// `self` is left untouched.
    pub fn map<F>(&self, mut f: F) -> Bitmap
    where
        F: FnMut(Pixel) -> Pixel,
    {
        Bitmap {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

fn pixel_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge {
            width: u64::from(width),
            height: u64::from(height),
        })
}
