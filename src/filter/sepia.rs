//! Sepia tone.

use super::{PixelFilter, apply_filter};
use crate::BitmapError;
use crate::bitmap::{Bitmap, Pixel};

/// Rows give the red, green and blue outputs; columns weight the red, green
/// and blue inputs.
const SEPIA_MATRIX: [[f64; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Blend between the original color and the full sepia color.
///
/// `strength` is the blend weight out of 255: 0 leaves pixels unchanged,
/// 255 replaces them with [`sepia_target`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sepia {
    strength: u8,
}

impl Sepia {
    /// Full-strength sepia.
    pub const FULL: Sepia = Sepia { strength: 255 };

    pub const fn new(strength: u8) -> Self {
        Self { strength }
    }

    /// Strength from a fraction in `[0, 1]`, rounded to the nearest 1/255.
    pub fn from_fraction(fraction: f32) -> Result<Self, BitmapError> {
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(BitmapError::InvalidInput(format!(
                "sepia fraction {fraction} is outside [0, 1]"
            )));
        }
        Ok(Self::new((fraction * 255.0).round() as u8))
    }

    pub fn strength(&self) -> u8 {
        self.strength
    }
}

/// The full sepia color for `pixel` as unrounded `[r, g, b]`, each clamped
/// to `[0, 255]`.
pub fn sepia_target(pixel: Pixel) -> [f64; 3] {
    let input = [f64::from(pixel.r), f64::from(pixel.g), f64::from(pixel.b)];
    SEPIA_MATRIX.map(|row| {
        let v: f64 = row.iter().zip(input).map(|(k, c)| k * c).sum();
        v.clamp(0.0, 255.0)
    })
}

/// Linear blend from `original` towards `target`, truncated to u8.
fn blend(original: u8, target: f64, alpha: f64) -> u8 {
    let o = f64::from(original);
    let v = o * (1.0 - alpha) + target * alpha;
    // Rounding error must not push the result past either endpoint.
    v.clamp(o.min(target), o.max(target)) as u8
}

impl PixelFilter for Sepia {
    fn apply_pixel(&self, pixel: Pixel) -> Pixel {
        let alpha = f64::from(self.strength) / 255.0;
        let [r, g, b] = sepia_target(pixel);
        Pixel {
            b: blend(pixel.b, b, alpha),
            g: blend(pixel.g, g, alpha),
            r: blend(pixel.r, r, alpha),
        }
    }
}

/// Apply sepia at `strength` (0..=255) to a copy of `bitmap`.
pub fn apply_sepia(bitmap: &Bitmap, strength: u8) -> Result<Bitmap, BitmapError> {
    apply_filter(bitmap, &Sepia::new(strength))
}
