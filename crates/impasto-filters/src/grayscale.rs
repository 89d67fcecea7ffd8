//! Grayscale filter: luma-weighted desaturation.
//!
//! Every pixel's RGB is replaced with a single luma value; alpha is
//! untouched. Uses the integer luma approximation
//! `(11*R + 16*G + 5*B) / 32`, which weights green heaviest and blue
//! lightest to match perceived brightness.

use crate::types::RgbaImage;

/// Integer luma of an RGB triple: `(11*R + 16*G + 5*B) / 32`.
///
/// The weights sum to 32, so the result is always in `0..=255`.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // weights sum to 32, quotient fits u8
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((11 * u16::from(r) + 16 * u16::from(g) + 5 * u16::from(b)) / 32) as u8
}

/// Replace every pixel's RGB with its luma value.
///
/// Alpha is preserved. A zero-area input returns an empty buffer.
#[must_use]
pub fn grayscale(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let y = luma(r, g, b);
        pixel.0[0] = y;
        pixel.0[1] = y;
        pixel.0[2] = y;
    }
    out
}
