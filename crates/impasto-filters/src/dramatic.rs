//! Dramatic filter: red/green suppression followed by uniform darkening.
//!
//! Two stages per pixel: subtract [`RED_DROP`]/[`GREEN_DROP`] from the
//! red and green channels (blue untouched), then darken all three
//! channels to two thirds of their value. Alpha is unchanged.

use crate::types::RgbaImage;

/// Amount subtracted from the red channel, saturating at 0.
pub const RED_DROP: u8 = 30;

/// Amount subtracted from the green channel, saturating at 0.
pub const GREEN_DROP: u8 = 30;

/// Darken one channel to two thirds: `floor(c * 2 / 3)`.
#[allow(clippy::cast_possible_truncation)] // 255*2/3 = 170 fits u8
fn darken(c: u8) -> u8 {
    (u16::from(c) * 2 / 3) as u8
}

/// Apply the subtract-then-darken composition to every pixel.
#[must_use]
pub fn dramatic(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let r = pixel.0[0].saturating_sub(RED_DROP);
        let g = pixel.0[1].saturating_sub(GREEN_DROP);
        let b = pixel.0[2];
        pixel.0[0] = darken(r);
        pixel.0[1] = darken(g);
        pixel.0[2] = darken(b);
    }
    out
}
