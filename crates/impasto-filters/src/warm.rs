//! Warm filter: red/green lift for a warmer tint.

use crate::types::RgbaImage;

/// Amount added to the red channel, saturating at 255.
pub const RED_LIFT: u8 = 20;

/// Amount added to the green channel, saturating at 255.
pub const GREEN_LIFT: u8 = 10;

/// Add [`RED_LIFT`] to red and [`GREEN_LIFT`] to green, both saturating
/// at 255. Blue and alpha are unchanged.
#[must_use]
pub fn warm(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0[0] = pixel.0[0].saturating_add(RED_LIFT);
        pixel.0[1] = pixel.0[1].saturating_add(GREEN_LIFT);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_red_and_green_by_fixed_amounts() {
        let img = RgbaImage::from_pixel(3, 3, image::Rgba([100, 50, 25, 255]));
        let warmed = warm(&img);
        for pixel in warmed.pixels() {
            assert_eq!(pixel.0, [120, 60, 25, 255]);
        }
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([250, 252, 254, 255]));
        let warmed = warm(&img);
        for pixel in warmed.pixels() {
            assert_eq!(pixel.0, [255, 255, 254, 255]);
        }
    }

    #[test]
    fn matches_clamp_formula_across_the_value_sweep() {
        // One pixel per input value, covering the full 0..=255 range in
        // every channel.
        let img = RgbaImage::from_fn(256, 1, |x, _| {
            let v = u8::try_from(x).unwrap_or(u8::MAX);
            image::Rgba([v, v, v, v])
        });
        let warmed = warm(&img);
        for (x, _, pixel) in warmed.enumerate_pixels() {
            let v = u8::try_from(x).unwrap_or(u8::MAX);
            assert_eq!(pixel.0[0], v.saturating_add(RED_LIFT), "red at {x}");
            assert_eq!(pixel.0[1], v.saturating_add(GREEN_LIFT), "green at {x}");
            assert_eq!(pixel.0[2], v, "blue at {x}");
            assert_eq!(pixel.0[3], v, "alpha at {x}");
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 40]));
        let before = img.clone();
        let _ = warm(&img);
        assert_eq!(img, before);
    }

    #[test]
    fn zero_area_input_returns_empty_buffer() {
        let img = RgbaImage::new(0, 0);
        let warmed = warm(&img);
        assert_eq!(warmed.dimensions(), (0, 0));
    }
}
