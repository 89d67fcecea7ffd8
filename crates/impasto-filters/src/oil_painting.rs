//! Oil-painting filter: quantized-mode neighborhood smoothing.
//!
//! Each interior pixel is replaced by the average color of the dominant
//! intensity group in its square neighborhood, which flattens texture
//! into paint-like patches. Pixels within [`RADIUS`] of any edge are
//! copied unchanged (edge exclusion, not wraparound).
//!
//! Cost is `O(width * height * (2*RADIUS+1)^2)`, the dominant cost in
//! the filter set.

use crate::types::RgbaImage;

/// Neighborhood half-width. The examined square is `2*RADIUS+1` on a side.
pub const RADIUS: u32 = 3;

/// Number of quantized brightness levels used to group neighbors.
pub const INTENSITY_LEVELS: usize = 20;

/// Quantized brightness of an RGB triple, in `0..INTENSITY_LEVELS`.
fn intensity_bucket(r: u8, g: u8, b: u8) -> usize {
    let avg = (usize::from(r) + usize::from(g) + usize::from(b)) / 3;
    (avg * INTENSITY_LEVELS / 256).min(INTENSITY_LEVELS - 1)
}

/// Replace each interior pixel with the average RGB of its
/// majority-intensity neighbors.
///
/// For every pixel at least [`RADIUS`] from all edges: quantize each
/// neighbor in the `(2*RADIUS+1)^2` square into an intensity bucket,
/// tally per-bucket counts and channel sums, pick the bucket with the
/// highest count (ties go to the lowest bucket index), and write that
/// bucket's per-channel mean. Border pixels and alpha are preserved from
/// the input; images smaller than the neighborhood are returned unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // channel means never exceed 255
pub fn oil_painting(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    let (width, height) = image.dimensions();

    for y in RADIUS..height.saturating_sub(RADIUS) {
        for x in RADIUS..width.saturating_sub(RADIUS) {
            let mut counts = [0u32; INTENSITY_LEVELS];
            let mut sum_r = [0u32; INTENSITY_LEVELS];
            let mut sum_g = [0u32; INTENSITY_LEVELS];
            let mut sum_b = [0u32; INTENSITY_LEVELS];

            for ny in (y - RADIUS)..=(y + RADIUS) {
                for nx in (x - RADIUS)..=(x + RADIUS) {
                    let [r, g, b, _] = image.get_pixel(nx, ny).0;
                    let bucket = intensity_bucket(r, g, b);
                    counts[bucket] += 1;
                    sum_r[bucket] += u32::from(r);
                    sum_g[bucket] += u32::from(g);
                    sum_b[bucket] += u32::from(b);
                }
            }

            // Strictly-greater scan from bucket 0: ties resolve to the
            // lowest bucket index.
            let mut winner = 0;
            for (bucket, &count) in counts.iter().enumerate() {
                if count > counts[winner] {
                    winner = bucket;
                }
            }

            let count = counts[winner];
            let pixel = out.get_pixel_mut(x, y);
            pixel.0[0] = (sum_r[winner] / count) as u8;
            pixel.0[1] = (sum_g[winner] / count) as u8;
            pixel.0[2] = (sum_b[winner] / count) as u8;
        }
    }

    out
}
