//! Content addressing for decoded images.
//!
//! Cache keys must survive re-decoding the same file, so they are derived
//! from pixel content rather than from allocation identity or file paths.
//! Two images with identical dimensions and identical RGBA bytes always map
//! to the same [`Fingerprint`].

use std::fmt;

use impasto_filters::RgbaImage;
use sha2::{Digest, Sha256};

/// SHA-256 digest of an image's dimensions and raw RGBA bytes.
///
/// The dimensions are hashed alongside the pixel data so that reshapes of
/// the same byte buffer (a 2x3 image versus its 3x2 transpose) produce
/// distinct fingerprints.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Computes the fingerprint of `image`.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(image.width().to_le_bytes());
        hasher.update(image.height().to_le_bytes());
        hasher.update(image.as_raw());
        Self(hasher.finalize().into())
    }

    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Rgba;

    use super::*;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(pixel))
    }

    #[test]
    fn identical_content_matches() {
        let a = solid(4, 4, [10, 20, 30, 255]);
        let b = solid(4, 4, [10, 20, 30, 255]);

        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn single_pixel_difference_changes_digest() {
        let a = solid(4, 4, [10, 20, 30, 255]);
        let mut b = a.clone();
        b.put_pixel(3, 3, Rgba([10, 20, 31, 255]));

        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn dimensions_are_part_of_the_digest() {
        // Same byte buffer, different shape.
        let wide = solid(3, 2, [7, 7, 7, 255]);
        let tall = solid(2, 3, [7, 7, 7, 255]);
        assert_eq!(wide.as_raw(), tall.as_raw());

        assert_ne!(Fingerprint::of(&wide), Fingerprint::of(&tall));
    }

    #[test]
    fn display_is_lowercase_hex() {
        let digest = Fingerprint::of(&solid(1, 1, [0, 0, 0, 0])).to_string();

        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }
}
