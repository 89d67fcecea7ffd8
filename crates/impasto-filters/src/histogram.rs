//! Per-channel histogram computation.
//!
//! Single pass over the buffer: each pixel increments the bucket indexed
//! by its selected channel value. The bucket sum always equals the pixel
//! count, so a zero-area buffer yields an all-zero histogram.

use crate::types::{Channel, RgbaImage};

/// Number of buckets in a [`Histogram`], one per possible sample value.
pub const BUCKETS: usize = 256;

/// Frequency table of one color channel: bucket `i` counts the pixels
/// whose selected channel equals `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram([u32; BUCKETS]);

impl Histogram {
    /// An all-zero histogram.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self([0; BUCKETS])
    }

    /// All 256 buckets in value order.
    #[must_use]
    pub const fn buckets(&self) -> &[u32; BUCKETS] {
        &self.0
    }

    /// Number of pixels whose channel sample equals `value`.
    #[must_use]
    pub fn count(&self, value: u8) -> u32 {
        self.0[usize::from(value)]
    }

    /// Total pixels counted, equal to the source buffer's width times height.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Largest bucket count, for scaling chart axes.
    #[must_use]
    pub fn peak(&self) -> u32 {
        self.0.iter().copied().max().unwrap_or(0)
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Count the distribution of one channel's values across the buffer.
#[must_use]
pub fn channel_histogram(image: &RgbaImage, channel: Channel) -> Histogram {
    let mut buckets = [0u32; BUCKETS];
    let offset = channel.offset();
    for pixel in image.pixels() {
        buckets[usize::from(pixel.0[offset])] += 1;
    }
    Histogram(buckets)
}
