//! impasto-filters: Pure pixel filters and histogram computation (sans-IO).
//!
//! The algorithmic core of the editor: four deterministic image-to-image
//! filters (oil painting, grayscale, dramatic, warm) and a per-channel
//! 256-bucket histogram, all operating on in-memory RGBA buffers.
//!
//! This crate has **no I/O dependencies** -- decoding and encoding image
//! files, caching, and scheduling live elsewhere (`impasto-engine` and
//! its callers). Every filter returns a new buffer and never mutates its
//! input; a zero-area input produces a zero-area output.

pub mod dramatic;
pub mod grayscale;
pub mod histogram;
pub mod oil_painting;
pub mod types;
pub mod warm;

pub use histogram::{BUCKETS, Histogram, channel_histogram};
pub use types::{Channel, FilterKind, ParseChannelError, ParseFilterKindError, RgbaImage};

/// Apply one filter to a buffer.
///
/// Dispatches to the per-filter modules; see each module for the exact
/// per-pixel formula.
#[must_use]
pub fn apply(image: &RgbaImage, kind: FilterKind) -> RgbaImage {
    match kind {
        FilterKind::OilPainting => oil_painting::oil_painting(image),
        FilterKind::Grayscale => grayscale::grayscale(image),
        FilterKind::Dramatic => dramatic::dramatic(image),
        FilterKind::Warm => warm::warm(image),
    }
}
