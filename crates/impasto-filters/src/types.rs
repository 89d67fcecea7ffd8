//! Shared vocabulary types for the impasto filter set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can operate on pixel
/// buffers without depending on `image` directly.
pub use image::RgbaImage;

/// The four per-pixel filters the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterKind {
    /// Quantized-mode smoothing producing a painterly effect.
    OilPainting,
    /// Luma-weighted desaturation.
    Grayscale,
    /// Red/green suppression followed by uniform darkening.
    Dramatic,
    /// Red/green lift for a warmer tint.
    Warm,
}

impl FilterKind {
    /// All filters in presentation order, for iterating previews.
    pub const ALL: [Self; 4] = [
        Self::OilPainting,
        Self::Grayscale,
        Self::Dramatic,
        Self::Warm,
    ];

    /// Display label for the filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OilPainting => "Oil Painting",
            Self::Grayscale => "Grayscale",
            Self::Dramatic => "Dramatic",
            Self::Warm => "Warm",
        }
    }

    /// Lowercase identifier for file names and command-line arguments.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::OilPainting => "oil-painting",
            Self::Grayscale => "grayscale",
            Self::Dramatic => "dramatic",
            Self::Warm => "warm",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "oil-painting" | "oil painting" | "oilpainting" | "oil" => Ok(Self::OilPainting),
            "grayscale" | "greyscale" => Ok(Self::Grayscale),
            "dramatic" => Ok(Self::Dramatic),
            "warm" => Ok(Self::Warm),
            _ => Err(ParseFilterKindError(s.to_string())),
        }
    }
}

/// Error parsing a [`FilterKind`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?} (expected oil-painting, grayscale, dramatic, or warm)")]
pub struct ParseFilterKindError(String);

/// One color channel of an RGBA pixel.
///
/// A closed enum rather than a free-form selector string: an
/// unrecognized channel cannot reach the histogram calculator. String
/// boundaries (CLI flags, wire formats) parse through [`FromStr`] and
/// report [`ParseChannelError`] there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Red component.
    Red,
    /// Green component.
    Green,
    /// Blue component.
    Blue,
}

impl Channel {
    /// All channels in RGBA sample order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Byte offset of this channel within an RGBA sample.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    /// Display label for the channel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "blue" => Ok(Self::Blue),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

/// Error parsing a [`Channel`] from a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel {0:?} (expected red, green, or blue)")]
pub struct ParseChannelError(String);
