//! The fixed pattern mask registry.
//!
//! Four stripe masks ship with the crate, addressed by small integer ids.
//! The set is closed: ids outside `1..=4` fail with
//! [`Error::UnknownPattern`].

use image::GrayImage;

use crate::error::{Error, Result};
use crate::pattern_masks;

/// Identifier for one of the four built-in stripe masks.
///
/// Discriminants are the public pattern ids. Ascending id order is the
/// registry's enumeration order and determines archive entry ordering
/// when all patterns are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PatternId {
    /// Vertical barcode-style stripes (id 1).
    VerticalStripes = 1,
    /// Diagonal stripes (id 2).
    DiagonalStripes = 2,
    /// Horizontal stripes (id 3).
    HorizontalStripes = 3,
    /// Thin, densely packed vertical stripes (id 4).
    VerticalConcentrated = 4,
}

impl PatternId {
    /// All registered patterns in ascending id order.
    pub const ALL: [Self; 4] = [
        Self::VerticalStripes,
        Self::DiagonalStripes,
        Self::HorizontalStripes,
        Self::VerticalConcentrated,
    ];

    /// Resolve a numeric pattern id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPattern`] for ids outside `1..=4`.
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1 => Ok(Self::VerticalStripes),
            2 => Ok(Self::DiagonalStripes),
            3 => Ok(Self::HorizontalStripes),
            4 => Ok(Self::VerticalConcentrated),
            _ => Err(Error::UnknownPattern { id }),
        }
    }

    /// The numeric id of this pattern.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Human-readable pattern name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VerticalStripes => "Vertical Stripes",
            Self::DiagonalStripes => "Diagonal Stripes",
            Self::HorizontalStripes => "Horizontal Stripes",
            Self::VerticalConcentrated => "Vertical Concentrated Stripes",
        }
    }

    /// The embedded PNG bytes backing this pattern.
    pub(crate) const fn png_bytes(self) -> &'static [u8] {
        match self {
            Self::VerticalStripes => pattern_masks::VERTICAL_STRIPES_PNG,
            Self::DiagonalStripes => pattern_masks::DIAGONAL_STRIPES_PNG,
            Self::HorizontalStripes => pattern_masks::HORIZONTAL_STRIPES_PNG,
            Self::VerticalConcentrated => pattern_masks::VERTICAL_CONCENTRATED_PNG,
        }
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Decode the grayscale mask backing a pattern.
///
/// Decodes the embedded resource on every call. [`crate::OverlayEngine`]
/// decodes each mask once at construction instead.
///
/// # Errors
///
/// Returns [`Error::MaskLoad`] if the embedded resource cannot be decoded.
pub fn load_mask(id: PatternId) -> Result<GrayImage> {
    let img = image::load_from_memory(id.png_bytes()).map_err(Error::MaskLoad)?;
    Ok(img.to_luma8())
}
