//! Embedded stripe mask resources.
//!
//! Each mask is a binary-valued grayscale PNG compiled into the binary,
//! so the pattern set never depends on filesystem layout at runtime.

/// Vertical barcode-style stripes of varying widths.
pub const VERTICAL_STRIPES_PNG: &[u8] = include_bytes!("../assets/vertical_stripes.png");

/// 45-degree diagonal stripes.
pub const DIAGONAL_STRIPES_PNG: &[u8] = include_bytes!("../assets/diagonal_stripes.png");

/// Even horizontal stripes.
pub const HORIZONTAL_STRIPES_PNG: &[u8] = include_bytes!("../assets/horizontal_stripes.png");

/// Thin, densely packed vertical stripes.
pub const VERTICAL_CONCENTRATED_PNG: &[u8] = include_bytes!("../assets/vertical_concentrated.png");
