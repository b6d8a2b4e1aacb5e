//! Mask binarization and source-over compositing.
//!
//! A grayscale mask is binarized into a transparency layer
//! (`luma < 128` becomes opaque black, everything else fully
//! transparent), fitted to the source's dimensions, and composited over
//! the opaque source:
//!
//! `result = layer * layer_alpha + source * (1 - layer_alpha)`

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, RgbImage, Rgba, RgbaImage};

/// Binarization cutover: mask luma strictly below this is opaque.
pub const BINARIZE_THRESHOLD: u8 = 128;

/// Opaque black layer pixel for dark mask regions.
const COVERED: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fully transparent layer pixel for light mask regions.
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Convert a grayscale mask into a binary transparency layer.
///
/// Hard cut at [`BINARIZE_THRESHOLD`], no antialiasing: every output
/// pixel is either opaque black or fully transparent.
#[must_use]
pub fn binarize_mask(mask: &GrayImage) -> RgbaImage {
    let layer: Vec<u8> = mask
        .as_raw()
        .iter()
        .flat_map(|&luma| {
            if luma < BINARIZE_THRESHOLD {
                COVERED.0
            } else {
                CLEAR.0
            }
        })
        .collect();

    RgbaImage::from_raw(mask.width(), mask.height(), layer)
        .expect("layer buffer length matches mask dimensions")
}

/// Scale and center-crop a layer to exactly `width` x `height`.
///
/// The layer is scaled preserving its aspect ratio until it fills the
/// target frame, then the overflow is clipped symmetrically. Nearest
/// filtering keeps a binarized layer strictly binary after resizing.
#[must_use]
pub fn fit_layer(layer: RgbaImage, width: u32, height: u32) -> RgbaImage {
    DynamicImage::ImageRgba8(layer)
        .resize_to_fill(width, height, FilterType::Nearest)
        .into_rgba8()
}

/// Composite a stripe mask over a source image.
///
/// Binarizes `mask`, fits the resulting layer to the source's exact
/// pixel dimensions, alpha-composites it over the fully opaque source,
/// and drops the alpha channel. The output always has the source's
/// dimensions, and identical inputs always produce identical pixels.
#[must_use]
pub fn composite(source: &DynamicImage, mask: &GrayImage) -> RgbImage {
    let mut base = source.to_rgba8();
    let layer = fit_layer(binarize_mask(mask), base.width(), base.height());
    imageops::overlay(&mut base, &layer, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn gradient_source(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 200])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn binarize_cutover_is_exactly_at_128() {
        let mask = GrayImage::from_fn(4, 1, |x, _| match x {
            0 => Luma([0u8]),
            1 => Luma([127]),
            2 => Luma([128]),
            _ => Luma([255]),
        });

        let layer = binarize_mask(&mask);
        assert_eq!(*layer.get_pixel(0, 0), COVERED);
        assert_eq!(*layer.get_pixel(1, 0), COVERED);
        assert_eq!(*layer.get_pixel(2, 0), CLEAR);
        assert_eq!(*layer.get_pixel(3, 0), CLEAR);
    }

    #[test]
    fn fit_layer_produces_exact_target_dimensions_and_stays_binary() {
        let mask = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 0u8 } else { 255 }]));
        let fitted = fit_layer(binarize_mask(&mask), 33, 17);

        assert_eq!(fitted.dimensions(), (33, 17));
        for px in fitted.pixels() {
            assert!(*px == COVERED || *px == CLEAR, "non-binary pixel {px:?}");
        }
    }

    #[test]
    fn composite_preserves_source_dimensions() {
        let source = gradient_source(123, 77);
        let mask = GrayImage::from_pixel(640, 640, Luma([255]));

        let result = composite(&source, &mask);
        assert_eq!(result.dimensions(), (123, 77));
    }

    #[test]
    fn all_dark_mask_covers_everything() {
        let source = gradient_source(20, 20);
        let mask = GrayImage::from_pixel(8, 8, Luma([0]));

        let result = composite(&source, &mask);
        for px in result.pixels() {
            assert_eq!(*px, image::Rgb([0, 0, 0]));
        }
    }

    #[test]
    fn all_light_mask_leaves_source_untouched() {
        let source = gradient_source(20, 20);
        let mask = GrayImage::from_pixel(8, 8, Luma([255]));

        let result = composite(&source, &mask);
        assert_eq!(result, source.to_rgb8());
    }

    #[test]
    fn composite_is_deterministic() {
        let source = gradient_source(31, 19);
        let mask = GrayImage::from_fn(16, 16, |x, y| Luma([if (x + y) % 2 == 0 { 0u8 } else { 255 }]));

        let first = composite(&source, &mask);
        let second = composite(&source, &mask);
        assert_eq!(first.as_raw(), second.as_raw());
    }
}
