//! Core overlay engine and orchestration.

use std::io::Write;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, RgbImage};

use crate::archive;
use crate::compositing;
use crate::error::{Error, Result};
use crate::registry::{self, PatternId};

/// Which patterns a request applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSelection {
    /// Apply a single pattern.
    One(PatternId),
    /// Apply every registered pattern, in ascending id order.
    All,
}

impl PatternSelection {
    /// The patterns this selection expands to, in application order.
    #[must_use]
    pub fn pattern_ids(self) -> Vec<PatternId> {
        match self {
            Self::One(id) => vec![id],
            Self::All => PatternId::ALL.to_vec(),
        }
    }
}

/// An encoded result image plus its suggested download filename.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    /// Suggested output filename (`patterned_<original name>`).
    pub filename: String,
    /// JPEG-encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Result of processing a single image file from disk.
#[derive(Debug)]
pub struct ProcessResult {
    /// Path of the input file.
    pub path: PathBuf,
    /// Whether processing succeeded.
    pub success: bool,
    /// Human-readable status message.
    pub message: String,
}

/// The overlay engine holding the decoded pattern masks.
///
/// Create once with [`OverlayEngine::new()`] and reuse across images.
/// The engine decodes the four embedded masks at initialization.
pub struct OverlayEngine {
    masks: [GrayImage; 4],
}

impl OverlayEngine {
    /// Create a new engine from the embedded mask resources.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MaskLoad`] if any embedded mask PNG cannot be
    /// decoded.
    pub fn new() -> Result<Self> {
        let [a, b, c, d] = PatternId::ALL;
        Ok(Self {
            masks: [
                registry::load_mask(a)?,
                registry::load_mask(b)?,
                registry::load_mask(c)?,
                registry::load_mask(d)?,
            ],
        })
    }

    /// The cached grayscale mask for a pattern.
    #[must_use]
    pub fn mask(&self, pattern: PatternId) -> &GrayImage {
        &self.masks[(pattern.id() - 1) as usize]
    }

    /// Composite a pattern over an already-decoded source image.
    ///
    /// The result always has the source's exact pixel dimensions.
    #[must_use]
    pub fn apply(&self, source: &DynamicImage, pattern: PatternId) -> RgbImage {
        compositing::composite(source, self.mask(pattern))
    }

    /// Apply one pattern to raw image bytes and encode the result.
    ///
    /// The suggested filename is `patterned_<original name>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `bytes` cannot be decoded
    /// as a raster image, or [`Error::Encode`] if encoding fails.
    pub fn process_image(
        &self,
        bytes: &[u8],
        original_name: &str,
        pattern: PatternId,
    ) -> Result<ProcessedImage> {
        let source = image::load_from_memory(bytes).map_err(Error::UnsupportedFormat)?;
        let result = self.apply(&source, pattern);
        Ok(ProcessedImage {
            filename: format!("patterned_{original_name}"),
            bytes: encode_jpeg(&result)?,
        })
    }

    /// Apply the selected pattern(s) to every image and pack the results.
    ///
    /// Pairs are processed in image-major, pattern-minor order: all
    /// patterns of the first image, then all patterns of the second, and
    /// so on. The archive holds one `patterned_image_<n>.jpg` entry per
    /// pair, in that order. The batch is all-or-nothing: any failure
    /// aborts with no archive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if `images` is empty,
    /// [`Error::UnsupportedFormat`] for an undecodable image,
    /// [`Error::Encode`] for an encoding failure, or
    /// [`Error::Packaging`] if archive assembly fails.
    pub fn process_batch<B: AsRef<[u8]> + Sync>(
        &self,
        images: &[B],
        selection: PatternSelection,
    ) -> Result<Vec<u8>> {
        if images.is_empty() {
            return Err(Error::EmptyInput);
        }
        let patterns = selection.pattern_ids();

        #[cfg(feature = "cli")]
        let per_image: Vec<Vec<Vec<u8>>> = {
            use rayon::prelude::*;
            images
                .par_iter()
                .map(|bytes| self.encode_patterns(bytes.as_ref(), &patterns))
                .collect::<Result<_>>()?
        };

        #[cfg(not(feature = "cli"))]
        let per_image: Vec<Vec<Vec<u8>>> = images
            .iter()
            .map(|bytes| self.encode_patterns(bytes.as_ref(), &patterns))
            .collect::<Result<_>>()?;

        let buffers: Vec<Vec<u8>> = per_image.into_iter().flatten().collect();
        archive::pack(&buffers)
    }

    /// Decode one image and encode it once per pattern, in order.
    fn encode_patterns(&self, bytes: &[u8], patterns: &[PatternId]) -> Result<Vec<Vec<u8>>> {
        let source = image::load_from_memory(bytes).map_err(Error::UnsupportedFormat)?;
        patterns
            .iter()
            .map(|&pattern| encode_jpeg(&self.apply(&source, pattern)))
            .collect()
    }

    /// Process a single image file: load, composite, encode, save.
    ///
    /// Returns a [`ProcessResult`] instead of an error so batch callers
    /// can report per-file status.
    #[must_use]
    pub fn process_file(&self, input: &Path, output: &Path, pattern: PatternId) -> ProcessResult {
        let mut result = ProcessResult {
            path: input.to_path_buf(),
            success: false,
            message: String::new(),
        };

        let bytes = match std::fs::read(input) {
            Ok(b) => b,
            Err(e) => {
                result.message = format!("Failed to read: {e}");
                return result;
            }
        };

        let name = input
            .file_name()
            .map_or_else(|| input.display().to_string(), |f| f.to_string_lossy().to_string());

        let processed = match self.process_image(&bytes, &name, pattern) {
            Ok(p) => p,
            Err(e) => {
                result.message = format!("Failed to process: {e}");
                return result;
            }
        };

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    result.message = format!("Failed to create output directory: {e}");
                    return result;
                }
            }
        }

        match std::fs::write(output, &processed.bytes) {
            Ok(()) => {
                result.success = true;
                result.message = format!("Applied {}", pattern.label());
            }
            Err(e) => {
                result.message = format!("Failed to save: {e}");
            }
        }

        result
    }

    /// Process image files into a zip archive written to `output`.
    ///
    /// Inputs are read in the given order, which fixes archive entry
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if an input cannot be read or the archive
    /// cannot be written, plus any [`Self::process_batch`] error.
    pub fn process_files_to_archive(
        &self,
        inputs: &[PathBuf],
        selection: PatternSelection,
        output: &Path,
    ) -> Result<()> {
        let images: Vec<Vec<u8>> = inputs
            .iter()
            .map(std::fs::read)
            .collect::<std::io::Result<_>>()?;

        let archive_bytes = self.process_batch(&images, selection)?;
        let mut file = std::fs::File::create(output)?;
        file.write_all(&archive_bytes)?;
        Ok(())
    }
}

/// Encode a composite result as JPEG with default quality settings.
///
/// # Errors
///
/// Returns [`Error::Encode`] if the encoder fails.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new(&mut bytes);
    encoder.encode_image(image).map_err(Error::Encode)?;
    Ok(bytes)
}

/// Check if a file has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(
            ext.to_lowercase().as_str(),
            "png" | "jpg" | "jpeg" | "bmp" | "gif"
        ),
        None => false,
    }
}

/// Generate a default output path from an input path.
///
/// Example: `"photo.png"` becomes `"patterned_photo.jpg"` (output is
/// always JPEG).
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input.parent().unwrap_or(Path::new("."));
    parent.join(format!("patterned_{stem}.jpg"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_one_expands_to_single_pattern() {
        let ids = PatternSelection::One(PatternId::DiagonalStripes).pattern_ids();
        assert_eq!(ids, vec![PatternId::DiagonalStripes]);
    }

    #[test]
    fn selection_all_expands_in_ascending_order() {
        let ids: Vec<u8> = PatternSelection::All
            .pattern_ids()
            .iter()
            .map(|p| p.id())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn is_supported_image_accepts_common_formats() {
        assert!(is_supported_image(Path::new("photo.png")));
        assert!(is_supported_image(Path::new("photo.JPEG")));
        assert!(is_supported_image(Path::new("photo.jpg")));
        assert!(is_supported_image(Path::new("photo.bmp")));
        assert!(is_supported_image(Path::new("photo.gif")));
    }

    #[test]
    fn is_supported_image_rejects_unsupported_formats() {
        assert!(!is_supported_image(Path::new("photo.webp")));
        assert!(!is_supported_image(Path::new("photo.txt")));
        assert!(!is_supported_image(Path::new("photo")));
    }

    #[test]
    fn default_output_path_prepends_patterned_and_uses_jpg() {
        let p = default_output_path(Path::new("/tmp/photo.png"));
        assert_eq!(p, PathBuf::from("/tmp/patterned_photo.jpg"));

        let p = default_output_path(Path::new("image.jpeg"));
        assert_eq!(p.file_name().unwrap().to_str().unwrap(), "patterned_image.jpg");
    }

    #[test]
    fn encode_jpeg_produces_a_jpeg_stream() {
        let img = RgbImage::from_pixel(16, 16, image::Rgb([120, 30, 200]));
        let bytes = encode_jpeg(&img).unwrap();
        // JPEG SOI marker.
        assert_eq!(bytes[..2], [0xFF, 0xD8]);
    }
}
