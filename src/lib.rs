//! Overlay stripe texture masks onto raster images via alpha compositing.
//!
//! Four built-in grayscale stripe masks (vertical, diagonal, horizontal,
//! vertical-concentrated) are binarized into opaque-black/transparent
//! layers, fitted to the source image, and composited over it. Results
//! are JPEG-encoded and can be packaged into a zip archive for batch
//! downloads.
//!
//! # Quick Start
//!
//! ```no_run
//! use stripe_pattern_overlay::{OverlayEngine, PatternId};
//!
//! let engine = OverlayEngine::new().expect("failed to init engine");
//! let bytes = std::fs::read("photo.png").unwrap();
//! let processed = engine
//!     .process_image(&bytes, "photo.png", PatternId::DiagonalStripes)
//!     .unwrap();
//! std::fs::write(&processed.filename, &processed.bytes).unwrap();
//! ```
//!
//! # Batch processing
//!
//! Applying several patterns and/or several images yields a zip archive
//! with entries named `patterned_image_<n>.jpg` in submission order:
//!
//! ```no_run
//! use stripe_pattern_overlay::{OverlayEngine, PatternSelection};
//!
//! let engine = OverlayEngine::new().expect("failed to init engine");
//! let images = vec![std::fs::read("a.png").unwrap(), std::fs::read("b.jpg").unwrap()];
//! let archive = engine.process_batch(&images, PatternSelection::All).unwrap();
//! std::fs::write("processed_images.zip", &archive).unwrap();
//! ```

#![deny(missing_docs)]

pub mod archive;
pub mod compositing;
mod engine;
pub mod error;
mod pattern_masks;
pub mod registry;

pub use engine::{
    default_output_path, encode_jpeg, is_supported_image, OverlayEngine, PatternSelection,
    ProcessResult, ProcessedImage,
};
pub use error::{Error, Result};
pub use registry::{load_mask, PatternId};
