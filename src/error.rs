//! Error types for the stripe-pattern-overlay crate.

/// Errors that can occur while resolving patterns, compositing, or packaging.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested pattern id is not part of the fixed registry.
    #[error("unknown pattern id {id} (valid ids are 1-4)")]
    UnknownPattern {
        /// The id the caller asked for.
        id: u8,
    },

    /// The source bytes could not be decoded as a raster image.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(image::ImageError),

    /// An embedded pattern mask resource failed to decode.
    #[error("failed to decode pattern mask: {0}")]
    MaskLoad(image::ImageError),

    /// The composite result could not be encoded.
    #[error("failed to encode result image: {0}")]
    Encode(image::ImageError),

    /// Archive assembly failed.
    #[error("failed to assemble archive: {0}")]
    Packaging(#[from] zip::result::ZipError),

    /// No source images were supplied.
    #[error("no images supplied; upload one or more images to start")]
    EmptyInput,

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let unknown = Error::UnknownPattern { id: 7 };
        assert!(unknown.to_string().contains('7'));

        let io_err = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(io_err.to_string().contains("gone"));

        let empty = Error::EmptyInput;
        assert!(empty.to_string().contains("upload"));
    }
}
