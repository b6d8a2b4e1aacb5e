//! In-memory zip assembly for batch results.
//!
//! Archives are built per call in a private memory buffer, never through
//! a shared filesystem path, so concurrent requests cannot observe each
//! other's output.

use std::io::{Cursor, Write};

use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{Error, Result};

/// Stem of synthesized archive entry names.
const ENTRY_STEM: &str = "patterned_image";

/// Extension matching the fixed JPEG output encoding.
const ENTRY_EXT: &str = "jpg";

/// Synthesized, 1-based entry name for the buffer at `index`.
#[must_use]
pub fn entry_name(index: usize) -> String {
    format!("{ENTRY_STEM}_{}.{ENTRY_EXT}", index + 1)
}

/// Assemble encoded buffers into a deflate-compressed zip archive.
///
/// Entry `k` holds the `k`-th buffer, stored flat (no directories, no
/// per-entry metadata) under [`entry_name`]`(k - 1)`.
///
/// # Errors
///
/// Returns [`Error::Packaging`] if any entry cannot be written in full.
pub fn pack<B: AsRef<[u8]>>(buffers: &[B]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (index, buffer) in buffers.iter().enumerate() {
        writer.start_file(entry_name(index), options)?;
        writer
            .write_all(buffer.as_ref())
            .map_err(|e| Error::Packaging(e.into()))?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    fn read_entries(archive_bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(archive_bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut contents = Vec::new();
                std::io::Read::read_to_end(&mut file, &mut contents).unwrap();
                (file.name().to_string(), contents)
            })
            .collect()
    }

    #[test]
    fn entry_names_are_one_based() {
        assert_eq!(entry_name(0), "patterned_image_1.jpg");
        assert_eq!(entry_name(3), "patterned_image_4.jpg");
    }

    #[test]
    fn pack_preserves_order_and_contents() {
        let buffers = vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()];
        let entries = read_entries(pack(&buffers).unwrap());

        assert_eq!(entries.len(), 3);
        for (i, (name, contents)) in entries.iter().enumerate() {
            assert_eq!(*name, entry_name(i));
            assert_eq!(*contents, buffers[i]);
        }
    }

    #[test]
    fn pack_of_no_buffers_is_a_valid_empty_archive() {
        let entries = read_entries(pack::<Vec<u8>>(&[]).unwrap());
        assert!(entries.is_empty());
    }
}
