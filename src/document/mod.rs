//! Text documents and file loading.
//!
//! This module handles:
//! - Splitting raw text into an immutable [`Document`]
//! - Indexing the style markers contained in the text
//! - Reading preview files with a size guard and a decode fallback

mod types;

use std::path::Path;

pub use types::{Document, MarkerRef};

/// Largest file that will be opened for preview (20 MiB).
pub const MAX_PREVIEW_BYTES: u64 = 20 * 1024 * 1024;

/// Body shown for files that are not valid UTF-8.
pub const BINARY_PLACEHOLDER: &str = "<binary file>";

/// Errors raised while loading a file for preview.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("The given file is larger than 20mb.")]
    TooLarge { size: u64, limit: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Decode file bytes as UTF-8, substituting [`BINARY_PLACEHOLDER`] on failure.
pub fn decode_bytes(raw: Vec<u8>) -> String {
    String::from_utf8(raw).unwrap_or_else(|_| BINARY_PLACEHOLDER.to_owned())
}

/// Fail with [`LoadError::TooLarge`] if `path` exceeds [`MAX_PREVIEW_BYTES`].
///
/// # Errors
///
/// Also fails if the file metadata cannot be read.
pub fn check_size(path: &Path) -> Result<(), LoadError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_PREVIEW_BYTES {
        return Err(LoadError::TooLarge {
            size,
            limit: MAX_PREVIEW_BYTES,
        });
    }
    Ok(())
}

/// Read a file for preview.
///
/// # Errors
///
/// Returns [`LoadError::TooLarge`] for oversized files and
/// [`LoadError::Io`] when the file cannot be read. Undecodable content
/// is not an error.
pub fn read_text(path: &Path) -> Result<String, LoadError> {
    check_size(path)?;
    let raw = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = raw.len(), "read preview file");
    Ok(decode_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_decode_valid_utf8() {
        assert_eq!(decode_bytes(b"hello".to_vec()), "hello");
    }

    #[test]
    fn test_decode_invalid_utf8_uses_placeholder() {
        assert_eq!(decode_bytes(vec![0xff, 0xfe, 0x00]), "<binary file>");
    }

    #[test]
    fn test_read_text_binary_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xc3, 0x28, 0xa0]).unwrap();
        assert_eq!(read_text(&path).unwrap(), BINARY_PLACEHOLDER);
    }

    #[test]
    fn test_read_text_rejects_large_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_PREVIEW_BYTES + 1).unwrap();

        let err = read_text(&path).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { size, .. } if size == MAX_PREVIEW_BYTES + 1));
        assert_eq!(err.to_string(), "The given file is larger than 20mb.");
    }

    #[test]
    fn test_file_at_limit_is_accepted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edge.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_PREVIEW_BYTES).unwrap();
        assert!(check_size(&path).is_ok());
    }

    #[test]
    fn test_read_text_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_io_error_is_reported_once_in_chain() {
        let dir = tempdir().unwrap();
        let err = read_text(&dir.path().join("nope.txt")).unwrap_err();
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches("os error").count(), 1, "{chain}");
    }
}
