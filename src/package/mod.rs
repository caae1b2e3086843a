//! Content directory and archive operations.
//!
//! These are plain sequential file operations; the prompts that guard the
//! destructive ones live in [`crate::commands`].

mod archive;

use std::fs;
use std::path::{Path, PathBuf};

pub use archive::{clean_archive, collect_files, entry_name, pack_directory};

/// Errors from content and archive operations.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("content directory {} does not exist", path.display())]
    ContentMissing { path: PathBuf },

    #[error("content directory {} already exists", path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error("{} is not inside {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Create the content directory.
///
/// # Errors
///
/// Returns [`PackageError::AlreadyInitialized`] if the directory exists.
pub fn init_content(dir: &Path) -> Result<(), PackageError> {
    if dir.is_dir() {
        return Err(PackageError::AlreadyInitialized {
            path: dir.to_path_buf(),
        });
    }
    fs::create_dir(dir)?;
    tracing::info!(path = %dir.display(), "created content directory");
    Ok(())
}

/// Delete everything in the content directory, leaving it empty.
///
/// # Errors
///
/// Returns [`PackageError::ContentMissing`] if the directory does not exist.
pub fn purge_content(dir: &Path) -> Result<(), PackageError> {
    if !dir.is_dir() {
        return Err(PackageError::ContentMissing {
            path: dir.to_path_buf(),
        });
    }
    fs::remove_dir_all(dir)?;
    fs::create_dir(dir)?;
    tracing::info!(path = %dir.display(), "purged content directory");
    Ok(())
}
