use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use super::PackageError;

/// Recursively list the files below `root`, sorted by path.
///
/// Symlinked directories are not descended into; symlinks to files are
/// included.
///
/// # Errors
///
/// Fails if a directory cannot be read.
pub fn collect_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Archive entry name for `path`: relative to `root`, `/`-separated.
///
/// # Errors
///
/// Returns [`PackageError::OutsideRoot`] if `path` is not below `root`.
pub fn entry_name(root: &Path, path: &Path) -> Result<String, PackageError> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| PackageError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    Ok(parts.join("/"))
}

/// Write every file below `content` into a new zip archive at `archive`.
///
/// Entry names are relative to `content`, so the directory's own name is
/// not part of them. An existing archive is overwritten. Returns the entry
/// names in the order they were written.
///
/// # Errors
///
/// Returns [`PackageError::ContentMissing`] if `content` is not a
/// directory, and I/O or zip errors otherwise.
pub fn pack_directory(content: &Path, archive: &Path) -> Result<Vec<String>, PackageError> {
    if !content.is_dir() {
        return Err(PackageError::ContentMissing {
            path: content.to_path_buf(),
        });
    }
    let root = std::path::absolute(content)?;
    let archive_abs = std::path::absolute(archive)?;
    let files: Vec<PathBuf> = collect_files(&root)?
        .into_iter()
        .filter(|path| *path != archive_abs)
        .collect();

    let mut writer = ZipWriter::new(File::create(archive)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut names = Vec::with_capacity(files.len());
    for path in &files {
        let name = entry_name(&root, path)?;
        writer.start_file(name.as_str(), options)?;
        let mut source = File::open(path)?;
        io::copy(&mut source, &mut writer)?;
        tracing::debug!(entry = %name, "added archive entry");
        names.push(name);
    }
    writer.finish()?;

    tracing::info!(
        archive = %archive.display(),
        entries = names.len(),
        "packed content directory"
    );
    Ok(names)
}

/// Remove the archive. Returns `false` when there was nothing to remove.
///
/// # Errors
///
/// Fails if the archive exists but cannot be removed.
pub fn clean_archive(archive: &Path) -> Result<bool, PackageError> {
    if !archive.is_file() {
        return Ok(false);
    }
    fs::remove_file(archive)?;
    tracing::info!(archive = %archive.display(), "removed archive");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_entry_name_is_relative_with_forward_slashes() {
        let root = Path::new("/work/content");
        let path = root.join("sub").join("file.txt");
        assert_eq!(entry_name(root, &path).unwrap(), "sub/file.txt");
    }

    #[test]
    fn test_entry_name_outside_root_fails() {
        let err = entry_name(Path::new("/work/content"), Path::new("/elsewhere/x")).unwrap_err();
        assert!(matches!(err, PackageError::OutsideRoot { .. }));
    }

    #[test]
    fn test_collect_files_recurses_and_sorts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("b").join("c")).unwrap();
        fs::write(root.join("z.txt"), "").unwrap();
        fs::write(root.join("b").join("c").join("deep.txt"), "").unwrap();
        fs::write(root.join("a.txt"), "").unwrap();

        let files = collect_files(root).unwrap();
        let names: Vec<_> = files.iter().map(|p| entry_name(root, p).unwrap()).collect();
        assert_eq!(names, ["a.txt", "b/c/deep.txt", "z.txt"]);
    }

    #[test]
    fn test_collect_files_skips_empty_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(collect_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_pack_missing_content_fails() {
        let dir = tempdir().unwrap();
        let err =
            pack_directory(&dir.path().join("content"), &dir.path().join("p.zip")).unwrap_err();
        assert!(matches!(err, PackageError::ContentMissing { .. }));
        assert!(!dir.path().join("p.zip").exists());
    }

    #[test]
    fn test_pack_skips_archive_inside_content() {
        let dir = tempdir().unwrap();
        let content = dir.path().join("content");
        fs::create_dir(&content).unwrap();
        fs::write(content.join("a.txt"), "a").unwrap();
        let archive = content.join("package.zip");
        fs::write(&archive, "stale").unwrap();

        let names = pack_directory(&content, &archive).unwrap();
        assert_eq!(names, ["a.txt"]);
    }

    #[test]
    fn test_clean_archive() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("package.zip");
        assert!(!clean_archive(&archive).unwrap());
        fs::write(&archive, "zip").unwrap();
        assert!(clean_archive(&archive).unwrap());
        assert!(!archive.exists());
    }
}
