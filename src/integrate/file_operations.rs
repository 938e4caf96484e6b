//! File operations used while integrating

use std::fs::{canonicalize, create_dir_all};
use std::path::Path;

use fs_extra::file::{CopyOptions, copy};
use log::debug;

use crate::errors::{Result, copy_failure_error, file_operation_error};

/// Creates `directory` and every missing parent
///
/// Returns true when the directory had to be created.
pub(crate) fn ensure_directory(directory: &Path) -> Result<bool> {
    if directory.is_dir() {
        return Ok(false);
    }
    create_dir_all(directory)
        .map_err(|e| file_operation_error(e, directory.to_path_buf(), "create directory"))?;
    Ok(true)
}

/// Copies `source` to `destination`, replacing an existing file
///
/// The parent of `destination` is created first. The copy only counts as
/// done when the destination file exists afterwards. A source that already
/// is the destination file is left untouched.
pub(crate) fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        ensure_directory(parent)?;
    }

    if is_same_file(source, destination)? {
        debug!("Already in place: {}", destination.display());
        return Ok(());
    }

    debug!(
        "Copying file: {} -> {}",
        source.display(),
        destination.display()
    );
    let options = CopyOptions::new().overwrite(true);
    copy(source, destination, &options)
        .map_err(|e| copy_failure_error(destination.to_path_buf(), &e.to_string()))?;

    if !destination.is_file() {
        return Err(copy_failure_error(
            destination.to_path_buf(),
            "destination file is missing after the copy",
        ));
    }
    Ok(())
}

/// True when `destination` exists and resolves to the same file as `source`
fn is_same_file(source: &Path, destination: &Path) -> Result<bool> {
    if !destination.exists() {
        return Ok(false);
    }
    let source = canonicalize(source)
        .map_err(|e| file_operation_error(e, source.to_path_buf(), "resolve"))?;
    let destination = canonicalize(destination)
        .map_err(|e| file_operation_error(e, destination.to_path_buf(), "resolve"))?;
    Ok(source == destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_file_creates_parents_and_overwrites() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.mov");
        fs::write(&source, b"new").unwrap();
        let destination = temp_dir.path().join("out/seq/shot/Plate/a.mov");

        copy_file(&source, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"new");

        fs::write(&source, b"newer").unwrap();
        copy_file(&source, &destination).unwrap();
        assert_eq!(fs::read(&destination).unwrap(), b"newer");
    }

    #[test]
    fn test_copy_onto_itself_keeps_the_file() {
        let temp_dir = tempdir().unwrap();
        let file = temp_dir.path().join("out/seq01/seq01_010/Plate/a.mov");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, b"client frames").unwrap();

        copy_file(&file, &file).unwrap();
        assert_eq!(fs::read(&file).unwrap(), b"client frames");

        let indirect = temp_dir.path().join("out/seq01/../seq01/seq01_010/Plate/a.mov");
        copy_file(&indirect, &file).unwrap();
        assert_eq!(fs::read(&file).unwrap(), b"client frames");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp_dir = tempdir().unwrap();
        let destination = temp_dir.path().join("out/a.mov");

        let result = copy_file(&temp_dir.path().join("missing.mov"), &destination);

        assert!(result.is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn test_ensure_directory_reports_creation() {
        let temp_dir = tempdir().unwrap();
        let directory = temp_dir.path().join("seq01/seq01_010");

        assert!(ensure_directory(&directory).unwrap());
        assert!(!ensure_directory(&directory).unwrap());
        assert!(directory.is_dir());
    }
}
