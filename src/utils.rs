use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use shellexpand::tilde;

use crate::constants::{APPLICATION, ORGANIZATION, QUALIFIER};
use crate::errors::{Result, file_operation_error, generic_error, invalid_filename_error};

pub fn expand_path(path: &str) -> String {
    tilde(path).to_string()
}

/// Expand a leading `~` in a path
pub fn expand_pathbuf(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(p) => PathBuf::from(expand_path(p)),
        None => path.to_path_buf(),
    }
}

/// Expands `~` and makes `path` absolute against the current folder
///
/// Symlinks are left alone, so the result matches what a scan records.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    std::path::absolute(expand_pathbuf(path))
        .map_err(|e| file_operation_error(e, path.to_path_buf(), "resolve"))
}

/// Gets the final component of a path as a string
///
/// Bytes that are not valid Unicode are replaced, so the result is for
/// display and name inference only.
pub fn file_name_lossy(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| invalid_filename_error(path.to_path_buf()))
}

/// Shortens `path` relative to `root` for display, `...{sep}rest` style
pub fn display_relative(path: &Path, root: Option<&Path>) -> String {
    match root.and_then(|r| path.strip_prefix(r).ok()) {
        Some(rest) if !rest.as_os_str().is_empty() => {
            format!("...{}{}", std::path::MAIN_SEPARATOR, rest.display())
        }
        _ => path.display().to_string(),
    }
}

/// Human readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

pub(crate) fn find_project_folder() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| generic_error("Failed to determine project directories"))
}

/// Creates `folder` (and its parents) when it does not exist yet
pub(crate) fn ensure_folder(folder: &Path) -> Result<()> {
    if !folder.exists() {
        create_dir_all(folder)
            .map_err(|e| file_operation_error(e, folder.to_path_buf(), "create directory"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_display_relative() {
        let root = Path::new("/client/delivery");
        let nested = Path::new("/client/delivery/plates");
        let expected = format!("...{}plates", std::path::MAIN_SEPARATOR);

        assert_eq!(display_relative(nested, Some(root)), expected);
        assert_eq!(display_relative(root, Some(root)), "/client/delivery");
        assert_eq!(display_relative(nested, None), "/client/delivery/plates");
    }

    #[test]
    fn test_file_name_lossy() {
        assert_eq!(file_name_lossy(Path::new("/a/b/shot010.mov")).unwrap(), "shot010.mov");
        assert!(file_name_lossy(Path::new("/")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_name_lossy_replaces_invalid_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/in").join(OsStr::from_bytes(b"plate\xff010.exr"));

        assert_eq!(file_name_lossy(&path).unwrap(), "plate\u{FFFD}010.exr");
    }

    #[test]
    fn test_absolute_path() {
        let absolute = absolute_path(Path::new("delivery/a.mov")).unwrap();

        assert!(absolute.is_absolute());
        assert!(absolute.ends_with("delivery/a.mov"));
        assert_eq!(
            absolute_path(Path::new("/srv/a.mov")).unwrap(),
            PathBuf::from("/srv/a.mov")
        );
    }

    #[test]
    fn test_expand_path_leaves_absolute_paths_alone() {
        assert_eq!(expand_path("/srv/pipeline"), "/srv/pipeline");
    }
}
