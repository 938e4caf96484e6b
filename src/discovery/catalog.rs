//! File catalog
//!
//! Builds the list of files found under a selected file or folder, each
//! annotated with the sequence and shot inferred from its name.

use std::collections::HashSet;
use std::fs::{self, read_dir};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use once_cell::unsync::OnceCell;

use crate::discovery::naming::{NamingInfo, infer};
use crate::errors::{Result, file_operation_error, not_found_error, path_operation_error};
use crate::utils::file_name_lossy;

/// A single file found while building a catalog
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    source_path: PathBuf,
    containing_folder: PathBuf,
    root_folder: Option<PathBuf>,
    filename: String,
    naming: NamingInfo,
    size_bytes: OnceCell<u64>,
}

impl CatalogEntry {
    /// Creates an entry for `path`, inferring its naming once
    ///
    /// A name that is not valid Unicode is kept lossily in `filename`; the
    /// source path stays exact.
    ///
    /// # Errors
    /// Returns an error if `path` has no file name or no parent
    pub fn new(path: PathBuf, root_folder: Option<PathBuf>) -> Result<Self> {
        let filename = file_name_lossy(&path)?;
        let containing_folder = path
            .parent()
            .ok_or_else(|| path_operation_error(path.clone(), "get parent directory"))?
            .to_path_buf();
        let naming = infer(&filename);

        Ok(CatalogEntry {
            source_path: path,
            containing_folder,
            root_folder,
            filename,
            naming,
            size_bytes: OnceCell::new(),
        })
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn containing_folder(&self) -> &Path {
        &self.containing_folder
    }

    /// The folder selected by the user, `None` for a single-file selection
    pub fn root_folder(&self) -> Option<&Path> {
        self.root_folder.as_deref()
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn naming(&self) -> &NamingInfo {
        &self.naming
    }

    pub fn inferred_sequence(&self) -> &str {
        &self.naming.sequence
    }

    pub fn inferred_shot(&self) -> &str {
        &self.naming.shot
    }

    /// Size of the file, read from the filesystem on first use
    pub fn size_bytes(&self) -> Result<u64> {
        self.size_bytes
            .get_or_try_init(|| {
                fs::metadata(&self.source_path)
                    .map(|metadata| metadata.len())
                    .map_err(|e| file_operation_error(e, self.source_path.clone(), "read size of"))
            })
            .copied()
    }
}

/// Files discovered from one selected file or folder
#[derive(Debug, Clone)]
pub struct FileCatalog {
    root: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl FileCatalog {
    /// Builds a catalog from a file or folder
    ///
    /// A file yields a single entry without a root folder. A folder is walked
    /// recursively and yields one entry per regular file, in directory listing
    /// order, all sharing the folder as their root.
    ///
    /// # Errors
    /// Returns an error if `root` does not exist or if any folder below it
    /// cannot be read. Partial catalogs are never returned.
    pub fn build(root: &Path) -> Result<FileCatalog> {
        let metadata = fs::metadata(root).map_err(|e| match e.kind() {
            ErrorKind::NotFound => not_found_error(root.to_path_buf()),
            _ => file_operation_error(e, root.to_path_buf(), "read"),
        })?;

        let mut entries = Vec::new();
        if metadata.is_dir() {
            debug!("Scanning folder: {}", root.display());
            let mut visited = HashSet::new();
            walk_folder(root, root, &mut visited, &mut entries)?;
        } else {
            debug!("Adding single file: {}", root.display());
            entries.push(CatalogEntry::new(root.to_path_buf(), None)?);
        }

        debug!("Found {} files in {}", entries.len(), root.display());

        Ok(FileCatalog {
            root: root.to_path_buf(),
            entries,
        })
    }

    /// The path the catalog was built from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True when the catalog was built from a folder
    pub fn is_folder(&self) -> bool {
        self.entries
            .first()
            .map_or(self.root.is_dir(), |entry| entry.root_folder.is_some())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total size in bytes of every file in the catalog
    pub fn cumulative_size(&self) -> Result<u64> {
        self.entries.iter().map(CatalogEntry::size_bytes).sum()
    }
}

impl<'a> IntoIterator for &'a FileCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn walk_folder(
    root: &Path,
    folder: &Path,
    visited: &mut HashSet<PathBuf>,
    entries: &mut Vec<CatalogEntry>,
) -> Result<()> {
    let canonical = fs::canonicalize(folder)
        .map_err(|e| file_operation_error(e, folder.to_path_buf(), "resolve"))?;
    if !visited.insert(canonical) {
        trace!("Skipping already visited folder: {}", folder.display());
        return Ok(());
    }

    let listing =
        read_dir(folder).map_err(|e| file_operation_error(e, folder.to_path_buf(), "read"))?;

    for dir_entry in listing {
        let dir_entry =
            dir_entry.map_err(|e| file_operation_error(e, folder.to_path_buf(), "read"))?;
        let path = dir_entry.path();
        // follows symlinks so linked files and folders are catalogued too
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Skipping broken link: {}", path.display());
                continue;
            }
            Err(e) => return Err(file_operation_error(e, path, "read")),
        };

        if metadata.is_dir() {
            walk_folder(root, &path, visited, entries)?;
        } else if metadata.is_file() {
            trace!("Found file: {}", path.display());
            entries.push(CatalogEntry::new(path, Some(root.to_path_buf()))?);
        }
    }

    Ok(())
}
