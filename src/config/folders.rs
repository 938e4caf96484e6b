//! Existing sequence and shot folders in the output location

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::errors::{Result, file_operation_error};
use crate::utils::ensure_folder;

/// A sequence folder and the shot folders inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceFolder {
    pub name: String,
    pub shots: Vec<String>,
}

/// Sequence and shot folders found under an output location
///
/// Offered as choices when classifying records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFolders {
    root: PathBuf,
    sequences: Vec<SequenceFolder>,
}

fn folder_names(path: &Path) -> Result<Vec<String>> {
    let entries =
        fs::read_dir(path).map_err(|e| file_operation_error(e, path.to_path_buf(), "list"))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| file_operation_error(e, path.to_path_buf(), "list"))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

impl OutputFolders {
    /// Lists the folders under `output_location`, creating it when missing
    ///
    /// # Errors
    /// Returns an error if the location cannot be created or listed
    pub fn discover(output_location: &Path) -> Result<OutputFolders> {
        ensure_folder(output_location)?;

        let mut sequences = Vec::new();
        for name in folder_names(output_location)? {
            let shots = folder_names(&output_location.join(&name))?;
            sequences.push(SequenceFolder { name, shots });
        }
        debug!(
            "Found {} sequence folders in {}",
            sequences.len(),
            output_location.display()
        );

        Ok(OutputFolders {
            root: output_location.to_path_buf(),
            sequences,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folders(&self) -> &[SequenceFolder] {
        &self.sequences
    }

    /// Sequence folder names, sorted
    pub fn sequences(&self) -> Vec<&str> {
        self.sequences.iter().map(|s| s.name.as_str()).collect()
    }

    /// Shot folder names of `sequence`, empty for an unknown sequence
    pub fn shots_for(&self, sequence: &str) -> &[String] {
        self.sequences
            .iter()
            .find(|s| s.name == sequence)
            .map(|s| s.shots.as_slice())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{File, create_dir_all};
    use tempfile::tempdir;

    #[test]
    fn test_discover_lists_sequences_and_shots() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path();
        create_dir_all(out.join("seq02/seq02_010")).unwrap();
        create_dir_all(out.join("seq01/seq01_020")).unwrap();
        create_dir_all(out.join("seq01/seq01_010")).unwrap();
        File::create(out.join("notes.txt")).unwrap();
        File::create(out.join("seq01/readme.txt")).unwrap();

        let folders = OutputFolders::discover(out).unwrap();

        assert_eq!(folders.sequences(), ["seq01", "seq02"]);
        assert_eq!(folders.shots_for("seq01"), ["seq01_010", "seq01_020"]);
        assert_eq!(folders.shots_for("seq02"), ["seq02_010"]);
        assert!(folders.shots_for("seq03").is_empty());
    }

    #[test]
    fn test_discover_creates_missing_location() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("new/output");

        let folders = OutputFolders::discover(&out).unwrap();

        assert!(out.is_dir());
        assert!(folders.is_empty());
        assert_eq!(folders.root(), out);
    }
}
