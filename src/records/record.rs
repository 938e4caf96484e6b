use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::{CatalogEntry, NamingInfo};
use crate::errors::{Result, invalid_folder_name_error, validation_error};
use crate::records::category::Category;

fn is_false(value: &bool) -> bool {
    !*value
}

/// The editable classification of one catalog entry
///
/// Records start out with the sequence and shot inferred from the filename
/// and the configured output location as their destination. Headers stand
/// for a whole selected folder; their `source_path` is that folder and their
/// `filename` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRecord {
    #[serde(rename = "source")]
    pub source_path: PathBuf,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub filename: String,
    #[serde(default)]
    pub sequence: String,
    #[serde(default)]
    pub shot: String,
    #[serde(rename = "destination", default)]
    pub destination_root: PathBuf,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_header: bool,
}

/// A change made to a record by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordEdit {
    Sequence(String),
    Shot(String),
    Destination(PathBuf),
    Category(Category),
}

impl ClassificationRecord {
    /// Seeds a record from a catalog entry
    pub fn from_entry(entry: &CatalogEntry, destination_root: &Path) -> ClassificationRecord {
        ClassificationRecord {
            source_path: entry.source_path().to_path_buf(),
            filename: entry.filename().to_string(),
            sequence: entry.inferred_sequence().to_string(),
            shot: entry.inferred_shot().to_string(),
            destination_root: destination_root.to_path_buf(),
            category: Category::default(),
            is_header: false,
        }
    }

    /// Creates the header record standing for the folder `root`
    pub fn header(root: &Path, naming: &NamingInfo, destination_root: &Path) -> ClassificationRecord {
        ClassificationRecord {
            source_path: root.to_path_buf(),
            filename: String::new(),
            sequence: naming.sequence.clone(),
            shot: naming.shot.clone(),
            destination_root: destination_root.to_path_buf(),
            category: Category::default(),
            is_header: true,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.category.is_ignore()
    }

    /// Checks the fields needed to build the destination path
    ///
    /// Ignored records are never checked.
    ///
    /// # Errors
    /// Returns a validation error naming every empty field among sequence,
    /// shot and destination, or an error when sequence or shot is not a
    /// single folder name
    pub fn validate(&self) -> Result<()> {
        if self.is_ignored() {
            return Ok(());
        }

        let mut missing = Vec::new();
        if self.sequence.trim().is_empty() {
            missing.push("sequence");
        }
        if self.shot.trim().is_empty() {
            missing.push("shot");
        }
        if self.destination_root.as_os_str().is_empty() {
            missing.push("destination");
        }

        if !missing.is_empty() {
            return Err(validation_error(self.source_path.clone(), missing));
        }

        for (field, value) in [("sequence", &self.sequence), ("shot", &self.shot)] {
            if !is_folder_name(value) {
                return Err(invalid_folder_name_error(
                    self.source_path.clone(),
                    field,
                    value,
                ));
            }
        }
        Ok(())
    }

    /// `destination_root/sequence/shot`
    pub fn destination_directory(&self) -> PathBuf {
        self.destination_root.join(&self.sequence).join(&self.shot)
    }

    /// `destination_root/sequence/shot/category/filename`
    ///
    /// Files keep the exact name of their source, even when `filename` only
    /// holds a lossy copy of it.
    pub fn destination_path(&self) -> PathBuf {
        self.destination_directory()
            .join(self.category.as_str())
            .join(self.target_name())
    }

    fn target_name(&self) -> &OsStr {
        match self.source_path.file_name() {
            Some(name) if !self.is_header => name,
            _ => OsStr::new(&self.filename),
        }
    }

    /// Applies a single edit to this record only
    pub fn apply(&mut self, edit: &RecordEdit) {
        match edit {
            RecordEdit::Sequence(sequence) => self.sequence = sequence.clone(),
            RecordEdit::Shot(shot) => self.shot = shot.clone(),
            RecordEdit::Destination(destination) => self.destination_root = destination.clone(),
            RecordEdit::Category(category) => self.category = *category,
        }
    }
}

/// True for a value that names exactly one folder below its parent
fn is_folder_name(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sequence: &str, shot: &str, destination: &str) -> ClassificationRecord {
        ClassificationRecord {
            source_path: PathBuf::from("/in/a.mov"),
            filename: "a.mov".to_string(),
            sequence: sequence.to_string(),
            shot: shot.to_string(),
            destination_root: PathBuf::from(destination),
            category: Category::Plate,
            is_header: false,
        }
    }

    #[test]
    fn test_destination_path_layout() {
        let record = record("seq01", "seq01_010", "/out");

        assert_eq!(
            record.destination_directory(),
            PathBuf::from("/out/seq01/seq01_010")
        );
        assert_eq!(
            record.destination_path(),
            PathBuf::from("/out/seq01/seq01_010/Plate/a.mov")
        );
    }

    #[test]
    fn test_validate_lists_every_missing_field() {
        let error = record("", " ", "").validate().unwrap_err();
        let message = format!("{error}");

        assert!(message.contains("sequence, shot, destination"), "{message}");
    }

    #[test]
    fn test_validate_rejects_paths_as_folder_names() {
        for (sequence, shot) in [
            ("/etc", "seq01_010"),
            ("..", "seq01_010"),
            ("seq01", "../../tmp"),
            ("seq01", "a/b"),
            ("seq01", "."),
        ] {
            let error = record(sequence, shot, "/out").validate().unwrap_err();
            assert!(
                format!("{error}").contains("single folder name"),
                "{sequence} {shot}: {error}"
            );
        }

        assert!(record("seq01", "seq01_010", "/out").validate().is_ok());
        assert!(record("seq 01", "seq01.v2", "/out").validate().is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_destination_keeps_exact_source_name() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"plate\xff010.exr");
        let mut record = record("seq01", "seq01_010", "/out");
        record.source_path = Path::new("/in").join(name);
        record.filename = name.to_string_lossy().into_owned();

        assert_eq!(
            record.destination_path(),
            Path::new("/out/seq01/seq01_010/Plate").join(name)
        );
    }

    #[test]
    fn test_ignored_records_skip_validation() {
        let mut record = record("", "", "");
        record.category = Category::Ignore;

        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_apply_changes_one_field() {
        let mut record = record("seq01", "seq01_010", "/out");

        record.apply(&RecordEdit::Shot("seq01_020".to_string()));
        record.apply(&RecordEdit::Category(Category::Texture));

        assert_eq!(record.sequence, "seq01");
        assert_eq!(record.shot, "seq01_020");
        assert_eq!(record.destination_root, PathBuf::from("/out"));
        assert_eq!(record.category, Category::Texture);
    }
}
