use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::discovery::FileCatalog;
use crate::errors::{Result, generic_error};
use crate::records::record::{ClassificationRecord, RecordEdit};

/// The records created from one selected file or folder
///
/// A folder gets a header record whose edits cascade to every child. A
/// single file is a group with one child and no header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    header: Option<ClassificationRecord>,
    #[serde(default)]
    records: Vec<ClassificationRecord>,
}

impl RecordGroup {
    /// Creates the records for a catalog
    ///
    /// Returns `None` for an empty catalog, there is nothing to classify.
    pub fn from_catalog(catalog: &FileCatalog, destination_root: &Path) -> Option<RecordGroup> {
        let first = catalog.entries().first()?;

        let header = catalog.is_folder().then(|| {
            ClassificationRecord::header(catalog.root(), first.naming(), destination_root)
        });
        let records = catalog
            .iter()
            .map(|entry| ClassificationRecord::from_entry(entry, destination_root))
            .collect();

        Some(RecordGroup { header, records })
    }

    pub fn header(&self) -> Option<&ClassificationRecord> {
        self.header.as_ref()
    }

    /// The file records, without the header
    pub fn children(&self) -> &[ClassificationRecord] {
        &self.records
    }

    /// The path the group was created from: the folder, or the single file
    pub fn root(&self) -> Option<&Path> {
        match &self.header {
            Some(header) => Some(&header.source_path),
            None => self.records.first().map(|r| r.source_path.as_path()),
        }
    }

    /// Header first, then the children in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationRecord> {
        self.header.iter().chain(self.records.iter())
    }

    pub fn len(&self) -> usize {
        self.records.len() + usize::from(self.header.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when `path` is the group's folder or single file
    pub fn is_rooted_at(&self, path: &Path) -> bool {
        self.root() == Some(path)
    }

    /// Applies an edit to the header and cascades it to every child
    ///
    /// Only the edited field is overwritten on the children, their other
    /// fields are kept. Returns the number of children updated.
    ///
    /// # Errors
    /// Returns an error when the group has no header
    pub fn apply_header_edit(&mut self, edit: &RecordEdit) -> Result<usize> {
        let header = self
            .header
            .as_mut()
            .ok_or_else(|| generic_error("Only folder selections have a header record"))?;
        header.apply(edit);

        for child in &mut self.records {
            child.apply(edit);
        }
        Ok(self.records.len())
    }

    /// Applies an edit to the child whose source is `source` only
    ///
    /// Returns false when no child matches.
    pub fn apply_child_edit(&mut self, source: &Path, edit: &RecordEdit) -> bool {
        match self.records.iter_mut().find(|r| r.source_path == source) {
            Some(child) => {
                child.apply(edit);
                true
            }
            None => false,
        }
    }

    /// Removes the child whose source is `source`
    pub fn remove_child(&mut self, source: &Path) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.source_path != source);
        self.records.len() != before
    }

    /// Source paths of every file in the group
    pub fn sources(&self) -> impl Iterator<Item = &PathBuf> {
        self.records.iter().map(|r| &r.source_path)
    }

    pub(crate) fn for_each_record_mut(&mut self, f: &mut impl FnMut(&mut ClassificationRecord)) {
        self.header.iter_mut().chain(self.records.iter_mut()).for_each(f);
    }

    /// Drops the records whose paths are not valid Unicode
    ///
    /// The whole group goes when its header is affected. Returns the source
    /// paths removed.
    pub(crate) fn drop_non_unicode(&mut self) -> Vec<PathBuf> {
        let header_ok = self.header.as_ref().is_none_or(has_unicode_paths);
        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| header_ok && has_unicode_paths(r));
        self.records = kept;

        let mut removed: Vec<PathBuf> = dropped.into_iter().map(|r| r.source_path).collect();
        if !header_ok {
            if let Some(header) = self.header.take() {
                removed.insert(0, header.source_path);
            }
        }
        removed
    }

    /// Restores the header flags after the group was read back from disk
    pub(crate) fn normalise(&mut self) {
        if let Some(header) = &mut self.header {
            header.is_header = true;
            header.filename.clear();
        }
        for record in &mut self.records {
            record.is_header = false;
            if record.filename.is_empty() {
                if let Some(name) = record.source_path.file_name().and_then(|n| n.to_str()) {
                    record.filename = name.to_string();
                }
            }
        }
    }
}

fn has_unicode_paths(record: &ClassificationRecord) -> bool {
    record.source_path.to_str().is_some() && record.destination_root.to_str().is_some()
}
