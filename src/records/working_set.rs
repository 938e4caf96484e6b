use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::discovery::FileCatalog;
use crate::errors::{Result, file_operation_error, generic_error};
use crate::records::group::RecordGroup;
use crate::records::record::{ClassificationRecord, RecordEdit};

/// Every file currently selected for integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingSet {
    #[serde(default)]
    groups: Vec<RecordGroup>,
}

impl WorkingSet {
    pub fn new() -> WorkingSet {
        WorkingSet::default()
    }

    /// Scans `path` and adds its records
    ///
    /// Returns the number of records added, header included.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be built
    pub fn add_path(&mut self, path: &Path, destination_root: &Path) -> Result<usize> {
        info!("Processing - {}", path.display());
        let catalog = FileCatalog::build(path)?;
        Ok(self.add_catalog(&catalog, destination_root))
    }

    /// Adds the records of an already built catalog
    ///
    /// Selecting the same file or folder again replaces its earlier records.
    pub fn add_catalog(&mut self, catalog: &FileCatalog, destination_root: &Path) -> usize {
        let Some(group) = RecordGroup::from_catalog(catalog, destination_root) else {
            warn!(
                "The added folder has no contents: {}. Please add a folder with contents or a single file.",
                catalog.root().display()
            );
            return 0;
        };

        let added = group.len();
        match self
            .groups
            .iter_mut()
            .find(|existing| existing.root() == group.root())
        {
            Some(existing) => {
                info!("Replacing records of {}", catalog.root().display());
                *existing = group;
            }
            None => self.groups.push(group),
        }
        added
    }

    /// Removes the group rooted at `path`, or the single record for `path`
    ///
    /// Groups left without any file are dropped as well.
    pub fn remove(&mut self, path: &Path) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| !group.is_rooted_at(path));
        if self.groups.len() != before {
            return true;
        }

        let removed = self
            .groups
            .iter_mut()
            .any(|group| group.remove_child(path));
        self.groups.retain(|group| !group.is_empty());
        removed
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Edits the record for `path`
    ///
    /// When `path` is a selected folder the edit goes to its header and
    /// cascades to every child. Returns the number of records changed.
    ///
    /// # Errors
    /// Returns an error if no record exists for `path`
    pub fn edit(&mut self, path: &Path, edit: &RecordEdit) -> Result<usize> {
        for group in &mut self.groups {
            if group.header().is_some() && group.is_rooted_at(path) {
                return group.apply_header_edit(edit).map(|children| children + 1);
            }
            if group.apply_child_edit(path, edit) {
                return Ok(1);
            }
        }
        Err(generic_error(&format!(
            "No record found for {}",
            path.display()
        )))
    }

    pub fn groups(&self) -> &[RecordGroup] {
        &self.groups
    }

    /// Every record, header first within each group, in selection order
    pub fn records(&self) -> Vec<ClassificationRecord> {
        self.groups
            .iter()
            .flat_map(|group| group.iter().cloned())
            .collect()
    }

    /// Number of records, headers included
    pub fn len(&self) -> usize {
        self.groups.iter().map(RecordGroup::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total size in bytes of every selected file
    ///
    /// # Errors
    /// Returns an error if a selected file can no longer be read
    pub fn cumulative_size(&self) -> Result<u64> {
        self.groups
            .iter()
            .flat_map(RecordGroup::sources)
            .map(|source| {
                fs::metadata(source)
                    .map(|metadata| metadata.len())
                    .map_err(|e| file_operation_error(e, source.clone(), "read size of"))
            })
            .sum()
    }

    pub(crate) fn for_each_record_mut(&mut self, mut f: impl FnMut(&mut ClassificationRecord)) {
        for group in &mut self.groups {
            group.for_each_record_mut(&mut f);
        }
    }

    /// Drops every record a manifest cannot hold, returning their sources
    pub(crate) fn drop_non_unicode(&mut self) -> Vec<PathBuf> {
        let removed = self
            .groups
            .iter_mut()
            .flat_map(RecordGroup::drop_non_unicode)
            .collect();
        self.groups.retain(|group| !group.is_empty());
        removed
    }

    pub(crate) fn normalise(&mut self) {
        self.groups.iter_mut().for_each(RecordGroup::normalise);
        self.groups.retain(|group| !group.is_empty());
    }
}
