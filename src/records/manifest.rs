//! Manifest persistence
//!
//! The manifest is the working set written to disk as YAML, so records can
//! be reviewed and edited between `scan` and `integrate`.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::errors::{Result, file_operation_error, manifest_parsing_error};
use crate::records::working_set::WorkingSet;
use crate::utils::expand_pathbuf;

impl WorkingSet {
    /// Reads a working set from a manifest file
    ///
    /// `~` is expanded in every source and destination path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid manifest
    pub fn load(path: &Path) -> Result<WorkingSet> {
        let content = fs::read_to_string(path)
            .map_err(|e| file_operation_error(e, path.to_path_buf(), "read"))?;
        let mut set = WorkingSet::from_yaml(&content)
            .map_err(|e| manifest_parsing_error(e, path.to_path_buf()))?;
        set.normalise();

        debug!("Loaded {} records from {}", set.len(), path.display());
        Ok(set)
    }

    /// Reads the manifest at `path`, or starts an empty working set when it does not exist
    pub fn load_or_default(path: &Path) -> Result<WorkingSet> {
        if path.exists() {
            WorkingSet::load(path)
        } else {
            Ok(WorkingSet::new())
        }
    }

    /// Writes the working set to a manifest file, replacing it
    ///
    /// Records whose paths are not valid Unicode cannot be written as YAML;
    /// they are left out with a warning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut stored = self.clone();
        for source in stored.drop_non_unicode() {
            warn!(
                "Leaving {} out of the manifest, its path is not valid Unicode",
                source.display()
            );
        }

        let content = serde_yaml::to_string(&stored)
            .map_err(|e| manifest_parsing_error(e, path.to_path_buf()))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| file_operation_error(e, parent.to_path_buf(), "create directory"))?;
            }
        }
        fs::write(path, content).map_err(|e| file_operation_error(e, path.to_path_buf(), "write"))?;

        debug!("Saved {} records to {}", stored.len(), path.display());
        Ok(())
    }

    fn from_yaml(content: &str) -> std::result::Result<WorkingSet, serde_yaml::Error> {
        let mut set: WorkingSet = serde_yaml::from_str(content)?;
        set.expand_paths();
        Ok(set)
    }

    fn expand_paths(&mut self) {
        self.for_each_record_mut(|record| {
            record.source_path = expand_pathbuf(&record.source_path);
            record.destination_root = expand_pathbuf(&record.destination_root);
        });
    }
}
