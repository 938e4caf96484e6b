//! Configuration data structures

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::deserializer::{deserialize_expanded_path, deserialize_logging_status};
use crate::config::serializer::serialize_logging_status;
use crate::constants::{DEFAULT_INTEGRATE_FOLDER, DEFAULT_LOGGING_FOLDER};
use crate::errors::Result;
use crate::logging::integration_log_path;
use crate::utils::find_project_folder;

fn default_logging_enabled() -> bool {
    true
}

/// Persistent user configuration
///
/// Stored as a flat JSON object with the keys `outputLocation`,
/// `loggingLocation` and `loggingStatus`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Default destination root for new records
    #[serde(rename = "outputLocation", deserialize_with = "deserialize_expanded_path")]
    pub output_location: PathBuf,
    /// Folder receiving the per-run integration logs
    #[serde(rename = "loggingLocation", deserialize_with = "deserialize_expanded_path")]
    pub logging_location: PathBuf,
    /// Whether integration runs write a log file
    #[serde(
        rename = "loggingStatus",
        default = "default_logging_enabled",
        serialize_with = "serialize_logging_status",
        deserialize_with = "deserialize_logging_status"
    )]
    pub logging_enabled: bool,
}

impl Configuration {
    /// A configuration with logging enabled
    pub fn with_locations(output_location: &Path, logging_location: &Path) -> Configuration {
        Configuration {
            output_location: output_location.to_path_buf(),
            logging_location: logging_location.to_path_buf(),
            logging_enabled: true,
        }
    }

    /// Locations below the per-user application data folder
    ///
    /// # Errors
    /// Returns an error if the platform has no home folder
    pub fn defaults() -> Result<Configuration> {
        let folder = find_project_folder()?;
        let data_dir = folder.data_dir();
        Ok(Configuration::with_locations(
            &data_dir.join(DEFAULT_INTEGRATE_FOLDER),
            &data_dir.join(DEFAULT_LOGGING_FOLDER),
        ))
    }

    /// The log file for a run started now, when logging is enabled
    pub fn integration_log(&self) -> Option<PathBuf> {
        self.logging_enabled
            .then(|| integration_log_path(&self.logging_location))
    }
}
