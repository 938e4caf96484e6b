//! Configuration loading functionality
//!
//! This module reads and writes the configuration file, seeding it with
//! defaults on first use.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::constants::CONFIG_FILE_NAME;
use crate::errors::config_parsing_error;
use crate::utils::find_project_folder;

use super::model::Configuration;

/// Reads and writes the configuration file at a fixed path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: Option<Configuration>,
}

impl ConfigStore {
    /// A store for the file at `path`, seeded with the per-user defaults
    pub fn new(path: &Path) -> ConfigStore {
        ConfigStore {
            path: path.to_path_buf(),
            defaults: None,
        }
    }

    /// A store seeded with `defaults` instead of the per-user locations
    pub fn with_defaults(path: &Path, defaults: Configuration) -> ConfigStore {
        ConfigStore {
            path: path.to_path_buf(),
            defaults: Some(defaults),
        }
    }

    /// The store for the configuration file in the standard configuration folder
    ///
    /// # Errors
    /// Returns an error if the configuration folder cannot be determined
    pub fn default_location() -> Result<ConfigStore> {
        let folder = find_project_folder()?;
        Ok(ConfigStore::new(&folder.config_dir().join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, writing the defaults first when the file is missing
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, written or parsed
    pub fn load(&self) -> Result<Configuration> {
        if !self.path.exists() {
            let defaults = match &self.defaults {
                Some(defaults) => defaults.clone(),
                None => Configuration::defaults()?,
            };
            info!(
                "Creating default configuration at {}",
                self.path.display()
            );
            self.save(&defaults)?;
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            anyhow!(
                "Failed to read configuration file {}: {}",
                self.path.display(),
                e
            )
        })?;

        let config: Configuration = serde_json::from_str(&content).map_err(|e| {
            let detail = format!(
                "{}: {}. Please check the JSON syntax.",
                self.path.display(),
                e
            );
            config_parsing_error(e, &detail)
        })?;

        debug!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Writes `config` to the file, creating its folder when needed
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save(&self, config: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    anyhow!(
                        "Failed to create configuration folder {}: {}",
                        parent.display(),
                        e
                    )
                })?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content).map_err(|e| {
            anyhow!(
                "Failed to write configuration file {}: {}",
                self.path.display(),
                e
            )
        })?;

        debug!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}
