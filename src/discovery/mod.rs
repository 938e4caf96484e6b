//! File discovery module
//!
//! This module contains components for scanning selected files and folders
//! and suggesting a sequence and shot for each file found.

mod catalog;
mod naming;

pub use catalog::{CatalogEntry, FileCatalog};
pub use naming::{NamingInfo, SHOT_SEPARATOR, infer};
