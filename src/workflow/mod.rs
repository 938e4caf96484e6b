//! Workflow module
//!
//! This module contains the steps behind each `cfm` command.

mod engine;

pub use engine::{
    edit_records, execute, integrate_manifest, remove_records, scan_paths, update_configuration,
};
