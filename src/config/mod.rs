//! Configuration module
//!
//! This module contains the persistent user configuration and the discovery
//! of existing output folders.

pub mod deserializer;
mod folders;
mod loader;
mod model;
pub mod serializer;

pub use folders::{OutputFolders, SequenceFolder};
pub use loader::ConfigStore;
pub use model::Configuration;
