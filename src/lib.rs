pub mod cli;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod integrate;
pub mod logging;
pub mod records;
pub mod utils;
pub mod workflow;

pub mod prelude {
    pub use crate::config::{ConfigStore, Configuration, OutputFolders};
    pub use crate::discovery::{CatalogEntry, FileCatalog, NamingInfo, infer};
    pub use crate::errors::{
        config_parsing_error, copy_failure_error, file_operation_error, generic_error,
        invalid_filename_error, invalid_folder_name_error, manifest_parsing_error, not_found_error,
        path_operation_error, validation_error,
    };
    pub use crate::errors::{Error, Result};
    pub use crate::integrate::{
        IntegrationOptions, IntegrationOutcome, IntegrationReport, Integrator, LogReporter,
        Reporter,
    };
    pub use crate::logging::{LogLevel, format_message, init_logger};
    pub use crate::records::{Category, ClassificationRecord, RecordEdit, RecordGroup, WorkingSet};
}
