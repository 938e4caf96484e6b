/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Qualifier string used for application identification
///
/// This is used as part of the application's unique identifier.
pub const QUALIFIER: &str = "com";

/// Organisation name used for application identification
pub const ORGANIZATION: &str = "ClientFileManager";

/// Application name used for identification
///
/// This is the name of the application used in various contexts like
/// configuration file paths and application identification.
pub const APPLICATION: &str = "client_file_manager";

/// Name of the configuration file inside the per-user configuration folder
pub const CONFIG_FILE_NAME: &str = "configuration.json";

/// Folder under the per-user data folder receiving integrated files by default
pub const DEFAULT_INTEGRATE_FOLDER: &str = "integrate";

/// Folder under the per-user data folder receiving integration logs by default
pub const DEFAULT_LOGGING_FOLDER: &str = "logging";

/// Prefix of the per-run integration log file
pub const INTEGRATION_LOG_PREFIX: &str = "integrateFiles";

/// Timestamp format appended to the per-run integration log file name
pub const INTEGRATION_LOG_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

/// Log target used for the integration report sections
pub const INTEGRATION_TARGET: &str = "integration";

/// Default manifest written by `scan`
pub const DEFAULT_MANIFEST_PATH: &str = "manifest.yaml";

/// Help text for the config command-line option
pub const CONFIG_HELP: &str = "Read from a specific configuration file";

/// Help text for the dry-run command-line option
pub const DRY_RUN_HELP: &str = "Run without copying any files";

/// Help text for the parallel command-line option
pub const PARALLEL_HELP: &str = "Copy files on a worker pool instead of one at a time";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log file option
pub const LOG_FILE_HELP: &str = "Write the log to this file instead of the configured logging location";

/// Help text for the pause option
pub const PAUSE_HELP: &str = "Wait for Enter before exiting when run from a terminal";

/// Help text for the manifest output option
pub const MANIFEST_OUTPUT_HELP: &str = "Manifest file the scanned records are written to";

/// Help text for the destination override option
pub const DESTINATION_HELP: &str = "Destination root for new records (defaults to the output location)";
