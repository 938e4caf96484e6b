use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Custom error type for the Client File Manager
#[derive(Debug)]
pub enum Error {
    /// Error related to file operations
    FileOperation {
        source: io::Error,
        path: PathBuf,
        operation: String,
    },
    /// A selected file or folder does not exist
    NotFound { path: PathBuf },
    /// Error related to path operations
    PathOperation { path: PathBuf, operation: String },
    /// A path that does not end in a file name
    InvalidFilename { path: PathBuf },
    /// A record is missing fields required for integration
    Validation {
        path: PathBuf,
        missing: Vec<&'static str>,
    },
    /// A sequence or shot that would not name a single folder
    InvalidFolderName {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
    /// A copy did not leave the destination file in place
    CopyFailure { destination: PathBuf, detail: String },
    /// Error related to configuration parsing
    ConfigParsing {
        source: Box<dyn StdError + Send + Sync>,
        detail: String,
    },
    /// Error related to manifest parsing
    ManifestParsing {
        source: Box<dyn StdError + Send + Sync>,
        path: PathBuf,
    },
    /// Generic error with a message
    Generic { message: String },
}

impl Error {
    /// True for the errors raised while reading the filesystem
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Error::FileOperation { .. }
                | Error::NotFound { .. }
                | Error::PathOperation { .. }
                | Error::InvalidFilename { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::FileOperation {
                path, operation, ..
            } => {
                write!(f, "Failed to {} file: {}", operation, path.display())
            }
            Error::NotFound { path } => {
                write!(f, "No such file or folder: {}", path.display())
            }
            Error::PathOperation { path, operation } => {
                write!(f, "Failed to {} path: {}", operation, path.display())
            }
            Error::InvalidFilename { path } => {
                write!(f, "Path has no file name: {}", path.display())
            }
            Error::Validation { path, missing } => {
                write!(
                    f,
                    "{} is missing {} required to integrate",
                    path.display(),
                    missing.join(", ")
                )
            }
            Error::InvalidFolderName { path, field, value } => {
                write!(
                    f,
                    "{} has {field} '{value}', which is not a single folder name",
                    path.display()
                )
            }
            Error::CopyFailure {
                destination,
                detail,
            } => {
                write!(
                    f,
                    "Failed to copy file to {}: {detail}",
                    destination.display()
                )
            }
            Error::ConfigParsing { detail, .. } => {
                write!(f, "Configuration parsing error: {detail}")
            }
            Error::ManifestParsing { path, source } => {
                write!(f, "Failed to parse manifest {}: {source}", path.display())
            }
            Error::Generic { message } => {
                write!(f, "{message}")
            }
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::FileOperation { source, .. } => Some(source),
            Error::ConfigParsing { source, .. } => Some(source.as_ref()),
            Error::ManifestParsing { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::FileOperation {
            source: err,
            path: PathBuf::new(),
            operation: "perform operation on".to_string(),
        }
    }
}

/// Custom Result type for the Client File Manager
///
/// # Examples
/// ```
/// use client_file_manager::prelude::{Result, generic_error};
///
/// fn example_function() -> Result<String> {
///     // Return success
///     Ok("success".to_string())
///
///     // Or return an error
///     // Err(generic_error("Something went wrong"))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Helper function to create a file operation error
pub fn file_operation_error(err: io::Error, path: PathBuf, operation: &str) -> Error {
    Error::FileOperation {
        source: err,
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create a not-found error
pub fn not_found_error(path: PathBuf) -> Error {
    Error::NotFound { path }
}

/// Helper function to create a path operation error
pub fn path_operation_error(path: PathBuf, operation: &str) -> Error {
    Error::PathOperation {
        path,
        operation: operation.to_string(),
    }
}

/// Helper function to create an invalid filename error
pub fn invalid_filename_error(path: PathBuf) -> Error {
    Error::InvalidFilename { path }
}

/// Helper function to create a validation error
pub fn validation_error(path: PathBuf, missing: Vec<&'static str>) -> Error {
    Error::Validation { path, missing }
}

/// Helper function to create an invalid folder name error
pub fn invalid_folder_name_error(path: PathBuf, field: &'static str, value: &str) -> Error {
    Error::InvalidFolderName {
        path,
        field,
        value: value.to_string(),
    }
}

/// Helper function to create a copy failure
pub fn copy_failure_error(destination: PathBuf, detail: &str) -> Error {
    Error::CopyFailure {
        destination,
        detail: detail.to_string(),
    }
}

/// Helper function to create a config parsing error
pub fn config_parsing_error<E: StdError + Send + Sync + 'static>(err: E, detail: &str) -> Error {
    Error::ConfigParsing {
        source: Box::new(err),
        detail: detail.to_string(),
    }
}

/// Helper function to create a manifest parsing error
pub fn manifest_parsing_error<E: StdError + Send + Sync + 'static>(err: E, path: PathBuf) -> Error {
    Error::ManifestParsing {
        source: Box::new(err),
        path,
    }
}

/// Helper function to create a generic error
pub fn generic_error(message: &str) -> Error {
    Error::Generic {
        message: message.to_string(),
    }
}
