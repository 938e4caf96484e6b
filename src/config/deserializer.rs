//! Configuration deserialization functionality
//!
//! Helpers used by the serde derives of [`Configuration`](super::Configuration).

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use serde::de::{self, Visitor};

use crate::utils::expand_path;

/// Deserializes a path, expanding a leading `~`
pub fn deserialize_expanded_path<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(PathBuf::from(expand_path(raw.trim())))
}

/// Deserializes the logging flag
///
/// Accepts the strings `"True"` and `"False"` in any case, as well as plain
/// booleans.
pub fn deserialize_logging_status<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct LoggingStatusVisitor;

    impl Visitor<'_> for LoggingStatusVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("\"True\", \"False\" or a boolean")
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match value.trim().to_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(LoggingStatusVisitor)
}
