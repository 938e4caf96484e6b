//! Configuration serialization functionality

use serde::Serializer;

/// Writes the logging flag as the string `"True"` or `"False"`
pub fn serialize_logging_status<S>(enabled: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(if *enabled { "True" } else { "False" })
}
