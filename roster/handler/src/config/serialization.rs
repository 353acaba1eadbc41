//! Custom deserializers for configuration values.

use serde::Deserialize;
use serde::Deserializer;

/// A deserializer for the std::time::Duration type.
/// Serde includes a default deserializer, but it expects a struct.
pub fn duration_milliseconds_deserializer<'de, D>(
    deserializer: D,
) -> Result<std::time::Duration, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(std::time::Duration::from_millis(
        u64::deserialize(deserializer).map_err(serde::de::Error::custom)?,
    ))
}
