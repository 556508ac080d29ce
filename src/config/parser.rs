//! Generic TOML configuration parsing with error context.

use anyhow::{Context, Result};
use std::path::Path;

/// Read and deserialize a TOML configuration file.
///
/// # Errors
///
/// Fails when the file cannot be read or does not deserialize into `T`; both errors name
/// the file.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: T = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}
