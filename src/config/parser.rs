//! TOML loading for synthesis configuration files.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::SynthError;

/// Read and deserialize a TOML file.
///
/// Read failures carry the path as `anyhow` context. Syntax and shape errors
/// surface as [`SynthError::ConfigParseError`] so that
/// [`crate::core::user_friendly_error`] can attach a suggestion.
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&content).map_err(|e| {
        SynthError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
