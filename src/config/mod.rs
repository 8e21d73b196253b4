//! Synthesis configuration.
//!
//! All settings have defaults, so an empty file (or no file at all) gives the
//! standard behavior.
//!
//! ```toml
//! # Reference detection: "heuristic" (default) or "explicit-only"
//! detection = "heuristic"
//!
//! # Used when neither the construct nor any table knows the type
//! fallback_api_version = "2023-01-01"
//!
//! # Per-type overrides, consulted before the built-in table
//! [api_versions]
//! "Microsoft.Web/sites" = "2023-12-01"
//! ```

pub mod parser;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::constants::FALLBACK_API_VERSION;
use crate::core::SynthError;

/// Which sources the resolver draws dependency edges from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionMode {
    /// Textual references, fixed cross-type rules, parent/child names and
    /// explicit links, unioned.
    #[default]
    Heuristic,
    /// Explicit links and the parent/child name relationship only.
    ExplicitOnly,
}

/// Settings for one synthesis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Dependency detection mode.
    pub detection: DetectionMode,
    /// API version for types nothing else knows about.
    pub fallback_api_version: String,
    /// Per-type API version overrides.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub api_versions: BTreeMap<String, String>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            detection: DetectionMode::default(),
            fallback_api_version: FALLBACK_API_VERSION.to_string(),
            api_versions: BTreeMap::new(),
        }
    }
}

impl SynthConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(SynthError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Self = parser::parse_config(path)?;
        config.validate()?;
        tracing::debug!("Loaded synthesis config from {}", path.display());
        Ok(config)
    }

    /// Reject blank versions, which would produce records failing structural
    /// validation.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.fallback_api_version.trim().is_empty() {
            return Err(SynthError::ConfigError {
                message: "fallback_api_version cannot be empty".to_string(),
            });
        }
        if let Some((ty, _)) = self.api_versions.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(SynthError::ConfigError {
                message: format!("API version override for '{ty}' cannot be empty"),
            });
        }
        Ok(())
    }
}
