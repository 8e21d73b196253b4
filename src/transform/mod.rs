//! Resource transformer: one construct in, one canonical record out.
//!
//! The transformer looks at a single construct at a time and knows nothing
//! about any other construct. It copies the resource fields across and
//! resolves the schema version. It also removes every unset value, so the
//! resulting record never carries an "absent" marker anywhere in its
//! structure.
//!
//! # Schema version resolution
//!
//! 1. The construct's own `api_version`
//! 2. A per-type override from [`SynthConfig::api_versions`]
//! 3. The built-in table ([`known_api_version`])
//! 4. [`SynthConfig::fallback_api_version`]
//!
//! # Examples
//!
//! ```rust
//! use armsynth::construct::{Construct, PropertyValue};
//! use armsynth::transform::transform;
//!
//! let construct = Construct::new("vnet", "Microsoft.Network/virtualNetworks", "vnet1")
//!     .with_properties(
//!         PropertyValue::object()
//!             .with("enableDdosProtection", false)
//!             .with("dhcpOptions", PropertyValue::Absent),
//!     );
//!
//! let record = transform(&construct);
//! assert_eq!(record.api_version, "2023-04-01");
//! assert_eq!(record.properties, Some(serde_json::json!({"enableDdosProtection": false})));
//! ```

pub mod api_versions;

pub use api_versions::known_api_version;

use std::collections::BTreeMap;

use crate::config::SynthConfig;
use crate::construct::{Construct, PropertyValue};
use crate::record::CanonicalRecord;
use serde_json::Value;

/// Converts constructs into canonical records.
#[derive(Debug, Clone, Default)]
pub struct ResourceTransformer {
    config: SynthConfig,
}

impl ResourceTransformer {
    /// Transformer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transformer honouring the version overrides and fallback of `config`.
    #[must_use]
    pub fn with_config(config: &SynthConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Transform one construct. Never mutates the input and never fails.
    #[must_use]
    pub fn transform(&self, construct: &Construct) -> CanonicalRecord {
        CanonicalRecord {
            resource_type: construct.resource_type.clone(),
            api_version: self.resolve_api_version(construct),
            name: construct.name.clone(),
            location: construct.location.clone(),
            tags: construct.tags.as_ref().and_then(clean_tags),
            properties: clean_block(construct.properties.as_ref()),
            sku: clean_block(construct.sku.as_ref()),
            kind: construct.kind.clone(),
            identity: clean_block(construct.identity.as_ref()),
            depends_on: None,
        }
    }

    /// Transform a sequence of constructs, preserving order.
    pub fn transform_all<'c, I>(&self, constructs: I) -> Vec<CanonicalRecord>
    where
        I: IntoIterator<Item = &'c Construct>,
    {
        let records: Vec<CanonicalRecord> =
            constructs.into_iter().map(|construct| self.transform(construct)).collect();
        tracing::debug!("Transformed {} construct(s) into canonical records", records.len());
        records
    }

    /// Resolve the schema version for a construct.
    #[must_use]
    pub fn resolve_api_version(&self, construct: &Construct) -> String {
        if let Some(version) = construct.api_version.as_deref().filter(|v| !v.trim().is_empty()) {
            return version.to_string();
        }

        if let Some(version) = self
            .config
            .api_versions
            .iter()
            .find(|(ty, _)| ty.eq_ignore_ascii_case(&construct.resource_type))
            .map(|(_, version)| version)
        {
            return version.clone();
        }

        match known_api_version(&construct.resource_type) {
            Some(version) => version.to_string(),
            None => {
                tracing::trace!(
                    "No known API version for '{}', using fallback {}",
                    construct.resource_type,
                    self.config.fallback_api_version
                );
                self.config.fallback_api_version.clone()
            }
        }
    }
}

/// Transform one construct with the default configuration.
#[must_use]
pub fn transform(construct: &Construct) -> CanonicalRecord {
    ResourceTransformer::new().transform(construct)
}

/// Transform a sequence of constructs with the default configuration.
pub fn transform_all<'c, I>(constructs: I) -> Vec<CanonicalRecord>
where
    I: IntoIterator<Item = &'c Construct>,
{
    ResourceTransformer::new().transform_all(constructs)
}

fn clean_tags(tags: &BTreeMap<String, Option<String>>) -> Option<BTreeMap<String, String>> {
    let cleaned: BTreeMap<String, String> =
        tags.iter().filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.clone()))).collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

// Top-level blocks are dropped when nothing is left in them, even if they
// started out empty.
fn clean_block(block: Option<&PropertyValue>) -> Option<Value> {
    match block?.clean()? {
        Value::Object(map) if map.is_empty() => None,
        value => Some(value),
    }
}
