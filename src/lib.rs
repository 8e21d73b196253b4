//! armsynth - deployment template synthesis core
//!
//! Turns an in-memory tree of resource constructs into the flat, ordered list
//! of resource records that a declarative cloud deployment template carries
//! in its `resources` array.
//!
//! # Architecture Overview
//!
//! A synthesis run has two stages:
//! - The **transformer** converts each construct into a canonical record on
//!   its own. It resolves the schema version and strips every unset value.
//! - The **resolver** looks at all records together. It infers which records
//!   depend on which, rejects cycles, writes `dependsOn` as
//!   `[resourceId(...)]` expressions, and orders the records.
//!
//! The construct tree is only read. Nothing is kept between runs.
//!
//! # Core Modules
//!
//! - [`construct`] - Constructs, property values with an explicit "absent"
//!   marker, and the construct tree
//! - [`record`] - Canonical wire-format records and graph keys
//! - [`transform`] - Construct to record conversion and schema versions
//! - [`resolver`] - Dependency graph, detection heuristics, cycle detection,
//!   and topological ordering
//! - [`validation`] - Structural checks reported as data
//! - [`synth`] - The whole pipeline in one call
//!
//! ## Supporting Modules
//! - [`config`] - TOML synthesis configuration
//! - [`core`] - Errors and resource type helpers
//! - [`constants`] - Well-known resource types and defaults
//!
//! # Example
//!
//! ```rust
//! use armsynth::config::SynthConfig;
//! use armsynth::construct::{Construct, ConstructTree};
//! use armsynth::synth::synthesize;
//! use serde_json::json;
//!
//! let mut tree = ConstructTree::new();
//! tree.add_root(Construct::new("vnet", "Microsoft.Network/virtualNetworks", "vnet1"));
//! tree.add_root(
//!     Construct::new("nic", "Microsoft.Network/networkInterfaces", "nic1")
//!         .with_location("westeurope")
//!         .with_properties(json!({"ipConfigurations": [{"name": "ipconfig1", "vnet": "vnet1"}]})),
//! );
//!
//! let records = synthesize(&tree, &SynthConfig::default()).unwrap();
//! assert_eq!(
//!     records[1].depends_on,
//!     Some(vec!["[resourceId('Microsoft.Network/virtualNetworks', 'vnet1')]".to_string()])
//! );
//! ```
//!
//! # Configuration (armsynth.toml)
//!
//! ```toml
//! detection = "explicit-only"
//! fallback_api_version = "2023-01-01"
//!
//! [api_versions]
//! "Microsoft.Web/sites" = "2023-12-01"
//! ```

// Core functionality modules
pub mod config;
pub mod core;
pub mod resolver;
pub mod transform;

// Data model
pub mod construct;
pub mod record;

// Supporting modules
pub mod constants;
pub mod synth;
pub mod validation;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
