//! One-call synthesis pipeline.
//!
//! [`synthesize`] runs the whole core in order. It transforms every construct
//! of a tree, resolves dependencies, and returns the records in deployment
//! order, ready to be placed in a template's `resources` array.

use anyhow::{Context, Result};

use crate::config::SynthConfig;
use crate::construct::ConstructTree;
use crate::record::CanonicalRecord;
use crate::resolver::DependencyResolver;
use crate::transform::ResourceTransformer;

/// Synthesize a construct tree into ordered canonical records.
///
/// # Errors
///
/// Fails when the configuration is invalid or the records contain a
/// dependency cycle.
///
/// # Examples
///
/// ```rust
/// use armsynth::config::SynthConfig;
/// use armsynth::construct::{Construct, ConstructTree};
/// use armsynth::synth::synthesize;
///
/// let mut tree = ConstructTree::new();
/// let site = tree.add_root(Construct::new("site", "Microsoft.Web/sites", "site1"));
/// let plan = tree.add_root(Construct::new("plan", "Microsoft.Web/serverfarms", "plan1"));
/// tree.add_dependency(site, plan).unwrap();
///
/// let records = synthesize(&tree, &SynthConfig::default()).unwrap();
/// assert_eq!(records[0].name, "plan1");
/// assert_eq!(records[1].name, "site1");
/// ```
pub fn synthesize(tree: &ConstructTree, config: &SynthConfig) -> Result<Vec<CanonicalRecord>> {
    config.validate()?;

    let records = ResourceTransformer::with_config(config).transform_all(tree.iter());
    let resolution = DependencyResolver::with_config(config)
        .resolve(records, tree)
        .context("Failed to resolve resource dependencies")?;

    let ordered = resolution.topological_sort();
    tracing::debug!("Synthesized {} resource(s)", ordered.len());
    Ok(ordered)
}
