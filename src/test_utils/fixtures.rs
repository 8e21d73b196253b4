//! Test fixtures for creating sample construct trees and configuration
//!
//! Every fixture keeps the ids of the constructs it created so tests can add
//! further links or look records up by name.

use anyhow::Result;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    NETWORK_INTERFACE, NETWORK_SECURITY_GROUP, SERVER_FARM, SUBNET, VIRTUAL_NETWORK, WEB_SITE,
};
use crate::construct::{Construct, ConstructId, ConstructTree};
use crate::core::SynthError;

/// A construct tree plus the ids of its constructs, keyed by construct id.
#[derive(Clone, Debug)]
pub struct TreeFixture {
    pub tree: ConstructTree,
    pub ids: BTreeMap<String, ConstructId>,
}

impl TreeFixture {
    /// Empty fixture to build on.
    pub fn new() -> Self {
        Self {
            tree: ConstructTree::new(),
            ids: BTreeMap::new(),
        }
    }

    /// Add a root construct, remembering it under its construct id.
    pub fn add(&mut self, construct: Construct) -> ConstructId {
        let key = construct.id.clone();
        let id = self.tree.add_root(construct);
        self.ids.insert(key, id);
        id
    }

    /// Declare an explicit dependency between two remembered constructs.
    pub fn link(&mut self, from: &str, to: &str) -> Result<(), SynthError> {
        let (Some(from), Some(to)) = (self.ids.get(from).copied(), self.ids.get(to).copied()) else {
            return Err(SynthError::Other {
                message: format!("unknown fixture construct in link {from} -> {to}"),
            });
        };
        self.tree.add_dependency(from, to)
    }

    /// An app service plan and a site hosted on it.
    pub fn web_app() -> Self {
        let mut fixture = Self::new();
        fixture.add(
            Construct::new("plan", SERVER_FARM, "plan1")
                .with_location("westeurope")
                .with_sku(json!({"name": "P1v3", "tier": "PremiumV3"})),
        );
        fixture.add(
            Construct::new("site", WEB_SITE, "site1").with_location("westeurope").with_properties(json!({
                "serverFarmId": "[resourceId('Microsoft.Web/serverfarms', 'plan1')]",
                "httpsOnly": true
            })),
        );
        fixture
    }

    /// A virtual network declaring `web`, `app` and `data` subnets inline,
    /// and a network interface attached to the `app` subnet.
    pub fn inline_network() -> Self {
        let mut fixture = Self::new();
        fixture.add(Construct::new("vnet", VIRTUAL_NETWORK, "vnet1").with_properties(json!({
            "addressSpace": {"addressPrefixes": ["10.0.0.0/16"]},
            "subnets": [
                {"name": "web", "properties": {"addressPrefix": "10.0.1.0/24"}},
                {"name": "app", "properties": {"addressPrefix": "10.0.2.0/24"}},
                {"name": "data", "properties": {"addressPrefix": "10.0.3.0/24"}}
            ]
        })));
        fixture.add(Construct::new("nic", NETWORK_INTERFACE, "nic1").with_properties(json!({
            "ipConfigurations": [{
                "name": "ipconfig1",
                "properties": {
                    "subnet": {"id": "[resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet1', 'app')]"}
                }
            }]
        })));
        fixture
    }

    /// A virtual network with its subnet and security group as separate
    /// resources; the subnet references the group through its field.
    pub fn separate_network() -> Self {
        let mut fixture = Self::new();
        fixture.add(Construct::new("vnet", VIRTUAL_NETWORK, "vnet1"));
        fixture.add(Construct::new("nsg", NETWORK_SECURITY_GROUP, "nsg-app"));
        fixture.add(Construct::new("subnet", SUBNET, "vnet1/app").with_properties(json!({
            "addressPrefix": "10.0.2.0/24",
            "networkSecurityGroup": {
                "id": "[resourceId('Microsoft.Network/networkSecurityGroups', 'nsg-app')]"
            }
        })));
        fixture
    }

    /// Three sites linked `a -> b -> c -> a`.
    pub fn cycle_of_three() -> Result<Self, SynthError> {
        let mut fixture = Self::new();
        for name in ["a", "b", "c"] {
            fixture.add(Construct::new(name, WEB_SITE, name));
        }
        fixture.link("a", "b")?;
        fixture.link("b", "c")?;
        fixture.link("c", "a")?;
        Ok(fixture)
    }
}

impl Default for TreeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Test fixture for creating sample armsynth.toml files
#[derive(Clone, Debug)]
pub struct ConfigFixture {
    pub content: String,
    pub name: String,
}

impl ConfigFixture {
    /// Explicit-only detection with a site version override
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            content: r#"
detection = "explicit-only"
fallback_api_version = "2022-01-01"

[api_versions]
"Microsoft.Web/sites" = "2023-12-01"
"#
            .trim()
            .to_string(),
        }
    }

    /// Config with invalid syntax
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: "detection = [heuristic".to_string(),
        }
    }

    /// Config with an unknown detection mode
    pub fn unknown_mode() -> Self {
        Self {
            name: "unknown_mode".to_string(),
            content: r#"detection = "psychic""#.to_string(),
        }
    }

    /// Empty config
    pub fn empty() -> Self {
        Self {
            name: "empty".to_string(),
            content: String::new(),
        }
    }

    /// Write the config to a directory
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let config_path = dir.join("armsynth.toml");
        fs::write(&config_path, &self.content)?;
        Ok(config_path)
    }
}
