//! Fixed dependency rules for well-known platform relationships.
//!
//! Two tables live here:
//!
//! - [`CROSS_TYPE_RULES`]: "a resource of type X depends on a resource of
//!   type Y when Y's name appears in X's field F". An exclusive rule is the
//!   only way the pair can be linked; the generic textual scan over the whole
//!   property bag is skipped for that type pair.
//! - [`INLINE_NESTINGS`]: parent types whose children may be declared inline
//!   in the parent's property bag instead of as separate resources.

use serde_json::Value;

use crate::constants::{
    NETWORK_INTERFACE, NETWORK_SECURITY_GROUP, PUBLIC_IP_ADDRESS, ROUTE, ROUTE_TABLE,
    SECURITY_RULE, SERVER_FARM, SUBNET, VIRTUAL_MACHINE, VIRTUAL_NETWORK, WEB_SITE,
};
use crate::core::ResourceType;

/// A field-scoped dependency between two resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossTypeRule {
    /// Type of the dependent resource
    pub dependent: &'static str,
    /// Type of the resource depended on
    pub target: &'static str,
    /// JSON pointer into the dependent's properties
    pub field: &'static str,
    /// Suppress the generic textual scan for this pair
    pub exclusive: bool,
}

impl CrossTypeRule {
    /// Whether this rule governs the given pair of types.
    #[must_use]
    pub fn applies(&self, dependent: &str, target: &str) -> bool {
        ResourceType::new(self.dependent).matches(dependent)
            && ResourceType::new(self.target).matches(target)
    }

    /// Whether `target_name` appears inside the scanned field.
    #[must_use]
    pub fn matches(&self, properties: Option<&Value>, target_name: &str) -> bool {
        properties
            .and_then(|props| props.pointer(self.field))
            .is_some_and(|field| field.to_string().contains(target_name))
    }
}

/// Built-in cross-type rules.
pub const CROSS_TYPE_RULES: &[CrossTypeRule] = &[
    CrossTypeRule {
        dependent: VIRTUAL_MACHINE,
        target: NETWORK_INTERFACE,
        field: "/networkProfile/networkInterfaces",
        exclusive: false,
    },
    CrossTypeRule {
        dependent: WEB_SITE,
        target: SERVER_FARM,
        field: "/serverFarmId",
        exclusive: false,
    },
    CrossTypeRule {
        dependent: SUBNET,
        target: NETWORK_SECURITY_GROUP,
        field: "/networkSecurityGroup",
        exclusive: true,
    },
    CrossTypeRule {
        dependent: SUBNET,
        target: ROUTE_TABLE,
        field: "/routeTable",
        exclusive: true,
    },
    CrossTypeRule {
        dependent: NETWORK_INTERFACE,
        target: PUBLIC_IP_ADDRESS,
        field: "/ipConfigurations",
        exclusive: false,
    },
];

/// First rule governing a type pair.
#[must_use]
pub fn rule_for(dependent: &str, target: &str) -> Option<&'static CrossTypeRule> {
    CROSS_TYPE_RULES.iter().find(|rule| rule.applies(dependent, target))
}

/// A parent type whose children can be declared inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineNesting {
    /// Parent resource type
    pub parent: &'static str,
    /// Array in the parent's properties holding inline children
    pub property: &'static str,
    /// Type used when the child is declared as its own resource
    pub child: &'static str,
}

impl InlineNesting {
    /// Names of the children declared inline in a parent's properties.
    ///
    /// Entries without a string `name` are skipped.
    #[must_use]
    pub fn inline_names<'v>(&self, properties: Option<&'v Value>) -> Vec<&'v str> {
        properties
            .and_then(|props| props.get(self.property))
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| entry.get("name").and_then(Value::as_str))
                    .filter(|name| !name.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Built-in inline nesting table.
pub const INLINE_NESTINGS: &[InlineNesting] = &[
    InlineNesting {
        parent: VIRTUAL_NETWORK,
        property: "subnets",
        child: SUBNET,
    },
    InlineNesting {
        parent: NETWORK_SECURITY_GROUP,
        property: "securityRules",
        child: SECURITY_RULE,
    },
    InlineNesting {
        parent: ROUTE_TABLE,
        property: "routes",
        child: ROUTE,
    },
];

/// Inline nesting entry for a parent type.
#[must_use]
pub fn nesting_for_parent(parent: &str) -> Option<&'static InlineNesting> {
    INLINE_NESTINGS.iter().find(|n| ResourceType::new(n.parent).matches(parent))
}
