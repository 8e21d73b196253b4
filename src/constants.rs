//! Global constants used throughout the synthesis pipeline.
//!
//! Resource type identifiers that the dependency rules and the inline-nesting
//! table refer to are defined here so that the rule tables, the API version
//! table, and the tests all agree on the exact spelling.

/// API version used when neither the construct, the configuration, nor the
/// built-in table knows the resource type.
pub const FALLBACK_API_VERSION: &str = "2023-01-01";

/// Separator between segments of resource types and hierarchical names.
pub const PATH_SEPARATOR: char = '/';

/// Function name used in cross-reference expressions.
pub const RESOURCE_ID_FUNCTION: &str = "resourceId";

/// Virtual network.
pub const VIRTUAL_NETWORK: &str = "Microsoft.Network/virtualNetworks";

/// Subnet declared as its own top-level resource.
pub const SUBNET: &str = "Microsoft.Network/virtualNetworks/subnets";

/// Network security group.
pub const NETWORK_SECURITY_GROUP: &str = "Microsoft.Network/networkSecurityGroups";

/// Security rule declared as its own top-level resource.
pub const SECURITY_RULE: &str = "Microsoft.Network/networkSecurityGroups/securityRules";

/// Route table.
pub const ROUTE_TABLE: &str = "Microsoft.Network/routeTables";

/// Route declared as its own top-level resource.
pub const ROUTE: &str = "Microsoft.Network/routeTables/routes";

/// Network interface.
pub const NETWORK_INTERFACE: &str = "Microsoft.Network/networkInterfaces";

/// Public IP address.
pub const PUBLIC_IP_ADDRESS: &str = "Microsoft.Network/publicIPAddresses";

/// Virtual machine.
pub const VIRTUAL_MACHINE: &str = "Microsoft.Compute/virtualMachines";

/// App service plan.
pub const SERVER_FARM: &str = "Microsoft.Web/serverfarms";

/// Web application.
pub const WEB_SITE: &str = "Microsoft.Web/sites";
