//! Built-in resource type → API version table.
//!
//! Versions are the latest stable revisions of each type's schema at the time
//! the table was last refreshed. Lookups are case-insensitive.

const KNOWN_API_VERSIONS: &[(&str, &str)] = &[
    ("Microsoft.Authorization/roleAssignments", "2022-04-01"),
    ("Microsoft.Compute/disks", "2023-04-02"),
    ("Microsoft.Compute/virtualMachines", "2023-03-01"),
    ("Microsoft.Compute/virtualMachines/extensions", "2023-03-01"),
    ("Microsoft.ContainerRegistry/registries", "2023-07-01"),
    ("Microsoft.DocumentDB/databaseAccounts", "2023-04-15"),
    ("Microsoft.Insights/components", "2020-02-02"),
    ("Microsoft.KeyVault/vaults", "2023-02-01"),
    ("Microsoft.KeyVault/vaults/secrets", "2023-02-01"),
    ("Microsoft.ManagedIdentity/userAssignedIdentities", "2023-01-31"),
    ("Microsoft.Network/networkInterfaces", "2023-04-01"),
    ("Microsoft.Network/networkSecurityGroups", "2023-04-01"),
    ("Microsoft.Network/networkSecurityGroups/securityRules", "2023-04-01"),
    ("Microsoft.Network/publicIPAddresses", "2023-04-01"),
    ("Microsoft.Network/routeTables", "2023-04-01"),
    ("Microsoft.Network/routeTables/routes", "2023-04-01"),
    ("Microsoft.Network/virtualNetworks", "2023-04-01"),
    ("Microsoft.Network/virtualNetworks/subnets", "2023-04-01"),
    ("Microsoft.OperationalInsights/workspaces", "2022-10-01"),
    ("Microsoft.Sql/servers", "2022-05-01-preview"),
    ("Microsoft.Sql/servers/databases", "2022-05-01-preview"),
    ("Microsoft.Storage/storageAccounts", "2023-01-01"),
    ("Microsoft.Storage/storageAccounts/blobServices/containers", "2023-01-01"),
    ("Microsoft.Web/serverfarms", "2022-09-01"),
    ("Microsoft.Web/sites", "2022-09-01"),
    ("Microsoft.Web/sites/config", "2022-09-01"),
];

/// Look up the built-in API version for a resource type.
#[must_use]
pub fn known_api_version(resource_type: &str) -> Option<&'static str> {
    KNOWN_API_VERSIONS
        .iter()
        .find(|(ty, _)| ty.eq_ignore_ascii_case(resource_type))
        .map(|(_, version)| *version)
}
