//! Tests for cross-reference expression rendering and parsing

use armsynth::constants::{SUBNET, VIRTUAL_NETWORK};
use armsynth::record::NodeKey;
use armsynth::resolver::expression::{
    expected_arity, parse_resource_id, references_type, render_resource_id,
};

#[test]
fn test_top_level_type_has_one_name_argument() {
    assert_eq!(
        render_resource_id(VIRTUAL_NETWORK, "vnet1"),
        "[resourceId('Microsoft.Network/virtualNetworks', 'vnet1')]"
    );
    assert_eq!(expected_arity(VIRTUAL_NETWORK), 2);
}

#[test]
fn test_child_type_has_two_name_arguments() {
    assert_eq!(
        render_resource_id(SUBNET, "vnet1/app"),
        "[resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet1', 'app')]"
    );
    assert_eq!(expected_arity(SUBNET), 3);
}

#[test]
fn test_quotes_are_doubled_and_restored() {
    let expr = render_resource_id("Microsoft.KeyVault/vaults", "o'brien");
    assert_eq!(expr, "[resourceId('Microsoft.KeyVault/vaults', 'o''brien')]");
    assert_eq!(parse_resource_id(&expr), Some(NodeKey::new("Microsoft.KeyVault/vaults", "o'brien")));
}

#[test]
fn test_parse_rejects_other_expressions() {
    assert_eq!(parse_resource_id("[reference('vnet1')]"), None);
    assert_eq!(parse_resource_id("[resourceId('Microsoft.Web/sites')]"), None);
    assert_eq!(parse_resource_id("[resourceId('Microsoft.Web/sites', parameters('name'))]"), None);
    assert_eq!(parse_resource_id("resourceId('Microsoft.Web/sites', 'x')"), None);
}

#[test]
fn test_references_type_is_exact() {
    let expr = render_resource_id(SUBNET, "vnet1/app");
    assert!(references_type(&expr, SUBNET));
    assert!(references_type(&expr, &SUBNET.to_ascii_lowercase()));
    assert!(!references_type(&expr, VIRTUAL_NETWORK));
}
