//! Tests for value cleaning as seen through the transformer

use anyhow::Result;
use armsynth::construct::{Construct, PropertyValue};
use armsynth::transform::transform;
use serde_json::{Value, json};

fn nested_bag() -> PropertyValue {
    PropertyValue::object()
        .with("addressPrefix", "10.0.0.0/24")
        .with("natGateway", PropertyValue::Absent)
        .with("delegations", PropertyValue::Array(vec![]))
        .with("serviceEndpointPolicies", PropertyValue::Null)
        .with(
            "privateEndpointNetworkPolicies",
            PropertyValue::object().with("mode", PropertyValue::Absent),
        )
        .with(
            "ipConfigurations",
            PropertyValue::Array(vec![
                PropertyValue::Absent,
                PropertyValue::Null,
                PropertyValue::object().with("name", "ip1").with("zone", PropertyValue::Absent),
            ]),
        )
}

#[test]
fn test_cleaning_removes_absent_and_keeps_null() -> Result<()> {
    armsynth::test_utils::init_test_logging(None);

    let construct = Construct::new("subnet", "Microsoft.Network/virtualNetworks/subnets", "vnet1/app")
        .with_properties(nested_bag());
    let record = transform(&construct);

    assert_eq!(
        record.properties,
        Some(json!({
            "addressPrefix": "10.0.0.0/24",
            "delegations": [],
            "serviceEndpointPolicies": null,
            "ipConfigurations": [null, {"name": "ip1"}]
        }))
    );

    let text = serde_json::to_string(&record)?;
    assert!(!text.contains("natGateway"));
    assert!(!text.contains("privateEndpointNetworkPolicies"));
    Ok(())
}

#[test]
fn test_cleaning_is_idempotent() {
    let once = nested_bag().clean();
    let twice = once.clone().map(PropertyValue::from).and_then(|v| v.clean());
    assert_eq!(once, twice);
}

#[test]
fn test_unset_top_level_blocks_are_omitted() -> Result<()> {
    let construct = Construct::new("st", "Microsoft.Storage/storageAccounts", "logs01")
        .with_sku(PropertyValue::object().with("name", PropertyValue::Absent))
        .with_identity(PropertyValue::Absent)
        .with_kind("StorageV2");
    let value = serde_json::to_value(transform(&construct))?;

    let Value::Object(map) = value else {
        panic!("record did not serialize to an object");
    };
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["apiVersion", "kind", "name", "type"]);
    Ok(())
}

#[test]
fn test_transform_does_not_touch_the_construct() {
    let construct = Construct::new("vnet", "Microsoft.Network/virtualNetworks", "vnet1")
        .with_properties(nested_bag());
    let before = construct.clone();
    let _ = transform(&construct);
    assert_eq!(construct, before);
}

#[test]
fn test_all_absent_properties_leave_no_field() -> Result<()> {
    let construct = Construct::new("ip", "Microsoft.Network/publicIPAddresses", "pip1").with_properties(
        PropertyValue::object()
            .with("dnsSettings", PropertyValue::object().with("domainNameLabel", PropertyValue::Absent))
            .with("idleTimeoutInMinutes", PropertyValue::Absent),
    );
    let once = transform(&construct);
    assert!(once.properties.is_none());
    assert!(serde_json::to_value(&once)?.get("properties").is_none());

    let reauthored = construct.clone().with_properties(PropertyValue::Absent);
    assert_eq!(transform(&reauthored), once);
    Ok(())
}
