//! Tests for children declared inline in their parent's properties

use anyhow::Result;
use armsynth::config::SynthConfig;
use armsynth::constants::{NETWORK_SECURITY_GROUP, SECURITY_RULE, SUBNET, VIRTUAL_NETWORK};
use armsynth::construct::Construct;
use armsynth::record::CanonicalRecord;
use armsynth::resolver::resolve;
use armsynth::synth::synthesize;
use armsynth::test_utils::TreeFixture;
use armsynth::transform::transform_all;
use serde_json::json;

const VNET1: &str = "[resourceId('Microsoft.Network/virtualNetworks', 'vnet1')]";

fn deps<'r>(records: &'r [CanonicalRecord], name: &str) -> &'r [String] {
    records
        .iter()
        .find(|r| r.name == name)
        .and_then(|r| r.depends_on.as_deref())
        .unwrap_or_default()
}

#[test]
fn test_reference_to_inline_subnet_points_at_network() -> Result<()> {
    armsynth::test_utils::init_test_logging(None);

    let fixture = TreeFixture::inline_network();
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "vnet1");
    assert_eq!(deps(&records, "nic1"), [VNET1.to_string()]);
    for record in &records {
        for expr in record.depends_on.iter().flatten() {
            assert!(!expr.contains(SUBNET), "'{}' references an inline child: {expr}", record.name);
        }
    }
    Ok(())
}

#[test]
fn test_mentioning_only_the_child_name_is_enough() -> Result<()> {
    let mut fixture = TreeFixture::inline_network();
    fixture.add(
        Construct::new("lb", "Microsoft.Network/loadBalancers", "lb1")
            .with_properties(json!({"frontendIPConfigurations": [{"name": "fe", "subnetName": "data"}]})),
    );
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert_eq!(deps(&records, "lb1"), [VNET1.to_string()]);
    Ok(())
}

#[test]
fn test_separate_child_records_are_targeted_directly() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(Construct::new("vnet", VIRTUAL_NETWORK, "vnet1"));
    fixture.add(Construct::new("subnet", SUBNET, "vnet1/app"));
    fixture.add(
        Construct::new("nic", "Microsoft.Network/networkInterfaces", "nic1")
            .with_properties(json!({"ipConfigurations": [{"name": "ip", "subnet": "vnet1/app"}]})),
    );
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert!(
        deps(&records, "nic1")
            .contains(&"[resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet1', 'app')]".to_string())
    );
    Ok(())
}

#[test]
fn test_inline_security_rules_redirect_to_group() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(Construct::new("nsg", NETWORK_SECURITY_GROUP, "nsg-web").with_properties(json!({
        "securityRules": [{
            "name": "allow-https-inbound",
            "properties": {"priority": 100, "direction": "Inbound", "access": "Allow", "protocol": "Tcp"}
        }]
    })));
    fixture.add(
        Construct::new("watcher", "Microsoft.Network/networkWatchers", "nw1")
            .with_properties(json!({"monitoredRule": "allow-https-inbound"})),
    );
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert_eq!(
        deps(&records, "nw1"),
        ["[resourceId('Microsoft.Network/networkSecurityGroups', 'nsg-web')]".to_string()]
    );
    assert!(!deps(&records, "nw1").iter().any(|e| e.contains(SECURITY_RULE)));
    Ok(())
}

#[test]
fn test_explicit_link_to_folded_child_goes_to_parent() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(Construct::new("vnet", VIRTUAL_NETWORK, "vnet1"));
    fixture.add(Construct::new("subnet", SUBNET, "vnet1/app"));
    fixture.add(Construct::new("kv", "Microsoft.KeyVault/vaults", "kv1"));
    fixture.link("kv", "subnet")?;

    // The subnet construct is folded into the network and emits no record
    let records = transform_all(fixture.tree.iter().filter(|c| c.resource_type != SUBNET));
    let resolution = resolve(records, &fixture.tree)?;
    assert_eq!(deps(&resolution.records, "kv1"), [VNET1.to_string()]);
    assert_eq!(resolution.graph.dependents(&resolution.records[0].key()).len(), 1);
    Ok(())
}

fn network_with_default_subnet(id: &str, name: &str) -> Construct {
    Construct::new(id, VIRTUAL_NETWORK, name).with_properties(json!({
        "subnets": [{"name": "default", "properties": {"addressPrefix": "10.0.0.0/24"}}]
    }))
}

#[test]
fn test_networks_sharing_a_subnet_name_stay_independent() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(network_with_default_subnet("hub", "vnet-hub"));
    fixture.add(network_with_default_subnet("spoke", "vnet-spoke"));

    let resolution = resolve(transform_all(fixture.tree.iter()), &fixture.tree)?;
    assert_eq!(resolution.graph.edge_count(), 0);
    assert!(resolution.records.iter().all(|r| r.depends_on.is_none()));
    Ok(())
}

#[test]
fn test_shared_subnet_name_needs_the_network_to_disambiguate() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(network_with_default_subnet("hub", "vnet-hub"));
    fixture.add(network_with_default_subnet("spoke", "vnet-spoke"));
    fixture.add(
        Construct::new("nic", "Microsoft.Network/networkInterfaces", "nic1").with_properties(json!({
            "ipConfigurations": [{
                "name": "ipconfig1",
                "properties": {
                    "subnet": {"id": "[resourceId('Microsoft.Network/virtualNetworks/subnets', 'vnet-spoke', 'default')]"}
                }
            }]
        })),
    );
    fixture.add(
        Construct::new("lb", "Microsoft.Network/loadBalancers", "lb1")
            .with_properties(json!({"frontendIPConfigurations": [{"name": "fe", "subnetName": "default"}]})),
    );

    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert_eq!(
        deps(&records, "nic1"),
        ["[resourceId('Microsoft.Network/virtualNetworks', 'vnet-spoke')]".to_string()]
    );
    assert!(deps(&records, "lb1").is_empty());
    Ok(())
}

#[test]
fn test_child_name_inside_a_longer_word_is_not_a_reference() -> Result<()> {
    let mut fixture = TreeFixture::new();
    fixture.add(network_with_default_subnet("hub", "vnet-hub"));
    fixture.add(
        Construct::new("st", "Microsoft.Storage/storageAccounts", "logs01")
            .with_properties(json!({"networkAcls": {"defaultAction": "Deny"}})),
    );
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert!(deps(&records, "logs01").is_empty());
    Ok(())
}

#[test]
fn test_groups_sharing_a_rule_name_stay_independent() -> Result<()> {
    let mut fixture = TreeFixture::new();
    for (id, name) in [("web", "nsg-web"), ("data", "nsg-data")] {
        fixture.add(Construct::new(id, NETWORK_SECURITY_GROUP, name).with_properties(json!({
            "securityRules": [{
                "name": "deny-all-inbound",
                "properties": {"priority": 4096, "direction": "Inbound", "access": "Deny", "protocol": "*"}
            }]
        })));
    }
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    assert!(records.iter().all(|r| r.depends_on.is_none()));
    Ok(())
}
