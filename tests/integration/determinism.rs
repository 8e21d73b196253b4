//! Tests that synthesis output depends only on its input

use anyhow::Result;
use armsynth::config::SynthConfig;
use armsynth::construct::Construct;
use armsynth::synth::synthesize;
use armsynth::test_utils::TreeFixture;
use serde_json::json;

fn mixed_fixture() -> Result<TreeFixture> {
    let mut fixture = TreeFixture::inline_network();
    fixture.add(Construct::new("pip", "Microsoft.Network/publicIPAddresses", "pip1"));
    fixture.add(
        Construct::new("vm", "Microsoft.Compute/virtualMachines", "vm1").with_properties(json!({
            "networkProfile": {
                "networkInterfaces": [{"id": "[resourceId('Microsoft.Network/networkInterfaces', 'nic1')]"}]
            }
        })),
    );
    fixture.add(Construct::new("kv", "Microsoft.KeyVault/vaults", "kv1"));
    fixture.link("vm", "kv")?;
    Ok(fixture)
}

#[test]
fn test_synthesis_is_deterministic() -> Result<()> {
    armsynth::test_utils::init_test_logging(None);

    let fixture = mixed_fixture()?;
    let config = SynthConfig::default();

    let first = serde_json::to_string(&synthesize(&fixture.tree, &config)?)?;
    for _ in 0..5 {
        let again = serde_json::to_string(&synthesize(&fixture.tree, &config)?)?;
        assert_eq!(first, again);
    }
    Ok(())
}

#[test]
fn test_equal_trees_give_equal_output() -> Result<()> {
    let config = SynthConfig::default();
    let a = synthesize(&mixed_fixture()?.tree, &config)?;
    let b = synthesize(&mixed_fixture()?.tree, &config)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_independent_records_keep_input_order() -> Result<()> {
    let mut fixture = TreeFixture::new();
    for name in ["zeta", "alpha", "mid"] {
        fixture.add(Construct::new(name, "Microsoft.KeyVault/vaults", name));
    }
    let records = synthesize(&fixture.tree, &SynthConfig::default())?;
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    Ok(())
}
