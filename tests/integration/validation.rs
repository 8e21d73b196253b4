//! Tests for structural validation of synthesized records

use anyhow::Result;
use armsynth::config::SynthConfig;
use armsynth::construct::Construct;
use armsynth::record::CanonicalRecord;
use armsynth::synth::synthesize;
use armsynth::test_utils::TreeFixture;
use armsynth::transform::transform_all;
use armsynth::validation::{validate_explicit_references, validate_records};

#[test]
fn test_synthesized_fixtures_are_valid() -> Result<()> {
    for fixture in [TreeFixture::web_app(), TreeFixture::inline_network(), TreeFixture::separate_network()] {
        let records = synthesize(&fixture.tree, &SynthConfig::default())?;
        let issues = validate_records(&records);
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        assert!(validate_explicit_references(&records, &fixture.tree).is_empty());
    }
    Ok(())
}

#[test]
fn test_issues_are_data_with_remediation() -> Result<()> {
    let records: Vec<CanonicalRecord> = serde_json::from_str(
        r#"[
            {"type": "Microsoft.Web/sites", "apiVersion": "2022-09-01", "name": "site1"},
            {"type": "Microsoft.Network/virtualNetworks/subnets", "name": "app"}
        ]"#,
    )?;
    let issues = validate_records(&records);

    let paths: Vec<&str> = issues.iter().map(|i| i.field_path.as_str()).collect();
    assert_eq!(paths, vec!["resources.1.apiVersion", "resources.1.name"]);
    for issue in &issues {
        assert!(!issue.message.is_empty());
        assert!(!issue.detail.is_empty());
        assert!(!issue.suggestion.is_empty());
    }

    let json = serde_json::to_value(&issues[0])?;
    assert_eq!(json["fieldPath"], "resources.1.apiVersion");
    Ok(())
}

#[test]
fn test_misspelled_link_suggests_closest_record() -> Result<()> {
    let mut fixture = TreeFixture::web_app();
    fixture.add(Construct::new("orphan", "Microsoft.Web/serverfarms", "plan2"));
    fixture.link("site", "orphan")?;

    let records = transform_all(fixture.tree.iter().filter(|c| c.name != "plan2"));
    let issues = validate_explicit_references(&records, &fixture.tree);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field_path, "site.dependsOn.0");
    assert_eq!(issues[0].suggestion, "Did you mean 'plan1'?");
    Ok(())
}
