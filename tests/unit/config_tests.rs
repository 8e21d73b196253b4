//! Tests for loading synthesis configuration from disk

use anyhow::Result;
use armsynth::config::{DetectionMode, SynthConfig};
use armsynth::core::SynthError;
use armsynth::test_utils::ConfigFixture;
use tempfile::TempDir;

#[test]
fn test_load_strict_config() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ConfigFixture::strict().write_to(temp.path())?;

    let config = SynthConfig::load_from(&path)?;
    assert_eq!(config.detection, DetectionMode::ExplicitOnly);
    assert_eq!(config.fallback_api_version, "2022-01-01");
    assert_eq!(config.api_versions.get("Microsoft.Web/sites").map(String::as_str), Some("2023-12-01"));
    Ok(())
}

#[test]
fn test_empty_config_uses_defaults() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ConfigFixture::empty().write_to(temp.path())?;
    assert_eq!(SynthConfig::load_from(&path)?, SynthConfig::default());
    Ok(())
}

#[test]
fn test_invalid_syntax_names_the_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ConfigFixture::invalid_syntax().write_to(temp.path())?;

    let err = SynthConfig::load_from(&path).unwrap_err();
    let Some(SynthError::ConfigParseError {
        file,
        ..
    }) = err.downcast_ref::<SynthError>()
    else {
        panic!("expected a config parse error, got {err:#}");
    };
    assert!(file.ends_with("armsynth.toml"));
    Ok(())
}

#[test]
fn test_unknown_detection_mode_is_rejected() -> Result<()> {
    let temp = TempDir::new()?;
    let path = ConfigFixture::unknown_mode().write_to(temp.path())?;
    assert!(SynthConfig::load_from(&path).is_err());
    Ok(())
}

#[test]
fn test_missing_file() {
    let temp = TempDir::new().unwrap();
    let err = SynthConfig::load_from(&temp.path().join("absent.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read config file"));
    assert!(err.downcast_ref::<SynthError>().is_none());
    assert!(err.downcast_ref::<std::io::Error>().is_some());
}
