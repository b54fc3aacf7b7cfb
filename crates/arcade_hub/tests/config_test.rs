//! Tests for loading `arcade.toml`.

use arcade_hub::HubConfig;
use arcade_tictactoe::SearchPolicy;
use std::io::Write;
use std::time::Duration;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[reward]
enabled = false
amount = 250

[ai]
policy = "flat"
think_min_ms = 0
think_jitter_ms = 0

[dice]
starting_coins = 40
"#
    )
    .unwrap();

    let config = HubConfig::from_file(file.path()).unwrap();
    assert!(!*config.reward().enabled());
    assert_eq!(*config.reward().amount(), 250);
    assert_eq!(*config.ai().policy(), SearchPolicy::Flat);
    assert_eq!(config.ai().think_min(), Duration::ZERO);
    assert_eq!(*config.dice().starting_coins(), 40);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = HubConfig::load(dir.path().join("arcade.toml")).unwrap();
    assert_eq!(config.ai(), HubConfig::default().ai());
    assert_eq!(config.dice(), HubConfig::default().dice());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dice]\nstarting_coins = \"lots\"").unwrap();

    let err = HubConfig::load(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}
