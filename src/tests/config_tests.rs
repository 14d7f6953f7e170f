//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{
    get_global_config, query::QuerySettings, trie::TrieSettings, ConfigLoader, LogConfig,
    TriezConfig, Validate,
};
use crate::data_structures::trie::DEFAULT_MAX_KEY_LENGTH;
use crate::error::config::ConfigError;
use crate::error::TriezError;
use crate::tests::test_utils::TestFixture;
use std::fs;
use tempfile::tempdir;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = TriezConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.trie.max_key_length, DEFAULT_MAX_KEY_LENGTH);
    assert_eq!(config.query.max_distance, 2);
    assert_eq!(config.query.result_limit, None);
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = TriezConfig::default();

    config.trie.max_key_length = 0;
    assert!(config.validate().is_err());

    config.trie.max_key_length = 64;
    config.query.max_distance = 100;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { ref key, .. }) if key == "query.max_distance"
    ));

    config.query.max_distance = 3;
    config.log.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test the individual section rules.
#[test]
fn test_specific_validation_rules() {
    let query = QuerySettings {
        result_limit: Some(0),
        ..QuerySettings::default()
    };
    assert!(query.validate().is_err());

    let query = QuerySettings {
        result_limit: Some(10),
        ..QuerySettings::default()
    };
    assert!(query.validate().is_ok());

    let trie = TrieSettings { max_key_length: 0 };
    assert!(trie.validate().is_err());

    let log = LogConfig {
        level: "warn".to_string(),
        json: true,
    };
    assert!(log.validate().is_ok());
}

/// Test that trie settings carry over into the engine configuration.
#[test]
fn test_trie_settings_to_trie_config() {
    let settings = TrieSettings { max_key_length: 12 };
    assert_eq!(settings.to_trie_config().get_max_key_length(), 12);
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    std::env::remove_var("TEST_FILE__QUERY__MAX_DISTANCE");

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config_file_test.toml");

    let config_content = r#"
    [trie]
    max_key_length = 64

    [query]
    max_distance = 3
    result_limit = 25
    "#;

    fs::write(&config_path, config_content).unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.trie.max_key_length, 64);
    assert_eq!(config.query.max_distance, 3);
    assert_eq!(config.query.result_limit, Some(25));

    // Other values should be defaults
    assert_eq!(config.log.level, "info");
    assert!(!config.log.json);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_config_from_json() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    fs::write(&config_path, r#"{ "log": { "level": "debug", "json": true } }"#).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON")
        .load()
        .unwrap();

    assert_eq!(config.log.level, "debug");
    assert!(config.log.json);
    assert_eq!(config.trie.max_key_length, DEFAULT_MAX_KEY_LENGTH);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_env_test.toml",
            "[query]\nmax_distance = 1\n\n[trie]\nmax_key_length = 32\n",
        )
        .unwrap();

    fixture.set_env("TEST_ENV__QUERY__MAX_DISTANCE", "4");
    fixture.set_env("TEST_ENV__LOG__LEVEL", "trace");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    // Environment variables take precedence over the file
    assert_eq!(config.query.max_distance, 4);
    assert_eq!(config.log.level, "trace");
    assert_eq!(config.trie.max_key_length, 32);
}

/// Test that environment overrides are validated too.
#[test]
fn test_env_var_override_is_validated() {
    let mut fixture = TestFixture::new().unwrap();
    fixture.set_env("TEST_BAD_ENV__TRIE__MAX_KEY_LENGTH", "0");

    let loader = ConfigLoader::new(None::<&std::path::Path>, "TEST_BAD_ENV");
    assert!(matches!(
        loader.load(),
        Err(ConfigError::ValueOutOfRange { .. }) | Err(ConfigError::ValidationError(_))
    ));
}

/// Test that a missing file is reported as such.
#[test]
fn test_missing_config_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("absent.toml");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_MISSING");
    match loader.load() {
        Err(ConfigError::FileNotFound(path)) => assert_eq!(path, config_path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

/// Test that an unknown file extension is rejected.
#[test]
fn test_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture.create_file("config.ini", "[query]").unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_EXT");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("invalid.toml");

    let config_content = r#"
    [query
    max_distance = two"
    "#;

    fs::write(&config_path, config_content).unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(loader.load().is_err());
}

/// Test that the generated default file loads back to the defaults.
#[test]
fn test_default_config_serializes_to_loadable_toml() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&TriezConfig::default()).unwrap();
    let config_path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_GENERATED")
        .load()
        .unwrap();
    assert_eq!(config.trie.max_key_length, DEFAULT_MAX_KEY_LENGTH);
    assert_eq!(config.query.max_distance, 2);
}

/// Test that library initialization loads the file and installs it globally.
#[test]
fn test_init_installs_loaded_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("init.toml", "[trie]\nmax_key_length = 77\n")
        .unwrap();

    let config = crate::init(Some(&config_path)).unwrap();
    assert_eq!(config.trie.max_key_length, 77);
    assert!(!crate::VERSION.is_empty());

    // No other test sets the global configuration.
    assert_eq!(get_global_config().get().trie.max_key_length, 77);

    let missing = fixture.temp_dir.path().join("missing.toml");
    assert!(matches!(
        crate::init(Some(&missing)),
        Err(TriezError::Config(ConfigError::FileNotFound(_)))
    ));
}
