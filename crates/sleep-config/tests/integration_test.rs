//! Integration tests for sleep-config crate.

use sleep_common::test_utils::config_fixtures;
use sleep_config::{Config, ConfigCache, ConfigLoader, StorageBackend};
use std::io::Write;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.timezone = "Invalid/Zone".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_config_cache() {
    let config = Config {
        timezone: "Europe/Paris".to_string(),
        ..Config::default()
    };
    let cache = ConfigCache::new(config);

    assert_eq!(cache.get().timezone, "Europe/Paris");
    assert_eq!(ConfigCache::default().get().night_end_hour, 6);
}

#[test]
fn test_load_full_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(config_fixtures::full_config_yaml().as_bytes()).unwrap();

    let config = ConfigLoader::load_config(file.path()).unwrap();
    assert_eq!(config.morning_start_hour, 5);
    assert_eq!(config.night_end_hour, 4);
    assert!(config.multi_get_up_enable);
    assert!(config.deep_sleep_enable);
    assert_eq!(config.night_messages, vec!["晚安".to_string(), "good night".to_string()]);
    assert_eq!(config.storage.backend, StorageBackend::Sled);
    assert_eq!(config.storage.path.to_str(), Some("data/sleep"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_load_minimal_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    file.write_all(config_fixtures::minimal_config_yaml().as_bytes()).unwrap();

    let config = ConfigLoader::load_config(file.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_rejects_invalid_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(b"morningStartHour: 3\nnightEndHour: 5\n").unwrap();

    assert!(ConfigLoader::load_config(file.path()).is_err());
}
