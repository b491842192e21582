//! Configuration source tests
//!
//! Exercise the file and environment loaders end to end and the validation
//! that turns raw settings into an engine configuration.

use redlink_config::{
    ConfigError, RedlinkConfig, RedlinkSettings, APP_ENV, APP_PROPERTY, DEFAULT_VERSION, KEY_ENV,
    VERSION_ENV,
};
use serial_test::serial;
use std::io::Write;

#[test]
fn test_load_from_file_and_validate() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
app = "file-app"
key = "file-key"
version = "1.0"
endpoint = "https://redlink.example.org"
"#
    )
    .unwrap();

    let settings = RedlinkSettings::load_from_file(file.path()).unwrap();
    let config = RedlinkConfig::try_from(settings).unwrap();

    assert_eq!(config.app_id(), "file-app");
    assert_eq!(config.endpoint(), "https://redlink.example.org");
    assert_eq!(config.api_version(), DEFAULT_VERSION);
}

#[test]
fn test_load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = RedlinkSettings::load_from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "app = [unterminated").unwrap();

    let err = RedlinkSettings::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_empty_settings_name_the_app_property() {
    let err = RedlinkConfig::try_from(RedlinkSettings::default()).unwrap_err();
    assert_eq!(err.property(), Some(APP_PROPERTY));
}

#[test]
#[serial]
fn test_env_overrides_file_settings() {
    std::env::set_var(APP_ENV, "env-app");
    std::env::set_var(KEY_ENV, "env-key");
    std::env::set_var(VERSION_ENV, "");

    let file = RedlinkSettings {
        app: Some("file-app".to_string()),
        key: Some("file-key".to_string()),
        version: Some("3.0".to_string()),
        ..Default::default()
    };
    let config = RedlinkConfig::try_from(file.overlay(RedlinkSettings::from_env())).unwrap();

    std::env::remove_var(APP_ENV);
    std::env::remove_var(KEY_ENV);
    std::env::remove_var(VERSION_ENV);

    assert_eq!(config.app_id(), "env-app");
    assert_eq!(config.api_key(), "env-key");
    // An empty environment value still counts as set and falls back to the default
    assert_eq!(config.api_version(), DEFAULT_VERSION);
}
