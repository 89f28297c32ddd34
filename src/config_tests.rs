use crate::config::{
    Config, ENV_API_KEY, ENV_BASE_URL, ENV_GROUP_NAME, ENV_TIMEOUT_SECS, EnvConfig, FileConfig,
};
use crate::domain::errors::ConfigError;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn file(api_key: &str, api_secret: &str, org_id: &str) -> FileConfig {
    FileConfig {
        api_key: Some(api_key.to_string()),
        api_secret: Some(api_secret.to_string()),
        org_id: Some(org_id.to_string()),
        ..FileConfig::default()
    }
}

fn env(vars: &[(&str, &str)]) -> EnvConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_applied() {
    let config = Config::resolve(file("key", "secret", "org"), EnvConfig::default()).unwrap();

    assert_eq!(config.credentials.api_key, "key");
    assert_eq!(config.credentials.api_secret, "secret");
    assert_eq!(config.credentials.org_id, "org");
    assert_eq!(config.base_url.as_str(), "https://api2.nicehash.com/");
    assert_eq!(config.request_timeout, Duration::from_secs(15));
    assert_eq!(config.rig_group, None);
}

#[test]
fn test_credentials_are_kept_verbatim() {
    let config = Config::resolve(file(" key ", "s3cret\t", "org"), EnvConfig::default()).unwrap();

    assert_eq!(config.credentials.api_key, " key ");
    assert_eq!(config.credentials.api_secret, "s3cret\t");
}

#[test]
fn test_missing_fields_are_fatal() {
    let cases = [
        (file("", "secret", "org"), "api_key"),
        (file("key", "  ", "org"), "api_secret"),
        (
            FileConfig {
                org_id: None,
                ..file("key", "secret", "org")
            },
            "org_id",
        ),
    ];

    for (config_file, expected) in cases {
        match Config::resolve(config_file, EnvConfig::default()) {
            Err(ConfigError::MissingField { field }) => assert_eq!(field, expected),
            other => panic!("expected missing {}, got {:?}", expected, other),
        }
    }
}

#[test]
fn test_env_overrides_file() {
    let config = Config::resolve(
        file("file-key", "secret", "org"),
        env(&[
            (ENV_API_KEY, "env-key"),
            (ENV_BASE_URL, "http://127.0.0.1:8080"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_GROUP_NAME, " garage "),
        ]),
    )
    .unwrap();

    assert_eq!(config.credentials.api_key, "env-key");
    assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
    assert_eq!(config.request_timeout, Duration::from_secs(5));
    assert_eq!(config.rig_group.as_deref(), Some("garage"));
}

#[test]
fn test_empty_env_values_are_ignored() {
    let config = Config::resolve(file("file-key", "secret", "org"), env(&[(ENV_API_KEY, "")])).unwrap();
    assert_eq!(config.credentials.api_key, "file-key");
}

#[test]
fn test_invalid_timeout() {
    let err = Config::resolve(file("k", "s", "o"), env(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

    let zero = FileConfig {
        timeout_secs: Some(0),
        ..file("k", "s", "o")
    };
    let err = Config::resolve(zero, EnvConfig::default()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
}

#[test]
fn test_invalid_base_url() {
    for url in ["not a url", "ftp://api2.nicehash.com", "mailto:ops@example.com"] {
        let config_file = FileConfig {
            base_url: Some(url.to_string()),
            ..file("k", "s", "o")
        };
        let err = Config::resolve(config_file, EnvConfig::default()).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidBaseUrl { .. }),
            "{} should be rejected",
            url
        );
    }
}

#[test]
fn test_parse_json_document() {
    let parsed = FileConfig::parse(
        Path::new("nicehash.json"),
        r#"{"api_key": "k", "api_secret": "s", "org_id": "o", "timeout_secs": 20}"#,
    )
    .unwrap();

    assert_eq!(parsed.api_key.as_deref(), Some("k"));
    assert_eq!(parsed.timeout_secs, Some(20));
    assert_eq!(parsed.group_name, None);
}

#[test]
fn test_parse_toml_document() {
    let parsed = FileConfig::parse(
        Path::new("nicehash.toml"),
        "api_key = \"k\"\napi_secret = \"s\"\norg_id = \"o\"\ngroup_name = \"garage\"\n",
    )
    .unwrap();

    assert_eq!(parsed.org_id.as_deref(), Some("o"));
    assert_eq!(parsed.group_name.as_deref(), Some("garage"));
}

#[test]
fn test_parse_error_names_file() {
    let err = FileConfig::parse(Path::new("broken.json"), "{not json").unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_load_missing_file() {
    let err = Config::load(Some(Path::new("/nonexistent/nicehash/config.json"))).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
