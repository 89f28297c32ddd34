//! Configuration module for the NiceHash collector.
//!
//! Sources, lowest precedence first: the config document (JSON, or TOML by
//! extension), then `NICEHASH_*` environment variables. The result is a
//! complete, validated [`Config`]; a missing credential is fatal before any
//! request is made.

mod file_config;

pub use file_config::{
    ENV_API_KEY, ENV_API_SECRET, ENV_BASE_URL, ENV_GROUP_NAME, ENV_ORG_ID, ENV_TIMEOUT_SECS,
    EnvConfig, FileConfig,
};

use crate::domain::credentials::Credentials;
use crate::domain::errors::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api2.nicehash.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: Url,
    pub request_timeout: Duration,
    pub rig_group: Option<String>,
}

impl Config {
    /// Loads the config document (if any) and applies environment overrides.
    ///
    /// With no explicit path, `config.json` next to the executable is used
    /// when it exists; otherwise only the environment is consulted.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                FileConfig::load(path)?
            }
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    info!("Loading config from {}", path.display());
                    FileConfig::load(&path)?
                }
                None => {
                    debug!("No config file found, using environment only");
                    FileConfig::default()
                }
            },
        };

        Self::resolve(file, EnvConfig::from_env())
    }

    /// Merges the two sources and validates the result.
    pub fn resolve(file: FileConfig, env: EnvConfig) -> Result<Self, ConfigError> {
        let api_key = required("api_key", env.api_key.or(file.api_key))?;
        let api_secret = required("api_secret", env.api_secret.or(file.api_secret))?;
        let org_id = required("org_id", env.org_id.or(file.org_id))?;

        let base_url = parse_base_url(
            env.base_url
                .or(file.base_url)
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;

        let timeout_secs = match env.timeout_secs {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw.clone() })?,
            None => file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                value: timeout_secs.to_string(),
            });
        }

        let rig_group = env
            .group_name
            .or(file.group_name)
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret, org_id),
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            rig_group,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingField { field })
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base URL".to_string()));
    }
    Ok(url)
}

fn default_config_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(DEFAULT_CONFIG_FILE))
}
