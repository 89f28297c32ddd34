//! Raw configuration sources: the config document and environment variables.
//!
//! Every key is optional here; [`super::Config::resolve`] merges the sources
//! and decides what is missing.

use crate::domain::errors::ConfigError;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

pub const ENV_API_KEY: &str = "NICEHASH_API_KEY";
pub const ENV_API_SECRET: &str = "NICEHASH_API_SECRET";
pub const ENV_ORG_ID: &str = "NICEHASH_ORG_ID";
pub const ENV_BASE_URL: &str = "NICEHASH_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "NICEHASH_TIMEOUT_SECS";
pub const ENV_GROUP_NAME: &str = "NICEHASH_GROUP_NAME";

/// Contents of the config document (JSON, or TOML for `.toml` paths).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub org_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub group_name: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed: Result<Self, String> = if is_toml {
            toml::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }
}

/// Environment overrides. Unset or empty variables are ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub org_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<String>,
    pub group_name: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get(ENV_API_KEY),
            api_secret: get(ENV_API_SECRET),
            org_id: get(ENV_ORG_ID),
            base_url: get(ENV_BASE_URL),
            timeout_secs: get(ENV_TIMEOUT_SECS),
            group_name: get(ENV_GROUP_NAME),
        }
    }
}
