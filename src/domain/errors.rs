use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating the collector configuration.
///
/// All of these are fatal: the process exits before any request is signed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("'{field}' missing in config file")]
    MissingField { field: &'static str },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid request timeout '{value}': must be a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// Errors related to a single API call. Always resource-scoped.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid JSON from {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Errors raised while turning a decoded document into metric records.
#[derive(Debug, Error, PartialEq)]
pub enum EncodeError {
    #[error("Unexpected {resource} response: expected a JSON object, got {found}")]
    UnexpectedShape {
        resource: &'static str,
        found: &'static str,
    },

    #[error("Record for {measurement} has no fields")]
    NoFields { measurement: String },

    #[error("Field {field} of {measurement} is not a finite number")]
    NonFiniteField { measurement: String, field: String },
}

/// Failure of one resource within a collection pass.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
