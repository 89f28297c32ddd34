//! NiceHash API v2 client
//!
//! Signs every GET with [`RequestSigner`] and returns the decoded JSON body.
//! Failures are reported as [`FetchError`] and never retried here.

use crate::domain::credentials::Credentials;
use crate::domain::errors::FetchError;
use crate::domain::ports::NiceHashApi;
use crate::infrastructure::core::http_client_factory::{HttpClientFactory, build_url_with_query};
use crate::infrastructure::nicehash::signer::RequestSigner;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub struct NiceHashClient {
    client: Client,
    signer: RequestSigner,
    base_url: Url,
}

impl NiceHashClient {
    pub fn new(credentials: Credentials, base_url: Url, timeout: Duration) -> Self {
        Self {
            client: HttpClientFactory::create_client(timeout),
            signer: RequestSigner::new(credentials),
            base_url,
        }
    }
}

#[async_trait]
impl NiceHashApi for NiceHashClient {
    async fn get(&self, path: &str, query: &str) -> Result<Value, FetchError> {
        let url = build_url_with_query(&self.base_url, path, query).map_err(|e| {
            FetchError::Transport {
                path: path.to_string(),
                reason: format!("invalid URL: {}", e),
            }
        })?;

        let signed = self.signer.sign("GET", path, query);
        debug!(path, request_id = %signed.request_id, "Sending signed request");

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        for (name, value) in signed.headers() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| FetchError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Transport {
            path: path.to_string(),
            reason: format!("failed to read body: {}", e),
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}
