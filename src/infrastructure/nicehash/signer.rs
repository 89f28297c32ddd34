//! NiceHash API v2 request signing
//!
//! The server recomputes an HMAC-SHA256 over a NUL-separated message built
//! from the credentials and the request line, so the byte layout below is a
//! wire contract:
//!
//! ```text
//! api_key \0 time \0 nonce \0 \0 org_id \0 \0 method \0 path \0 query
//! ```
//!
//! The empty slots after the nonce and after the org id stand for the
//! unused client id and additional-data fields and must always be present.

use crate::domain::credentials::Credentials;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

pub const HEADER_TIME: &str = "X-Time";
pub const HEADER_NONCE: &str = "X-Nonce";
pub const HEADER_AUTH: &str = "X-Auth";
pub const HEADER_ORGANIZATION: &str = "X-Organization-Id";
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

/// One signed API call. Built fresh per request and never reused.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub timestamp_ms: i64,
    pub nonce: String,
    pub request_id: String,
    pub signature: String,
    api_key: String,
    org_id: String,
}

impl SignedRequest {
    /// `X-Auth` value: `api_key:signature`.
    pub fn auth(&self) -> String {
        format!("{}:{}", self.api_key, self.signature)
    }

    pub fn headers(&self) -> [(&'static str, String); 5] {
        [
            (HEADER_TIME, self.timestamp_ms.to_string()),
            (HEADER_NONCE, self.nonce.clone()),
            (HEADER_AUTH, self.auth()),
            (HEADER_ORGANIZATION, self.org_id.clone()),
            (HEADER_REQUEST_ID, self.request_id.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// Signs a request with the current time and fresh random nonce and request id.
    pub fn sign(&self, method: &str, path: &str, query: &str) -> SignedRequest {
        self.sign_with(
            method,
            path,
            query,
            chrono::Utc::now().timestamp_millis(),
            Uuid::new_v4().to_string(),
            Uuid::new_v4().to_string(),
        )
    }

    pub fn sign_with(
        &self,
        method: &str,
        path: &str,
        query: &str,
        timestamp_ms: i64,
        nonce: String,
        request_id: String,
    ) -> SignedRequest {
        let message = self.message(&timestamp_ms.to_string(), &nonce, method, path, query);
        let signature = self.hmac_hex(&message);

        SignedRequest {
            method: method.to_string(),
            path: path.to_string(),
            query: query.to_string(),
            timestamp_ms,
            nonce,
            request_id,
            signature,
            api_key: self.credentials.api_key.clone(),
            org_id: self.credentials.org_id.clone(),
        }
    }

    /// Canonical message bytes covered by the signature.
    pub fn message(
        &self,
        timestamp_ms: &str,
        nonce: &str,
        method: &str,
        path: &str,
        query: &str,
    ) -> Vec<u8> {
        let parts: [&str; 9] = [
            &self.credentials.api_key,
            timestamp_ms,
            nonce,
            "",
            &self.credentials.org_id,
            "",
            method,
            path,
            query,
        ];

        let mut message = Vec::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                message.push(0);
            }
            message.extend_from_slice(part.as_bytes());
        }
        message
    }

    fn hmac_hex(&self, message: &[u8]) -> String {
        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(message);
        hex::encode(mac.finalize().into_bytes())
    }
}
