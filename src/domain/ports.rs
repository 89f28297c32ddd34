use crate::domain::errors::FetchError;
use async_trait::async_trait;
use serde_json::Value;

/// Read-only access to the NiceHash API.
///
/// Implementations sign every call, enforce a finite timeout and hand back
/// the decoded JSON body of a 2xx response.
#[async_trait]
pub trait NiceHashApi: Send + Sync {
    async fn get(&self, path: &str, query: &str) -> Result<Value, FetchError>;
}
