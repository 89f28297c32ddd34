use crate::domain::errors::FetchError;
use crate::domain::ports::NiceHashApi;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
enum MockResponse {
    Json(Value),
    Status { status: u16, body: String },
}

/// In-memory NiceHash API keyed by path. Unknown paths answer 404.
#[derive(Clone, Default)]
pub struct MockNiceHashApi {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockNiceHashApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, path: &str, body: Value) -> Self {
        self.insert(path, MockResponse::Json(body));
        self
    }

    pub fn with_status(self, path: &str, status: u16, body: &str) -> Self {
        self.insert(
            path,
            MockResponse::Status {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// `(path, query)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn insert(&self, path: &str, response: MockResponse) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(path.to_string(), response);
        }
    }
}

#[async_trait]
impl NiceHashApi for MockNiceHashApi {
    async fn get(&self, path: &str, query: &str) -> Result<Value, FetchError> {
        info!("MockNiceHashApi: GET {}?{}", path, query);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((path.to_string(), query.to_string()));
        }

        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|responses| responses.get(path).cloned());

        match response {
            Some(MockResponse::Json(body)) => Ok(body),
            Some(MockResponse::Status { status, body }) => Err(FetchError::Status { status, body }),
            None => Err(FetchError::Status {
                status: 404,
                body: format!("no mock response for {}", path),
            }),
        }
    }
}
