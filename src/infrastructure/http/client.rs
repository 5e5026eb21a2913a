use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ClientError;
use crate::infrastructure::credentials::CredentialStore;

/// Classified access to the roster backend (for mocking).
///
/// Implementations attach the current bearer credential when one exists and
/// map every response onto the failure taxonomy: 403 becomes `Forbidden`,
/// 404 becomes `NotFound`, and any other non-2xx status or transport fault
/// becomes `Transport`. Callers never see raw status codes, so an
/// authorization denial cannot be mistaken for an outage anywhere above
/// this layer.
#[async_trait]
pub trait ResourceClient: Send + Sync + std::fmt::Debug {
    /// Issue `method` against `path` (relative to the backend base URL),
    /// serializing `body` as JSON when present.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ClientError>;

    /// GET `path` with `query` appended as a URL-encoded query string.
    async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ClientError>;

    async fn get(&self, path: &str) -> Result<serde_json::Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// DELETE carrying a JSON body, as the roster backend expects for
    /// member removal.
    async fn delete_with_body(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ClientError> {
        self.request(Method::DELETE, path, Some(body)).await
    }
}

/// Decode a successful payload into `T`.
///
/// A success response the client cannot decode is as unusable as a failed
/// one and classifies the same way.
pub fn decode<T: DeserializeOwned>(payload: serde_json::Value) -> Result<T, ClientError> {
    serde_json::from_value(payload)
        .map_err(|e| ClientError::transport(format!("Malformed response body: {}", e)))
}

/// Real resource client using reqwest
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    client: reqwest::Client,
    base_url: String,
    credentials: Arc<CredentialStore>,
}

impl HttpResourceClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<CredentialStore>) -> Self {
        Self::with_timeout(base_url, credentials, Duration::from_secs(30))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        credentials: Arc<CredentialStore>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, ClientError> {
        // The credential is read per request: once the store is cleared, no
        // later request may ride on a header captured earlier.
        if let Some(token) = self.credentials.token() {
            request = request.header(AUTHORIZATION, token.to_header_value());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(format!("Request failed: {}", e)))?;

        classify(response).await
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.url(path);
        debug!(%method, %url, "Issuing request");

        let mut request = self.client.request(method, &url);
        if let Some(body) = &body {
            request = request.json(body);
        }
        self.send(request).await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.url(path);
        debug!(%url, "Issuing query request");

        let request = self.client.get(&url).query(query);
        self.send(request).await
    }
}

async fn classify(response: reqwest::Response) -> Result<serde_json::Value, ClientError> {
    let status = response.status();

    if status == StatusCode::FORBIDDEN {
        let message = failure_message(response, "Access to this resource is denied").await;
        return Err(ClientError::forbidden(message));
    }
    if status == StatusCode::NOT_FOUND {
        let message = failure_message(response, "Resource not found").await;
        return Err(ClientError::not_found(message));
    }
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(ClientError::transport(format!(
            "HTTP {}: {}",
            status, error_body
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| ClientError::transport(format!("Failed to read response body: {}", e)))?;

    // Mutation acks may be bodyless; an empty 2xx is still a success.
    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    serde_json::from_str(&text)
        .map_err(|e| ClientError::transport(format!("Malformed response body: {}", e)))
}

/// Pull a human-readable message out of a failure body. Error bodies are
/// usually `{"message": "..."}`; fall back to the raw text, then to a
/// canned message when the body is empty.
async fn failure_message(response: reqwest::Response, fallback: &str) -> String {
    let text = response.text().await.unwrap_or_default();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return fallback.to_string();
    }
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Scripted resource client, keyed by request path.
    ///
    /// Per-path delays make response ordering controllable under a paused
    /// tokio clock, and the request log records the order in which paths
    /// were issued.
    #[derive(Debug)]
    pub struct MockResourceClient {
        responses: RwLock<HashMap<String, serde_json::Value>>,
        errors: RwLock<HashMap<String, ClientError>>,
        delays: RwLock<HashMap<String, Duration>>,
        requests: RwLock<Vec<String>>,
    }

    impl MockResourceClient {
        pub fn new() -> Self {
            Self {
                responses: RwLock::new(HashMap::new()),
                errors: RwLock::new(HashMap::new()),
                delays: RwLock::new(HashMap::new()),
                requests: RwLock::new(Vec::new()),
            }
        }

        pub fn with_response(self, path: impl Into<String>, response: serde_json::Value) -> Self {
            self.responses
                .write()
                .unwrap()
                .insert(path.into(), response);
            self
        }

        pub fn with_error(self, path: impl Into<String>, error: ClientError) -> Self {
            self.errors.write().unwrap().insert(path.into(), error);
            self
        }

        pub fn with_delay(self, path: impl Into<String>, delay: Duration) -> Self {
            self.delays.write().unwrap().insert(path.into(), delay);
            self
        }

        /// Replace whatever is scripted for `path` with a success response.
        pub fn set_response(&self, path: impl Into<String>, response: serde_json::Value) {
            let path = path.into();
            self.errors.write().unwrap().remove(&path);
            self.responses.write().unwrap().insert(path, response);
        }

        /// Replace whatever is scripted for `path` with an error.
        pub fn set_error(&self, path: impl Into<String>, error: ClientError) {
            let path = path.into();
            self.responses.write().unwrap().remove(&path);
            self.errors.write().unwrap().insert(path, error);
        }

        /// Paths issued so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.read().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.read().unwrap().len()
        }

        async fn dispatch(&self, key: &str) -> Result<serde_json::Value, ClientError> {
            self.requests.write().unwrap().push(key.to_string());

            let delay = self.delays.read().unwrap().get(key).copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            if let Some(error) = self.errors.read().unwrap().get(key) {
                return Err(error.clone());
            }

            self.responses
                .read()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or_else(|| ClientError::transport(format!("No mock response for {}", key)))
        }
    }

    impl Default for MockResourceClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl ResourceClient for MockResourceClient {
        async fn request(
            &self,
            _method: Method,
            path: &str,
            _body: Option<serde_json::Value>,
        ) -> Result<serde_json::Value, ClientError> {
            self.dispatch(path).await
        }

        async fn get_with_query(
            &self,
            path: &str,
            query: &[(&str, &str)],
        ) -> Result<serde_json::Value, ClientError> {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let key = format!("{}?{}", path, pairs.join("&"));
            self.dispatch(&key).await
        }
    }
}
