//! HTTP client for the homework status endpoint.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::debug;

use super::HomeworkError;
use crate::config::{Credentials, PollerSettings};

/// Source of raw homework status responses.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches statuses updated since `from_date` (Unix seconds).
    async fn fetch_status(&self, from_date: i64) -> Result<Value, HomeworkError>;
}

/// Client for the homework status API.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    auth_header: String,
}

impl PracticumClient {
    /// Creates a client for `endpoint` authorized with `token`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            auth_header: format!("OAuth {token}"),
        }
    }

    /// Creates a client from loaded configuration.
    #[must_use]
    pub fn from_config(credentials: &Credentials, settings: &PollerSettings) -> Self {
        Self::new(settings.endpoint.clone(), &credentials.practicum_token)
    }

    /// Endpoint this client polls.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    async fn fetch_status(&self, from_date: i64) -> Result<Value, HomeworkError> {
        debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| HomeworkError::ApiUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HomeworkError::ApiUnavailable(format!(
                "endpoint {} returned {status}",
                self.endpoint
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| HomeworkError::ApiUnavailable(format!("failed to read body: {e}")))?;

        Ok(serde_json::from_str(&body)?)
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve_once;

    #[test]
    fn test_from_config_uses_endpoint_override() {
        let credentials =
            Credentials::new("token".to_owned(), "bot".to_owned(), "1".to_owned());
        let settings = PollerSettings {
            endpoint: "http://127.0.0.1:9/statuses".to_owned(),
            ..PollerSettings::default()
        };

        let client = PracticumClient::from_config(&credentials, &settings);
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/statuses");
        assert_eq!(client.auth_header, "OAuth token");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = PracticumClient::new("http://localhost/", "secret");
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_api_unavailable() {
        // Port 9 (discard) on localhost is closed on test machines.
        let client = PracticumClient::new("http://127.0.0.1:9/statuses", "token");
        let result = client.fetch_status(0).await;
        assert!(matches!(result, Err(HomeworkError::ApiUnavailable(_))));
    }

    #[tokio::test]
    async fn test_request_carries_cursor_and_oauth_header() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"homeworks": [], "current_date": 78}"#).await;
        let client = PracticumClient::new(format!("{base_url}/statuses"), "tok");

        let body = client.fetch_status(77).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(body["current_date"], 78);
        assert!(request.starts_with("GET /statuses?from_date=77 "), "{request}");
        assert!(request.contains("authorization: OAuth tok\r\n"), "{request}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_unavailable() {
        let (base_url, server) = serve_once("503 Service Unavailable", "{}").await;
        let client = PracticumClient::new(format!("{base_url}/statuses"), "tok");

        let result = client.fetch_status(77).await;
        server.await.unwrap();

        match result {
            Err(HomeworkError::ApiUnavailable(message)) => assert!(message.contains("503")),
            other => panic!("expected ApiUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve_once("200 OK", "{not json").await;
        let client = PracticumClient::new(format!("{base_url}/statuses"), "tok");

        let result = client.fetch_status(77).await;
        server.await.unwrap();

        assert!(matches!(result, Err(HomeworkError::Decode(_))), "{result:?}");
    }
}
