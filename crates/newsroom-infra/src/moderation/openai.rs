//! OpenAI moderation API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use newsroom_core::ports::{ContentModerator, ModerationError};

pub const DEFAULT_MODERATION_ENDPOINT: &str = "https://api.openai.com/v1/moderations";

/// Moderation client settings, passed in at construction.
#[derive(Debug, Clone)]
pub struct ModerationConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl ModerationConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_MODERATION_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct ModerationRequest<'a> {
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModerationResponse {
    #[serde(default)]
    results: Vec<ModerationResult>,
    error: Option<UpstreamError>,
}

#[derive(Debug, Deserialize)]
struct ModerationResult {
    flagged: bool,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
}

/// Calls the OpenAI moderation endpoint with a bearer key.
pub struct OpenAiModerationClient {
    config: ModerationConfig,
    client: reqwest::Client,
}

impl OpenAiModerationClient {
    pub fn new(config: ModerationConfig) -> Result<Self, ModerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ContentModerator for OpenAiModerationClient {
    async fn check_safety(&self, text: &str) -> Result<bool, ModerationError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&ModerationRequest { input: text })
            .send()
            .await
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ModerationError::Transport(e.to_string()))?;

        let parsed: ModerationResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ModerationError::Upstream(format!("{status}: {body}")));
            }
            Err(e) => return Err(ModerationError::MalformedResponse(e.to_string())),
        };

        if let Some(error) = parsed.error {
            tracing::warn!(%status, message = %error.message, "Moderation API returned an error");
            return Err(ModerationError::Upstream(error.message));
        }

        let first = parsed
            .results
            .first()
            .ok_or_else(|| ModerationError::MalformedResponse("empty results".to_string()))?;

        tracing::debug!(flagged = first.flagged, "Moderation check completed");
        Ok(first.flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> OpenAiModerationClient {
        let config = ModerationConfig::new("test-key").with_endpoint(server.url("/v1/moderations"));
        OpenAiModerationClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_flagged_verdict_of_first_result() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/moderations")
                    .header("authorization", "Bearer test-key")
                    .json_body(json!({ "input": "some text" }));
                then.status(200).json_body(json!({
                    "id": "modr-1",
                    "results": [{ "flagged": true }, { "flagged": false }]
                }));
            })
            .await;

        let flagged = client_for(&server).check_safety("some text").await.unwrap();

        assert!(flagged);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/moderations");
                then.status(401).json_body(json!({
                    "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
                }));
            })
            .await;

        let err = client_for(&server).check_safety("text").await.unwrap_err();

        match err {
            ModerationError::Upstream(msg) => assert_eq!(msg, "Incorrect API key provided"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_results_are_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/moderations");
                then.status(200).json_body(json!({ "results": [] }));
            })
            .await;

        let err = client_for(&server).check_safety("text").await.unwrap_err();

        assert!(matches!(err, ModerationError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_failure_keeps_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/moderations");
                then.status(502).body("bad gateway");
            })
            .await;

        let err = client_for(&server).check_safety("text").await.unwrap_err();

        assert!(matches!(err, ModerationError::Upstream(ref msg) if msg.contains("502")));
    }
}
