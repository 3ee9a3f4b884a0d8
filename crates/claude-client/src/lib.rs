use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use analysis_core::{AnalysisError, CompletionProvider};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

/// Per-call timeout. The dispatcher issues all protocol calls concurrently,
/// so overall analysis latency is bounded by this, not by the sum.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

/// Client for the Anthropic messages endpoint. Base URL and model name are
/// overridable from the environment to support relay deployments.
#[derive(Clone)]
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ClaudeClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            base_url,
            model,
        }
    }

    /// Build a client from `ANTHROPIC_API_KEY`, `ANTHROPIC_BASE_URL` and
    /// `ANTHROPIC_MODEL`. A missing key is the fatal analysis precondition.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AnalysisError::MissingCredential("ANTHROPIC_API_KEY not set".to_string()))?;
        let base_url = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(api_key, base_url, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for ClaudeClient {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/v1/messages", self.base_url);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalysisError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalysisError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let messages: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        let text = messages
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(AnalysisError::InvalidResponse(
                "completion contained no text blocks".to_string(),
            ));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_requires_api_key() {
        // Runs in its own process env; key may be set by the harness, so only
        // assert the error shape when it is absent.
        std::env::remove_var("ANTHROPIC_API_KEY");

        match ClaudeClient::from_env() {
            Err(AnalysisError::MissingCredential(msg)) => {
                assert!(msg.contains("ANTHROPIC_API_KEY"));
            }
            other => panic!("expected MissingCredential, got {:?}", other.err()),
        }
    }

    #[test]
    fn explicit_construction_keeps_overrides() {
        let client = ClaudeClient::new(
            "test-key".to_string(),
            "http://localhost:9000".to_string(),
            "claude-test".to_string(),
        );

        assert_eq!(client.model(), "claude-test");
        assert_eq!(client.base_url, "http://localhost:9000");
    }
}
