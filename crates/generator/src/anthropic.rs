//! Anthropic Messages API implementation of [`GameGenerator`].

use async_trait::async_trait;
use serde::Deserialize;

use crate::prompt::build_prompt;
use crate::{GameGenerator, GeneratorError};

/// Default API endpoint.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value required by the Messages API.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Token budget for one generated game document.
const MAX_TOKENS: u32 = 4096;

/// HTTP client for the Anthropic Messages API.
pub struct AnthropicGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Minimal view of a Messages API response: the text content blocks.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicGenerator {
    /// Create a generator for the given API key and model.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a generator targeting a non-default endpoint (tests, proxies).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }
}

#[async_trait]
impl GameGenerator for AnthropicGenerator {
    async fn generate(
        &self,
        prompt: &str,
        baseline_html: &str,
        owner_key: &str,
    ) -> Result<String, GeneratorError> {
        let full_prompt = build_prompt(prompt, baseline_html, owner_key);

        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{ "role": "user", "content": full_prompt }],
        });

        tracing::info!(model = %self.model, owner_key, "Requesting game generation");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let message: MessagesResponse = response.json().await?;
        let text = message
            .content
            .into_iter()
            .find_map(|block| block.text)
            .filter(|t| !t.is_empty())
            .ok_or(GeneratorError::Empty)?;

        tracing::debug!(chars = text.len(), "Received generation response");
        Ok(text)
    }
}
