use std::time::Duration;

use async_trait::async_trait;
use lookout_core::{LookoutError, ReviewSummary};

use crate::prompt::{self, SYSTEM_PROMPT};
use crate::provider::ReviewProvider;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MODEL: &str = "claude-3-5-sonnet-20240620";
const MAX_TOKENS: u32 = 1024;

/// Review backend for the Anthropic Messages API.
///
/// # Examples
///
/// ```
/// use lookout_review::anthropic::AnthropicProvider;
///
/// let provider = AnthropicProvider::new("sk-ant-xxxx").unwrap();
/// ```
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicProvider {
    /// Create a provider from an API key.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::ProviderRequest`] if the HTTP client cannot
    /// be built.
    pub fn new(api_key: &str) -> Result<Self, LookoutError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                LookoutError::ProviderRequest(format!("failed to create HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

#[async_trait]
impl ReviewProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn get_review(&self, prompt: &str) -> Result<ReviewSummary, LookoutError> {
        let url = format!("{}/v1/messages", self.base_url);

        let body = serde_json::json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "system": SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LookoutError::ProviderRequest(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(LookoutError::ProviderRequest(format!(
                "Anthropic API error {status}: {body_text}"
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LookoutError::ProviderRequest(format!("failed to read response: {e}")))?;

        let text = response_body
            .pointer("/content/0/text")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                LookoutError::MalformedResponse(format!(
                    "unexpected response structure: {response_body}"
                ))
            })?;

        prompt::parse_review_response(text)
    }
}
