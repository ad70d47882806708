use std::time::Duration;

use async_trait::async_trait;
use lookout_core::{LookoutError, ReviewSummary};

use crate::prompt;
use crate::provider::ReviewProvider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const MODEL: &str = "gpt-4";

/// Review backend for the OpenAI chat completions API.
///
/// # Examples
///
/// ```
/// use lookout_review::openai::OpenAiProvider;
///
/// let provider = OpenAiProvider::new("sk-xxxx").unwrap();
/// ```
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
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
impl ReviewProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn get_review(&self, prompt: &str) -> Result<ReviewSummary, LookoutError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = serde_json::json!({
            "model": MODEL,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.1,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LookoutError::ProviderRequest(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(LookoutError::ProviderRequest(format!(
                "OpenAI API error {status}: {body_text}"
            )));
        }

        let response_body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LookoutError::ProviderRequest(format!("failed to read response: {e}")))?;

        let text = response_body
            .pointer("/choices/0/message/content")
            .and_then(|t| t.as_str())
            .ok_or_else(|| {
                LookoutError::MalformedResponse(format!(
                    "unexpected response structure: {response_body}"
                ))
            })?;

        prompt::parse_review_response(text)
    }
}
