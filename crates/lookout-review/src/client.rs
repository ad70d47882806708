use lookout_core::{ActionConfig, LookoutError, ReviewSummary};

use crate::provider::{create_provider, ReviewProvider};

/// Handle over the configured LLM backend.
///
/// Constructed once per run and passed by reference; there is no
/// process-wide reviewer state. `get_review` before `initialize` is a
/// usage error, not a panic.
///
/// # Examples
///
/// ```
/// use lookout_review::client::ReviewClient;
///
/// let client = ReviewClient::new();
/// assert!(client.provider_name().is_none());
/// ```
#[derive(Default)]
pub struct ReviewClient {
    provider: Option<Box<dyn ReviewProvider>>,
}

impl ReviewClient {
    /// Create an uninitialized client.
    pub fn new() -> Self {
        Self { provider: None }
    }

    /// Create a client around an already-built backend.
    ///
    /// Used by the orchestrator tests to inject scripted providers.
    pub fn from_provider(provider: Box<dyn ReviewProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Select and configure the backend named by `provider_name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::UnsupportedProvider`] for an unknown name
    /// and [`LookoutError::Config`] when the backend's credential input is
    /// missing.
    pub fn initialize(
        &mut self,
        provider_name: &str,
        config: &ActionConfig,
    ) -> Result<(), LookoutError> {
        self.provider = Some(create_provider(provider_name, config)?);
        Ok(())
    }

    /// Name of the configured backend, if any.
    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_deref().map(ReviewProvider::name)
    }

    /// Send `prompt` to the configured backend and return its review.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::UninitializedClient`] if `initialize` has
    /// not been called, plus the backend's request/parse errors.
    pub async fn get_review(&self, prompt: &str) -> Result<ReviewSummary, LookoutError> {
        match &self.provider {
            Some(provider) => provider.get_review(prompt).await,
            None => Err(LookoutError::UninitializedClient),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lookout_core::Severity;

    struct StaticProvider;

    #[async_trait]
    impl ReviewProvider for StaticProvider {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn get_review(&self, _prompt: &str) -> Result<ReviewSummary, LookoutError> {
            Ok(ReviewSummary {
                has_review: false,
                reviews: vec![],
            })
        }
    }

    fn config(provider: &str) -> ActionConfig {
        ActionConfig {
            github_token: "ghp_x".into(),
            provider: provider.into(),
            anthropic_api_key: Some("sk-ant".into()),
            openai_api_key: Some("sk-openai".into()),
            trigger_label: "ai-review".into(),
            severities: vec![Severity::High],
        }
    }

    #[tokio::test]
    async fn get_review_before_initialize_fails() {
        let client = ReviewClient::new();
        let err = client.get_review("anything").await.unwrap_err();
        assert!(matches!(err, LookoutError::UninitializedClient));
    }

    #[test]
    fn initialize_with_unknown_provider_fails() {
        let mut client = ReviewClient::new();
        let err = client.initialize("llama-local", &config("llama-local")).unwrap_err();
        assert!(matches!(err, LookoutError::UnsupportedProvider(_)));
        assert!(client.provider_name().is_none());
    }

    #[test]
    fn initialize_selects_backend() {
        let mut client = ReviewClient::new();
        client.initialize("openai", &config("openai")).unwrap();
        assert_eq!(client.provider_name(), Some("openai"));
    }

    #[tokio::test]
    async fn injected_provider_answers() {
        let client = ReviewClient::from_provider(Box::new(StaticProvider));
        let summary = client.get_review("prompt").await.unwrap();
        assert!(!summary.has_review);
        assert_eq!(client.provider_name(), Some("static"));
    }
}
