use async_trait::async_trait;
use lookout_core::{ActionConfig, LookoutError, ReviewSummary};

use crate::anthropic::AnthropicProvider;
use crate::openai::OpenAiProvider;

/// An LLM backend capable of reviewing a diff prompt.
///
/// One implementation per provider; the orchestrator only ever talks to
/// this trait. Implementations send the prompt to their chat/completion
/// endpoint and parse the text body into a [`ReviewSummary`].
#[async_trait]
pub trait ReviewProvider: Send + Sync {
    /// Stable provider name matching the `ai-provider` input value.
    fn name(&self) -> &'static str;

    /// Request a review for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::ProviderRequest`] on network or API failure
    /// and [`LookoutError::MalformedResponse`] when the payload is not a
    /// valid review.
    async fn get_review(&self, prompt: &str) -> Result<ReviewSummary, LookoutError>;
}

/// Construct the backend selected by `name`, pulling its credential from
/// the action configuration.
///
/// # Errors
///
/// Returns [`LookoutError::UnsupportedProvider`] for an unknown name and
/// [`LookoutError::Config`] when the selected backend's API key input is
/// missing.
///
/// # Examples
///
/// ```
/// use lookout_core::{ActionConfig, LookoutError, Severity};
/// use lookout_review::provider::create_provider;
///
/// let config = ActionConfig {
///     github_token: "ghp_x".into(),
///     provider: "anthropic".into(),
///     anthropic_api_key: Some("sk-ant".into()),
///     openai_api_key: None,
///     trigger_label: "ai-review".into(),
///     severities: vec![Severity::High],
/// };
/// let provider = create_provider("anthropic", &config).unwrap();
/// assert_eq!(provider.name(), "anthropic");
///
/// let err = create_provider("cohere", &config).err().unwrap();
/// assert!(matches!(err, LookoutError::UnsupportedProvider(_)));
/// ```
pub fn create_provider(
    name: &str,
    config: &ActionConfig,
) -> Result<Box<dyn ReviewProvider>, LookoutError> {
    match name {
        "anthropic" => {
            let api_key = config.anthropic_api_key.as_deref().ok_or_else(|| {
                LookoutError::Config(
                    "required input 'anthropic-api-key' is not set for provider 'anthropic'".into(),
                )
            })?;
            Ok(Box::new(AnthropicProvider::new(api_key)?))
        }
        "openai" => {
            let api_key = config.openai_api_key.as_deref().ok_or_else(|| {
                LookoutError::Config(
                    "required input 'openai-api-key' is not set for provider 'openai'".into(),
                )
            })?;
            Ok(Box::new(OpenAiProvider::new(api_key)?))
        }
        other => Err(LookoutError::UnsupportedProvider(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::Severity;

    fn config_with_keys(anthropic: Option<&str>, openai: Option<&str>) -> ActionConfig {
        ActionConfig {
            github_token: "ghp_x".into(),
            provider: "anthropic".into(),
            anthropic_api_key: anthropic.map(String::from),
            openai_api_key: openai.map(String::from),
            trigger_label: "ai-review".into(),
            severities: vec![Severity::High],
        }
    }

    // `create_provider`'s Ok type is a trait object without Debug, so these
    // tests go through `.err()` instead of `unwrap_err`.

    #[test]
    fn unknown_provider_is_unsupported() {
        let config = config_with_keys(Some("k"), Some("k"));
        match create_provider("gemini", &config).err() {
            Some(LookoutError::UnsupportedProvider(name)) => assert_eq!(name, "gemini"),
            Some(other) => panic!("expected UnsupportedProvider, got {other:?}"),
            None => panic!("expected UnsupportedProvider, got a provider"),
        }
    }

    #[test]
    fn anthropic_requires_its_key() {
        let config = config_with_keys(None, Some("sk-openai"));
        let err = create_provider("anthropic", &config).err();
        assert!(matches!(err, Some(LookoutError::Config(_))));
    }

    #[test]
    fn openai_requires_its_key() {
        let config = config_with_keys(Some("sk-ant"), None);
        let err = create_provider("openai", &config).err();
        assert!(matches!(err, Some(LookoutError::Config(_))));
    }

    #[test]
    fn known_providers_report_their_names() {
        let config = config_with_keys(Some("sk-ant"), Some("sk-openai"));
        assert_eq!(create_provider("anthropic", &config).unwrap().name(), "anthropic");
        assert_eq!(create_provider("openai", &config).unwrap().name(), "openai");
    }
}
