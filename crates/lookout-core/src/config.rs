use crate::error::LookoutError;
use crate::types::Severity;

/// Configuration for one review run, resolved from GitHub Actions inputs.
///
/// The Actions runner exposes each `with:` input as an `INPUT_<NAME>`
/// environment variable with dashes replaced by underscores; `from_env`
/// follows that convention. Resolution order for the binary is CLI flags >
/// action inputs, handled by passing a merged lookup to `resolve`.
///
/// # Examples
///
/// ```
/// use lookout_core::ActionConfig;
///
/// let config = ActionConfig::resolve(|name| match name {
///     "github-token" => Some("ghp_xxx".into()),
///     "trigger-label" => Some("ai-review".into()),
///     _ => None,
/// }).unwrap();
/// assert_eq!(config.provider, "anthropic");
/// ```
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// Token for the GitHub API.
    pub github_token: String,
    /// Selected LLM backend name (default: `"anthropic"`).
    pub provider: String,
    /// Credential for the Anthropic backend, if provided.
    pub anthropic_api_key: Option<String>,
    /// Credential for the OpenAI backend, if provided.
    pub openai_api_key: Option<String>,
    /// Label that gates review execution and is removed on finalize.
    pub trigger_label: String,
    /// Severities that are posted as comments (default: high only).
    pub severities: Vec<Severity>,
}

const DEFAULT_PROVIDER: &str = "anthropic";
const DEFAULT_SEVERITY: &str = "high";

impl ActionConfig {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if a required input is missing or
    /// the severity set cannot be parsed.
    pub fn from_env() -> Result<Self, LookoutError> {
        Self::resolve(action_input)
    }

    /// Resolve configuration through an arbitrary input lookup.
    ///
    /// The lookup receives the dashed input name (e.g. `"github-token"`)
    /// and returns the raw value if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if a required input is missing or
    /// the severity set cannot be parsed.
    pub fn resolve<F>(lookup: F) -> Result<Self, LookoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let github_token = required(&lookup, "github-token")?;
        let provider = lookup("ai-provider").unwrap_or_else(|| DEFAULT_PROVIDER.into());
        let anthropic_api_key = lookup("anthropic-api-key");
        let openai_api_key = lookup("openai-api-key");
        let trigger_label = required(&lookup, "trigger-label")?;
        let severity_raw = lookup("severity").unwrap_or_else(|| DEFAULT_SEVERITY.into());
        let severities = parse_severity_set(&severity_raw)?;

        Ok(Self {
            github_token,
            provider,
            anthropic_api_key,
            openai_api_key,
            trigger_label,
            severities,
        })
    }

    /// Returns `true` if findings of `severity` should be posted.
    pub fn allows_severity(&self, severity: Severity) -> bool {
        self.severities.contains(&severity)
    }
}

fn required<F>(lookup: &F, name: &str) -> Result<String, LookoutError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| LookoutError::Config(format!("required input '{name}' is not set")))
}

/// Read one action input from the environment, `@actions/core` style.
///
/// Empty and whitespace-only values count as unset.
pub fn action_input(name: &str) -> Option<String> {
    let var = format!("INPUT_{}", name.to_uppercase().replace('-', "_"));
    match std::env::var(var) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Parse the pipe-delimited `severity` input (e.g. `"high|medium"`).
///
/// Unknown tokens are a configuration error so a typo fails the run at
/// init instead of silently suppressing every comment.
///
/// # Errors
///
/// Returns [`LookoutError::Config`] on unknown tokens or an empty set.
///
/// # Examples
///
/// ```
/// use lookout_core::{parse_severity_set, Severity};
///
/// let set = parse_severity_set("high|medium").unwrap();
/// assert_eq!(set, vec![Severity::High, Severity::Medium]);
/// ```
pub fn parse_severity_set(raw: &str) -> Result<Vec<Severity>, LookoutError> {
    let mut severities = Vec::new();
    for token in raw.split('|') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let severity: Severity = token
            .parse()
            .map_err(|e: String| LookoutError::Config(format!("invalid severity input: {e}")))?;
        if !severities.contains(&severity) {
            severities.push(severity);
        }
    }
    if severities.is_empty() {
        return Err(LookoutError::Config(
            "severity input resolved to an empty set".into(),
        ));
    }
    Ok(severities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn minimal_inputs_fill_defaults() {
        let config = ActionConfig::resolve(lookup_from(&[
            ("github-token", "ghp_x"),
            ("trigger-label", "ai-review"),
        ]))
        .unwrap();
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.severities, vec![Severity::High]);
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn missing_token_is_config_error() {
        let result = ActionConfig::resolve(lookup_from(&[("trigger-label", "ai-review")]));
        match result {
            Err(LookoutError::Config(msg)) => assert!(msg.contains("github-token")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_trigger_label_is_config_error() {
        let result = ActionConfig::resolve(lookup_from(&[("github-token", "ghp_x")]));
        match result {
            Err(LookoutError::Config(msg)) => assert!(msg.contains("trigger-label")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn full_inputs_are_honored() {
        let config = ActionConfig::resolve(lookup_from(&[
            ("github-token", "ghp_x"),
            ("ai-provider", "openai"),
            ("openai-api-key", "sk-x"),
            ("trigger-label", "review-me"),
            ("severity", "high|medium"),
        ]))
        .unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-x"));
        assert_eq!(config.trigger_label, "review-me");
        assert_eq!(config.severities, vec![Severity::High, Severity::Medium]);
        assert!(config.allows_severity(Severity::Medium));
        assert!(!config.allows_severity(Severity::Low));
    }

    #[test]
    fn severity_set_parses_and_dedupes() {
        let set = parse_severity_set("high|low|high").unwrap();
        assert_eq!(set, vec![Severity::High, Severity::Low]);
    }

    #[test]
    fn severity_set_skips_empty_tokens() {
        let set = parse_severity_set("high|").unwrap();
        assert_eq!(set, vec![Severity::High]);
    }

    #[test]
    fn severity_set_rejects_unknown_token() {
        let result = parse_severity_set("high|hgih");
        assert!(matches!(result, Err(LookoutError::Config(_))));
    }

    #[test]
    fn severity_set_rejects_empty_input() {
        assert!(parse_severity_set("|").is_err());
    }
}
