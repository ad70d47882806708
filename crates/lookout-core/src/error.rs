/// Errors that can occur across the Lookout action.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use lookout_core::LookoutError;
///
/// let err = LookoutError::Config("missing trigger-label input".into());
/// assert!(err.to_string().contains("trigger-label"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum LookoutError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration input.
    #[error("configuration error: {0}")]
    Config(String),

    /// The `ai-provider` input named a backend this build does not know.
    #[error("unsupported AI provider: {0}")]
    UnsupportedProvider(String),

    /// `get_review` was called before the client was initialized.
    #[error("review client not initialized; call initialize() first")]
    UninitializedClient,

    /// The LLM backend request failed (network error, timeout, or non-2xx).
    #[error("provider request error: {0}")]
    ProviderRequest(String),

    /// The LLM returned text that is not valid JSON or does not match the
    /// expected review shape.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// GitHub API operation failure.
    #[error("GitHub error: {0}")]
    Github(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LookoutError {
    /// Returns `true` for errors that are scoped to a single file and must
    /// not abort the rest of the run.
    ///
    /// # Examples
    ///
    /// ```
    /// use lookout_core::LookoutError;
    ///
    /// assert!(LookoutError::ProviderRequest("timeout".into()).is_per_file());
    /// assert!(!LookoutError::Config("missing token".into()).is_per_file());
    /// ```
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            LookoutError::ProviderRequest(_) | LookoutError::MalformedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LookoutError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = LookoutError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn unsupported_provider_names_the_provider() {
        let err = LookoutError::UnsupportedProvider("cohere".into());
        assert!(err.to_string().contains("cohere"));
    }

    #[test]
    fn uninitialized_client_mentions_initialize() {
        let err = LookoutError::UninitializedClient;
        assert!(err.to_string().contains("initialize"));
    }

    #[test]
    fn per_file_classification() {
        assert!(LookoutError::MalformedResponse("not json".into()).is_per_file());
        assert!(!LookoutError::UninitializedClient.is_per_file());
        assert!(!LookoutError::Github("403".into()).is_per_file());
    }
}
