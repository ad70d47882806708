use std::path::Path;

use crate::error::LookoutError;

/// Identifies the repository and pull request this run operates on.
///
/// On the Actions runner the owner/repo pair comes from `GITHUB_REPOSITORY`
/// and the pull request number from the webhook payload the runner writes
/// to `GITHUB_EVENT_PATH`. The number lives under `pull_request.number` for
/// `pull_request` events and under `issue.number` for comment-triggered
/// events.
///
/// # Examples
///
/// ```
/// use lookout_core::RunContext;
///
/// let ctx = RunContext::from_payload(
///     "octocat/hello-world",
///     r#"{"pull_request": {"number": 42}}"#,
/// ).unwrap();
/// assert_eq!(ctx.owner, "octocat");
/// assert_eq!(ctx.pull_number, 42);
/// ```
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Pull request number.
    pub pull_number: u64,
}

impl RunContext {
    /// Build the context from the Actions runner environment.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if `GITHUB_REPOSITORY` or
    /// `GITHUB_EVENT_PATH` is unset or the payload carries no PR number,
    /// and [`LookoutError::Io`] if the event file cannot be read.
    pub fn from_env() -> Result<Self, LookoutError> {
        let repository = std::env::var("GITHUB_REPOSITORY")
            .map_err(|_| LookoutError::Config("GITHUB_REPOSITORY not set".into()))?;
        let event_path = std::env::var("GITHUB_EVENT_PATH")
            .map_err(|_| LookoutError::Config("GITHUB_EVENT_PATH not set".into()))?;
        Self::from_event_file(&repository, Path::new(&event_path))
    }

    /// Build the context from a repository slug and an event payload file.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Io`] if the file cannot be read, plus the
    /// errors of [`RunContext::from_payload`].
    pub fn from_event_file(repository: &str, path: &Path) -> Result<Self, LookoutError> {
        let payload = std::fs::read_to_string(path)?;
        Self::from_payload(repository, &payload)
    }

    /// Build the context from a repository slug and a raw event payload.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Config`] if the slug is not `owner/repo` or
    /// the payload has neither `pull_request.number` nor `issue.number`,
    /// and [`LookoutError::Serialization`] if the payload is not JSON.
    pub fn from_payload(repository: &str, payload: &str) -> Result<Self, LookoutError> {
        let (owner, repo) = repository.split_once('/').ok_or_else(|| {
            LookoutError::Config(format!(
                "invalid repository '{repository}', expected owner/repo"
            ))
        })?;

        let event: serde_json::Value = serde_json::from_str(payload)?;
        let pull_number = event
            .pointer("/pull_request/number")
            .or_else(|| event.pointer("/issue/number"))
            .and_then(|n| n.as_u64())
            .ok_or_else(|| {
                LookoutError::Config("event payload has no pull request number".into())
            })?;

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pull_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn payload_with_pull_request_number() {
        let ctx =
            RunContext::from_payload("octo/repo", r#"{"pull_request": {"number": 9}}"#).unwrap();
        assert_eq!(ctx.owner, "octo");
        assert_eq!(ctx.repo, "repo");
        assert_eq!(ctx.pull_number, 9);
    }

    #[test]
    fn payload_falls_back_to_issue_number() {
        let ctx = RunContext::from_payload("octo/repo", r#"{"issue": {"number": 3}}"#).unwrap();
        assert_eq!(ctx.pull_number, 3);
    }

    #[test]
    fn payload_without_number_is_config_error() {
        let result = RunContext::from_payload("octo/repo", r#"{"action": "labeled"}"#);
        assert!(matches!(result, Err(LookoutError::Config(_))));
    }

    #[test]
    fn invalid_payload_is_serialization_error() {
        let result = RunContext::from_payload("octo/repo", "not json");
        assert!(matches!(result, Err(LookoutError::Serialization(_))));
    }

    #[test]
    fn invalid_repository_slug_is_config_error() {
        let result = RunContext::from_payload("octorepo", r#"{"issue": {"number": 3}}"#);
        assert!(matches!(result, Err(LookoutError::Config(_))));
    }

    #[test]
    fn reads_event_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"pull_request": {{"number": 17}}}}"#).unwrap();

        let ctx = RunContext::from_event_file("octo/repo", file.path()).unwrap();
        assert_eq!(ctx.pull_number, 17);
    }

    #[test]
    fn missing_event_file_is_io_error() {
        let result = RunContext::from_event_file("octo/repo", Path::new("/nonexistent/event"));
        assert!(matches!(result, Err(LookoutError::Io(_))));
    }
}
