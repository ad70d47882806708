use async_trait::async_trait;
use lookout_core::{ChangedFiles, LookoutError, PullRequest, RunContext};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes a URI path segment cannot carry verbatim. Label names routinely
/// contain spaces ("help wanted"), which would otherwise make the route an
/// invalid URI.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// The hosting-API operations the review run consumes.
///
/// One production implementation ([`GithubClient`]); the orchestrator tests
/// run against a recording fake.
#[async_trait]
pub trait ReviewHost: Send + Sync {
    /// Fetch the pull request this run targets.
    async fn get_pull_request(&self) -> Result<PullRequest, LookoutError>;

    /// Compare `base...head` and return the changed files and commit range.
    async fn compare_commits(&self, base: &str, head: &str)
        -> Result<ChangedFiles, LookoutError>;

    /// Create one inline review comment on the new side of the diff.
    async fn create_review_comment(
        &self,
        commit_id: &str,
        path: &str,
        line: u32,
        body: &str,
    ) -> Result<(), LookoutError>;

    /// Remove a label from the pull request.
    async fn remove_label(&self, name: &str) -> Result<(), LookoutError>;

    /// Submit an approving review for `commit_id` with the given body.
    async fn approve(&self, commit_id: &str, body: &str) -> Result<(), LookoutError>;
}

/// GitHub client for one pull request, built on octocrab raw routes.
///
/// # Examples
///
/// ```no_run
/// use lookout_core::RunContext;
/// use lookout_review::github::GithubClient;
///
/// let context = RunContext {
///     owner: "octocat".into(),
///     repo: "hello-world".into(),
///     pull_number: 42,
/// };
/// let client = GithubClient::new("ghp_xxxx", context).unwrap();
/// ```
pub struct GithubClient {
    octocrab: octocrab::Octocrab,
    context: RunContext,
}

impl GithubClient {
    /// Create a client from a token and run context.
    ///
    /// # Errors
    ///
    /// Returns [`LookoutError::Github`] if the client cannot be built.
    pub fn new(token: &str, context: RunContext) -> Result<Self, LookoutError> {
        let octocrab = octocrab::Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map_err(|e| LookoutError::Github(format!("failed to create GitHub client: {e}")))?;
        Ok(Self { octocrab, context })
    }
}

#[async_trait]
impl ReviewHost for GithubClient {
    async fn get_pull_request(&self) -> Result<PullRequest, LookoutError> {
        let RunContext {
            owner,
            repo,
            pull_number,
        } = &self.context;
        let route = format!("/repos/{owner}/{repo}/pulls/{pull_number}");
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| LookoutError::Github(format!("failed to fetch pull request: {e}")))
    }

    async fn compare_commits(
        &self,
        base: &str,
        head: &str,
    ) -> Result<ChangedFiles, LookoutError> {
        let RunContext { owner, repo, .. } = &self.context;
        let route = format!("/repos/{owner}/{repo}/compare/{base}...{head}");
        self.octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| LookoutError::Github(format!("failed to compare commits: {e}")))
    }

    async fn create_review_comment(
        &self,
        commit_id: &str,
        path: &str,
        line: u32,
        body: &str,
    ) -> Result<(), LookoutError> {
        let RunContext {
            owner,
            repo,
            pull_number,
        } = &self.context;
        let route = format!("/repos/{owner}/{repo}/pulls/{pull_number}/comments");
        let payload = serde_json::json!({
            "commit_id": commit_id,
            "path": path,
            "line": line,
            "side": "RIGHT",
            "body": body,
        });
        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| LookoutError::Github(format!("failed to create review comment: {e}")))?;
        Ok(())
    }

    async fn remove_label(&self, name: &str) -> Result<(), LookoutError> {
        let RunContext {
            owner,
            repo,
            pull_number,
        } = &self.context;
        let label = encode_segment(name);
        let route = format!("/repos/{owner}/{repo}/issues/{pull_number}/labels/{label}");
        let _response: serde_json::Value = self
            .octocrab
            .delete(route, None::<&()>)
            .await
            .map_err(|e| LookoutError::Github(format!("failed to remove label '{name}': {e}")))?;
        Ok(())
    }

    async fn approve(&self, commit_id: &str, body: &str) -> Result<(), LookoutError> {
        let RunContext {
            owner,
            repo,
            pull_number,
        } = &self.context;
        let route = format!("/repos/{owner}/{repo}/pulls/{pull_number}/reviews");
        let payload = serde_json::json!({
            "commit_id": commit_id,
            "event": "APPROVE",
            "body": body,
        });
        let _response: serde_json::Value = self
            .octocrab
            .post(route, Some(&payload))
            .await
            .map_err(|e| LookoutError::Github(format!("failed to submit approval: {e}")))?;
        Ok(())
    }
}

/// Parse a PR reference string (`owner/repo#number`) into a [`RunContext`].
///
/// Used by the binary's local mode instead of the Actions event payload.
///
/// # Errors
///
/// Returns [`LookoutError::Config`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use lookout_review::github::parse_pr_reference;
///
/// let ctx = parse_pr_reference("octocat/hello-world#42").unwrap();
/// assert_eq!(ctx.owner, "octocat");
/// assert_eq!(ctx.repo, "hello-world");
/// assert_eq!(ctx.pull_number, 42);
/// ```
pub fn parse_pr_reference(pr_ref: &str) -> Result<RunContext, LookoutError> {
    let Some((owner_repo, number_str)) = pr_ref.split_once('#') else {
        return Err(LookoutError::Config(format!(
            "invalid PR reference '{pr_ref}', expected owner/repo#number"
        )));
    };
    let Some((owner, repo)) = owner_repo.split_once('/') else {
        return Err(LookoutError::Config(format!(
            "invalid PR reference '{pr_ref}', expected owner/repo#number"
        )));
    };
    let pull_number: u64 = number_str
        .parse()
        .map_err(|_| LookoutError::Config(format!("invalid PR number: {number_str}")))?;
    Ok(RunContext {
        owner: owner.to_string(),
        repo: repo.to_string(),
        pull_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_pr_reference() {
        let ctx = parse_pr_reference("rust-lang/rust#12345").unwrap();
        assert_eq!(ctx.owner, "rust-lang");
        assert_eq!(ctx.repo, "rust");
        assert_eq!(ctx.pull_number, 12345);
    }

    #[test]
    fn parse_pr_reference_missing_hash() {
        assert!(parse_pr_reference("owner/repo").is_err());
    }

    #[test]
    fn parse_pr_reference_missing_slash() {
        assert!(parse_pr_reference("repo#123").is_err());
    }

    #[test]
    fn parse_pr_reference_invalid_number() {
        assert!(parse_pr_reference("owner/repo#abc").is_err());
    }

    #[test]
    fn label_segment_escapes_spaces() {
        assert_eq!(encode_segment("help wanted"), "help%20wanted");
    }

    #[test]
    fn label_segment_escapes_uri_specials() {
        assert_eq!(encode_segment("50% done"), "50%25%20done");
        assert_eq!(encode_segment("a/b?c"), "a%2Fb%3Fc");
    }

    #[test]
    fn plain_label_segment_is_unchanged() {
        assert_eq!(encode_segment("ai-review"), "ai-review");
    }
}
