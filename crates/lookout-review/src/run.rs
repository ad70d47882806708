use lookout_core::{
    workflow, ActionConfig, ChangedFiles, FileChange, FileStatus, LookoutError, PullRequest,
    ReviewItem,
};

use crate::client::ReviewClient;
use crate::github::ReviewHost;
use crate::prompt;

/// Body of the approving review submitted on finalize.
pub const APPROVE_BODY: &str = "Automated code review completed by Lookout.";

/// Statistics for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Files whose diff was sent for review and processed to completion.
    pub files_reviewed: usize,
    /// Files skipped because of their change status.
    pub files_skipped: usize,
    /// Files abandoned after a per-file review or posting failure.
    pub files_failed: usize,
    /// Inline comments created.
    pub comments_posted: usize,
    /// Findings dropped by the severity filter.
    pub comments_filtered: usize,
}

/// Outcome of one review run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The pull request was not eligible; nothing was done.
    Skipped,
    /// The run went through review and finalization.
    Completed(RunStats),
}

/// Orchestrates one pull request review run.
///
/// Strictly sequential: one network call in flight at a time, no retries.
/// Per-file failures are logged and skipped; finalization failures are
/// logged and swallowed; anything that fails before the per-file loop
/// aborts the run.
pub struct ReviewRun<'a, H: ReviewHost> {
    host: &'a H,
    reviewer: &'a ReviewClient,
    config: &'a ActionConfig,
}

impl<'a, H: ReviewHost> ReviewRun<'a, H> {
    /// Create a run over an already-configured host and review client.
    pub fn new(host: &'a H, reviewer: &'a ReviewClient, config: &'a ActionConfig) -> Self {
        Self {
            host,
            reviewer,
            config,
        }
    }

    /// Drive the run end to end.
    ///
    /// # Errors
    ///
    /// Returns the underlying error if fetching the pull request or
    /// comparing commits fails. Everything after diff retrieval is
    /// recoverable and only affects the returned stats.
    pub async fn execute(&self) -> Result<RunOutcome, LookoutError> {
        workflow::info("Starting AI-powered pull request review");

        let pr = self.host.get_pull_request().await?;
        if !is_eligible(&pr, &self.config.trigger_label) {
            workflow::info("Pull request does not meet processing criteria, exiting");
            return Ok(RunOutcome::Skipped);
        }

        workflow::info(&format!(
            "Comparing commits {}...{}",
            pr.base.sha, pr.head.sha
        ));
        let changed = self.host.compare_commits(&pr.base.sha, &pr.head.sha).await?;
        workflow::info(&format!("Found {} changed files", changed.files.len()));

        let anchor = anchor_sha(&changed).unwrap_or(&pr.head.sha).to_string();
        let stats = self.process_files(&changed.files, &anchor).await;

        workflow::info("Finalizing pull request");
        self.finalize(&pr.head.sha).await;

        workflow::info("AI review process completed successfully");
        Ok(RunOutcome::Completed(stats))
    }

    async fn process_files(&self, files: &[FileChange], anchor: &str) -> RunStats {
        let mut stats = RunStats::default();

        for file in files {
            if !wants_review(file.status) {
                workflow::info(&format!(
                    "Skipping file {} (status: {:?})",
                    file.filename, file.status
                ));
                stats.files_skipped += 1;
                continue;
            }

            workflow::info(&format!("Processing file: {}", file.filename));
            match self.review_file(file, anchor, &mut stats).await {
                Ok(()) => stats.files_reviewed += 1,
                Err(e) => {
                    workflow::error(&format!("Review for {} failed: {e}", file.filename));
                    stats.files_failed += 1;
                }
            }
        }

        stats
    }

    /// Review one file and post its in-set findings, updating `stats` as
    /// each comment lands so that a mid-file failure keeps everything
    /// already posted in the tally.
    async fn review_file(
        &self,
        file: &FileChange,
        anchor: &str,
        stats: &mut RunStats,
    ) -> Result<(), LookoutError> {
        let patch = file.patch.as_deref().unwrap_or_default();
        let prompt_text = prompt::generate_prompt(patch, &file.filename);

        workflow::info("Requesting AI review");
        let summary = self.reviewer.get_review(&prompt_text).await?;

        if !summary.has_review {
            workflow::info("No review comments to add");
            return Ok(());
        }

        for item in &summary.reviews {
            if !self.config.allows_severity(item.severity) {
                workflow::info(&format!(
                    "Skipping review comment for {} ({}, severity: {})",
                    file.filename, item.category, item.severity
                ));
                stats.comments_filtered += 1;
                continue;
            }

            workflow::info(&format!(
                "Adding review comment for {} ({}, severity: {})",
                file.filename, item.category, item.severity
            ));
            let body = format_comment(item);
            self.host
                .create_review_comment(anchor, &file.filename, item.line_number, &body)
                .await?;
            stats.comments_posted += 1;
        }

        Ok(())
    }

    /// Remove the trigger label and submit the approving review against
    /// the PR's head commit.
    ///
    /// Each step failing is logged and swallowed; a label-removal failure
    /// never prevents the approval attempt.
    async fn finalize(&self, head_sha: &str) {
        workflow::info(&format!("Removing label: {}", self.config.trigger_label));
        if let Err(e) = self.host.remove_label(&self.config.trigger_label).await {
            workflow::error(&format!("Removing trigger label failed: {e}"));
        }

        workflow::info("Approving pull request");
        if let Err(e) = self.host.approve(head_sha, APPROVE_BODY).await {
            workflow::error(&format!("Approving pull request failed: {e}"));
        }
    }
}

/// A pull request is reviewed only when the trigger label is applied and
/// the PR is neither closed nor locked.
///
/// # Examples
///
/// ```
/// use lookout_core::PullRequest;
/// use lookout_review::run::is_eligible;
///
/// let pr: PullRequest = serde_json::from_str(r#"{
///     "number": 1, "state": "open", "locked": false,
///     "labels": [{"name": "ai-review"}],
///     "base": {"sha": "a"}, "head": {"sha": "b"}
/// }"#).unwrap();
/// assert!(is_eligible(&pr, "ai-review"));
/// assert!(!is_eligible(&pr, "other-label"));
/// ```
pub fn is_eligible(pr: &PullRequest, trigger_label: &str) -> bool {
    pr.has_label(trigger_label) && !pr.is_closed() && !pr.locked
}

/// Only added and modified files carry a reviewable right-hand side.
pub fn wants_review(status: FileStatus) -> bool {
    matches!(status, FileStatus::Added | FileStatus::Modified)
}

/// Commit every inline comment is anchored to: the last commit of the
/// compared range. Multi-commit ranges could in principle anchor each
/// comment to the commit that last touched its line, but the compare
/// endpoint returns no per-line attribution, so the head of the range is
/// the policy.
pub fn anchor_sha(changed: &ChangedFiles) -> Option<&str> {
    changed.commits.last().map(|c| c.sha.as_str())
}

/// Render the comment body for one finding: a category/severity table, the
/// explanation, and an optional fenced code suggestion.
///
/// # Examples
///
/// ```
/// use lookout_core::{Category, ReviewItem, Severity};
/// use lookout_review::run::format_comment;
///
/// let item = ReviewItem {
///     comment: "Unchecked index".into(),
///     suggestion: Some("items.get(i)".into()),
///     line_number: 8,
///     language: "rust".into(),
///     severity: Severity::High,
///     category: Category::Bug,
/// };
/// let body = format_comment(&item);
/// assert!(body.contains("| BUG | high |"));
/// assert!(body.contains("```rust"));
/// ```
pub fn format_comment(item: &ReviewItem) -> String {
    let mut body = format!(
        "| Category | Severity |\n| -------- | -------- |\n| {} | {} |\n\n{}\n",
        item.category.to_string().to_uppercase(),
        item.severity,
        item.comment,
    );
    if let Some(suggestion) = &item.suggestion {
        body.push_str(&format!(
            "\nSuggestion:\n```{}\n{}\n```\n",
            item.language, suggestion
        ));
    }
    body
}
