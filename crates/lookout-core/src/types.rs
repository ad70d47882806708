use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a review finding.
///
/// # Examples
///
/// ```
/// use lookout_core::Severity;
///
/// let s: Severity = serde_json::from_str("\"high\"").unwrap();
/// assert_eq!(s, Severity::High);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Minor issue, safe to ignore.
    Low,
    /// Worth fixing but not blocking.
    Medium,
    /// Should be addressed before merging.
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Category of a review finding.
///
/// # Examples
///
/// ```
/// use lookout_core::Category;
///
/// let c: Category = serde_json::from_str("\"best_practice\"").unwrap();
/// assert_eq!(c, Category::BestPractice);
/// assert_eq!(c.to_string(), "best_practice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A likely defect.
    Bug,
    /// A security risk.
    Security,
    /// A performance concern.
    Performance,
    /// A style issue.
    Style,
    /// A deviation from common best practice.
    BestPractice,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Bug => write!(f, "bug"),
            Category::Security => write!(f, "security"),
            Category::Performance => write!(f, "performance"),
            Category::Style => write!(f, "style"),
            Category::BestPractice => write!(f, "best_practice"),
        }
    }
}

/// A single finding produced by the AI reviewer for one file.
///
/// The line number must refer to a line present on the right-hand side of
/// the file's diff, or the downstream comment-creation call fails.
///
/// # Examples
///
/// ```
/// use lookout_core::{Category, ReviewItem, Severity};
///
/// let item: ReviewItem = serde_json::from_str(r#"{
///     "comment": "Possible SQL injection",
///     "suggestion": "Use a parameterized query",
///     "lineNumber": 12,
///     "language": "rust",
///     "severity": "high",
///     "category": "security"
/// }"#).unwrap();
/// assert_eq!(item.severity, Severity::High);
/// assert_eq!(item.category, Category::Security);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItem {
    /// Explanation of the issue or suggestion.
    pub comment: String,
    /// Optional replacement code for the flagged lines.
    #[serde(default)]
    pub suggestion: Option<String>,
    /// Line number on the new side of the diff.
    pub line_number: u32,
    /// Programming language of the file, used to tag the suggestion fence.
    pub language: String,
    /// Severity of the finding.
    pub severity: Severity,
    /// Category of the finding.
    pub category: Category,
}

/// The complete review the model returns for one file.
///
/// Decoded strictly from the model's JSON payload; any shape mismatch is a
/// `MalformedResponse` error upstream.
///
/// # Examples
///
/// ```
/// use lookout_core::ReviewSummary;
///
/// let summary: ReviewSummary = serde_json::from_str(r#"{"hasReview": false}"#).unwrap();
/// assert!(!summary.has_review);
/// assert!(summary.reviews.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    /// Whether the model found anything worth commenting on.
    pub has_review: bool,
    /// Ordered findings, at most the configured per-file cap.
    #[serde(default)]
    pub reviews: Vec<ReviewItem>,
}

/// Status of a changed file as reported by the compare-commits API.
///
/// # Examples
///
/// ```
/// use lookout_core::FileStatus;
///
/// let s: FileStatus = serde_json::from_str("\"modified\"").unwrap();
/// assert_eq!(s, FileStatus::Modified);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// New file.
    Added,
    /// File deleted.
    Removed,
    /// Content changed in place.
    Modified,
    /// File moved or renamed.
    Renamed,
    /// Copied from another file.
    Copied,
    /// Mode or similar non-content change.
    Changed,
    /// Present in the range but identical.
    Unchanged,
    /// Any status this build does not recognize.
    #[serde(other)]
    Unknown,
}

/// One changed file from the compared commit range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the file relative to the repository root.
    pub filename: String,
    /// Change status.
    pub status: FileStatus,
    /// Unified diff text for the file. Absent for binary files and for
    /// very large diffs the API truncates.
    #[serde(default)]
    pub patch: Option<String>,
}

/// A commit in the compared range, reduced to what comment anchoring needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRef {
    /// Full commit SHA.
    pub sha: String,
}

/// The result of comparing the pull request's base and head commits.
///
/// Fetched once per run and read-only afterward.
///
/// # Examples
///
/// ```
/// use lookout_core::ChangedFiles;
///
/// let changed: ChangedFiles = serde_json::from_str(r#"{
///     "files": [{"filename": "src/lib.rs", "status": "modified", "patch": "@@ -1 +1 @@"}],
///     "commits": [{"sha": "abc123"}]
/// }"#).unwrap();
/// assert_eq!(changed.files.len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFiles {
    /// Ordered list of changed files.
    #[serde(default)]
    pub files: Vec<FileChange>,
    /// Ordered list of commits in the range, oldest first.
    #[serde(default)]
    pub commits: Vec<CommitRef>,
}

/// A label attached to a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// A branch pointer on the pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitRef {
    /// Commit SHA the branch points at.
    pub sha: String,
}

/// Pull request metadata, reduced to what eligibility checking and
/// finalization need.
///
/// # Examples
///
/// ```
/// use lookout_core::PullRequest;
///
/// let pr: PullRequest = serde_json::from_str(r#"{
///     "number": 7,
///     "state": "open",
///     "locked": false,
///     "labels": [{"name": "ai-review"}],
///     "base": {"sha": "aaa"},
///     "head": {"sha": "bbb"}
/// }"#).unwrap();
/// assert!(pr.has_label("ai-review"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// `"open"` or `"closed"`.
    pub state: String,
    /// Whether the conversation is locked.
    pub locked: bool,
    /// Labels currently applied.
    #[serde(default)]
    pub labels: Vec<Label>,
    /// Base branch pointer.
    pub base: GitRef,
    /// Head branch pointer.
    pub head: GitRef,
}

impl PullRequest {
    /// Returns `true` if a label with exactly `name` is applied.
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|l| l.name == name)
    }

    /// Returns `true` if the pull request is closed.
    pub fn is_closed(&self) -> bool {
        self.state == "closed"
    }
}
