use lookout_core::{LookoutError, ReviewSummary};

/// Maximum findings the model is asked to return for one file.
///
/// Keeping the cap low biases the model toward its highest-impact findings
/// instead of a laundry list.
pub const MAX_REVIEWS_PER_FILE: usize = 2;

/// System-level instruction sent alongside every review request.
pub const SYSTEM_PROMPT: &str = "You are an expert code reviewer and software engineer. \
Your task is to analyze code changes provided by users and offer detailed, constructive feedback.";

/// Build the review prompt for a single file's patch.
///
/// Pure and deterministic: the output embeds `file_name` and `diff` verbatim
/// and always requests the same JSON response shape. An empty diff still
/// produces a prompt; the instructions tell the model to answer
/// `hasReview: false` when there is nothing to review.
///
/// # Examples
///
/// ```
/// use lookout_review::prompt::generate_prompt;
///
/// let prompt = generate_prompt("+let x = 1;", "src/lib.rs");
/// assert!(prompt.contains("src/lib.rs"));
/// assert!(prompt.contains("+let x = 1;"));
/// assert!(prompt.contains("hasReview"));
/// ```
pub fn generate_prompt(diff: &str, file_name: &str) -> String {
    format!(
        r#"Perform a concise code review on the following patch from file "{file_name}".
Identify potential bugs, security risks, and suggest improvements for code quality,
performance, or best practices. Respond in the following JSON format:

{{
  "hasReview": boolean,
  "reviews": [
    {{
      "comment": "Concise explanation of the issue or suggestion",
      "suggestion": "Code suggestion if applicable, otherwise null",
      "lineNumber": number,
      "language": "Programming language of the file",
      "severity": "low|medium|high",
      "category": "bug|security|performance|style|best_practice"
    }}
  ]
}}

Guidelines:
1. Set "hasReview" to false if there is nothing significant to review, including an empty patch.
2. Provide no more than {MAX_REVIEWS_PER_FILE} reviews, prioritizing by severity and impact.
3. Do not include reviews if there is nothing to improve.
4. Make comments clear, specific, and actionable.
5. For suggestions, provide only the changed lines of code.
6. "lineNumber" must refer to a line on the new side of the patch.
7. Ensure the response is a single valid JSON object.
8. Do not include any text outside the JSON structure.

Patch:
{diff}"#
    )
}

/// Parse the model's text payload into a validated [`ReviewSummary`].
///
/// Tolerates a markdown code fence around the JSON, since models add one
/// despite instructions. Anything else that is not a valid `ReviewSummary`
/// is a [`LookoutError::MalformedResponse`], which callers treat as a
/// per-file failure.
///
/// # Examples
///
/// ```
/// use lookout_review::prompt::parse_review_response;
///
/// let summary = parse_review_response(r#"{"hasReview": false, "reviews": []}"#).unwrap();
/// assert!(!summary.has_review);
/// ```
pub fn parse_review_response(response: &str) -> Result<ReviewSummary, LookoutError> {
    let cleaned = strip_code_fences(response);
    serde_json::from_str(cleaned)
        .map_err(|e| LookoutError::MalformedResponse(format!("{e}; payload: {cleaned}")))
}

fn strip_code_fences(s: &str) -> &str {
    let trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
        if let Some(inner) = rest.strip_suffix("```") {
            return inner.trim();
        }
    }
    trimmed
}
