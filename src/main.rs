use clap::Parser;
use miette::Result;

use lookout_core::{workflow, ActionConfig, RunContext};
use lookout_review::client::ReviewClient;
use lookout_review::github::{parse_pr_reference, GithubClient};
use lookout_review::run::{ReviewRun, RunOutcome};

#[derive(Parser)]
#[command(
    name = "lookout",
    version,
    about = "AI pull request reviewer for GitHub Actions",
    long_about = "Lookout reviews a pull request's changed files with an LLM and posts the\n\
                   findings as inline review comments, then removes the trigger label and\n\
                   approves the PR.\n\n\
                   Inside a workflow, configuration comes from the action's inputs\n\
                   (INPUT_* environment variables) and the event payload. Every input can\n\
                   also be passed as a flag for local runs.\n\n\
                   Examples:\n  \
                     lookout                                        Run as an action step\n  \
                     lookout --pr owner/repo#123 \\\n           \
                              --github-token ghp_x --trigger-label ai-review \\\n           \
                              --anthropic-api-key sk-ant-x           Review a PR locally"
)]
struct Cli {
    /// Pull request to review for local runs (format: owner/repo#123)
    #[arg(
        long,
        long_help = "Pull request to review.\n\nFormat: owner/repo#123\nWhen omitted, the repository and PR number come from\nGITHUB_REPOSITORY and the GITHUB_EVENT_PATH payload."
    )]
    pr: Option<String>,

    /// Token for the GitHub API (falls back to the github-token input)
    #[arg(long)]
    github_token: Option<String>,

    /// LLM backend: anthropic or openai (default: anthropic)
    #[arg(long)]
    provider: Option<String>,

    /// Credential for the Anthropic backend
    #[arg(long)]
    anthropic_api_key: Option<String>,

    /// Credential for the OpenAI backend
    #[arg(long)]
    openai_api_key: Option<String>,

    /// Label that gates the review and is removed on finalize
    #[arg(long)]
    trigger_label: Option<String>,

    /// Pipe-delimited severities to post (e.g. "high|medium")
    #[arg(long)]
    severity: Option<String>,
}

impl Cli {
    /// Flag value for a dashed input name, if one was passed.
    fn input(&self, name: &str) -> Option<String> {
        match name {
            "github-token" => self.github_token.clone(),
            "ai-provider" => self.provider.clone(),
            "anthropic-api-key" => self.anthropic_api_key.clone(),
            "openai-api-key" => self.openai_api_key.clone(),
            "trigger-label" => self.trigger_label.clone(),
            "severity" => self.severity.clone(),
            _ => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .build(),
        )
    }))
    .expect("miette handler");
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // CLI flags take precedence over action inputs.
    let config = ActionConfig::resolve(|name| {
        cli.input(name).or_else(|| lookout_core::action_input(name))
    })
    .map_err(fatal)?;

    let context = match &cli.pr {
        Some(pr_ref) => parse_pr_reference(pr_ref).map_err(fatal)?,
        None => RunContext::from_env().map_err(fatal)?,
    };

    workflow::info(&format!(
        "Reviewing {}/{}#{} with provider {}",
        context.owner, context.repo, context.pull_number, config.provider
    ));

    let mut reviewer = ReviewClient::new();
    reviewer
        .initialize(&config.provider, &config)
        .map_err(fatal)?;

    let github = GithubClient::new(&config.github_token, context).map_err(fatal)?;

    let run = ReviewRun::new(&github, &reviewer, &config);
    match run.execute().await.map_err(fatal)? {
        RunOutcome::Skipped => {
            workflow::info("Nothing to do for this pull request");
        }
        RunOutcome::Completed(stats) => {
            workflow::info(&format!(
                "Reviewed {} files ({} skipped, {} failed), posted {} comments ({} filtered)",
                stats.files_reviewed,
                stats.files_skipped,
                stats.files_failed,
                stats.comments_posted,
                stats.comments_filtered,
            ));
        }
    }

    Ok(())
}

/// Surface a fatal error as a workflow annotation before the nonzero exit.
fn fatal(err: lookout_core::LookoutError) -> miette::Report {
    workflow::error(&err.to_string());
    miette::miette!("{err}")
}
