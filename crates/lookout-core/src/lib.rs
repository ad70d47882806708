//! Core types, configuration, and error handling for the Lookout action.
//!
//! This crate provides the shared foundation used by the review crate and
//! the binary:
//! - [`LookoutError`] — unified error type using `thiserror`
//! - [`ActionConfig`] — configuration resolved from GitHub Actions inputs
//! - [`RunContext`] — repository/PR identity from the runner environment
//! - Shared types: [`Severity`], [`Category`], [`ReviewItem`],
//!   [`ReviewSummary`], [`FileChange`], [`ChangedFiles`], [`PullRequest`]
//! - [`workflow`] — workflow-command logging helpers

mod config;
mod context;
mod error;
mod types;
pub mod workflow;

pub use config::{action_input, parse_severity_set, ActionConfig};
pub use context::RunContext;
pub use error::LookoutError;
pub use types::{
    Category, ChangedFiles, CommitRef, FileChange, FileStatus, GitRef, Label, PullRequest,
    ReviewItem, ReviewSummary, Severity,
};

/// A convenience `Result` type for Lookout operations.
pub type Result<T> = std::result::Result<T, LookoutError>;
