//! Review orchestration for the Lookout action.
//!
//! Provides the pieces the binary wires together: prompt construction,
//! the provider trait with its Anthropic/OpenAI backends, the review
//! client, the GitHub host client, and the run orchestrator.

pub mod anthropic;
pub mod client;
pub mod github;
pub mod openai;
pub mod prompt;
pub mod provider;
pub mod run;
