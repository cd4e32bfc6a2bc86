//! Platform-agnostic trait for Git hosting clients.
//!
//! This module defines the `GitProvider` trait, the output shapes every
//! platform maps its responses into, the shared connection config and the
//! parameter checks that run before any request.
//!
//! # Example
//!
//! ```ignore
//! use git_provider::provider::{GitProvider, RepoLocator};
//!
//! async fn print_branches<P: GitProvider>(client: &P) -> Result<(), ProviderError> {
//!     let branches = client.list_branches(&RepoLocator::new("acme", "widgets")).await?;
//!     for branch in branches {
//!         println!("{} {}", branch.name, branch.sha);
//!     }
//!     Ok(())
//! }
//! ```

mod config;
mod errors;
mod types;
mod validate;

pub use config::ProviderConfig;
pub use errors::{ProviderError, Result, short_error_message};
pub use types::{
    Branch, Commit, CreatedWebhook, GitProvider, HookLocator, RefKind, RefLocator, RepoLocator,
    Repository, Webhook, WebhookParams,
};
pub use validate::{validate_hook, validate_ref, validate_repo, validate_webhook_params};
