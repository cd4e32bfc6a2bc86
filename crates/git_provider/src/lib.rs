//! git_provider - thin clients for Git hosting platforms.
//!
//! This library maps repository, branch, ref and webhook operations onto a
//! platform's REST API behind the [`GitProvider`] trait. Gitee is the one
//! platform implemented today. It also ships a small helper that prepares a
//! local git repository with a commit identity.
//!
//! # Features
//!
//! - `gitee` (default) - The Gitee client and the reqwest-backed transport.
//!
//! # Example
//!
//! ```ignore
//! use git_provider::{GitProvider, RepoLocator};
//! use git_provider::gitee::GiteeClient;
//!
//! let client = GiteeClient::new("https://gitee.com", "token")?;
//! for branch in client.list_branches(&RepoLocator::new("acme", "widgets")).await? {
//!     println!("{} {}", branch.name, branch.sha);
//! }
//! ```

pub mod git_config;
pub mod http;
pub mod pagination;
pub mod provider;

#[cfg(feature = "gitee")]
pub mod gitee;

pub use git_config::{GitConfigError, GitConfigOptions, init_git_config};
pub use pagination::{PAGE_SIZE, fetch_all_pages};
pub use provider::{
    Branch, Commit, CreatedWebhook, GitProvider, HookLocator, ProviderConfig, ProviderError,
    RefKind, RefLocator, RepoLocator, Repository, Webhook, WebhookParams,
};
