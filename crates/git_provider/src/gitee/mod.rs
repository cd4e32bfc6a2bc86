//! Gitee API client.
//!
//! This module maps the [`GitProvider`](crate::provider::GitProvider)
//! operations onto Gitee's REST API v5 (`https://gitee.com/api/v5`).
//!
//! # Module Structure
//!
//! - [`types`] - Typed response schemas
//! - [`convert`] - Mapping from raw payloads to provider output shapes
//! - [`client`] - Client creation and the `GitProvider` implementation
//!
//! # Example
//!
//! ```ignore
//! use git_provider::gitee::GiteeClient;
//! use git_provider::provider::{GitProvider, RefLocator};
//!
//! let client = GiteeClient::new("https://gitee.com", "token")?;
//! let commit = client
//!     .get_ref_commit(&RefLocator::new("acme", "widgets", "refs/tags/v1.0"))
//!     .await?;
//! println!("{} {}", commit.sha, commit.message);
//! ```

mod client;
mod convert;
mod types;

pub use client::{GITEE_HOST, GiteeClient, create_client};
pub use types::{
    GiteeBranch, GiteeBranchCommit, GiteeBranchDetail, GiteeCommitBody, GiteeCommitRef, GiteeHook,
    GiteeRelease, GiteeRepo,
};
