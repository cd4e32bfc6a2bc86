//! Conversion of raw Gitee payloads into provider output shapes.
//!
//! Each function parses the typed schema out of the raw value and keeps the
//! raw value as `source`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{GiteeBranch, GiteeBranchDetail, GiteeHook, GiteeRelease, GiteeRepo};
use crate::provider::{Branch, Commit, CreatedWebhook, ProviderError, Repository, Webhook};

fn parse<T: DeserializeOwned>(source: &Value) -> Result<T, ProviderError> {
    T::deserialize(source).map_err(ProviderError::Json)
}

pub fn to_repository(source: Value) -> Result<Repository, ProviderError> {
    let repo: GiteeRepo = parse(&source)?;
    Ok(Repository {
        id: repo.id,
        name: repo.name,
        full_name: repo.full_name,
        url: repo.html_url,
        source,
    })
}

pub fn to_branch(source: Value) -> Result<Branch, ProviderError> {
    let branch: GiteeBranch = parse(&source)?;
    Ok(Branch {
        name: branch.name,
        sha: branch.commit.sha,
        source,
    })
}

/// Commit at the head of a single-branch response.
pub fn branch_to_commit(source: Value) -> Result<Commit, ProviderError> {
    let branch: GiteeBranchDetail = parse(&source)?;
    Ok(Commit {
        sha: branch.commit.sha,
        message: branch.commit.commit.message,
        source,
    })
}

/// Commit a tag points at. The tag name stands in for the message.
pub fn release_to_commit(source: Value) -> Result<Commit, ProviderError> {
    let release: GiteeRelease = parse(&source)?;
    Ok(Commit {
        sha: release.target_commitish,
        message: release.tag_name,
        source,
    })
}

pub fn to_webhook(source: Value) -> Result<Webhook, ProviderError> {
    let hook: GiteeHook = parse(&source)?;
    Ok(Webhook {
        id: hook.id,
        url: hook.url,
        source,
    })
}

pub fn to_created_webhook(source: Value) -> Result<CreatedWebhook, ProviderError> {
    let hook: GiteeHook = parse(&source)?;
    Ok(CreatedWebhook {
        id: hook.id,
        source,
    })
}
