//! Gitee API v5 response schemas.
//!
//! Only the fields we map into output shapes are declared; everything else
//! stays reachable through the raw `source` value kept alongside.
//!
//! API docs: https://gitee.com/api/v5/swagger

use serde::Deserialize;

/// Element of `GET /user/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeRepo {
    pub id: u64,
    /// Display name. The URL segment is `path`.
    pub name: String,
    /// "owner/repo".
    pub full_name: String,
    pub html_url: String,
}

/// Element of `GET /repos/{owner}/{repo}/branches`.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeBranch {
    pub name: String,
    pub commit: GiteeBranchCommit,
}

/// Head commit reference inside a branch listing.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeBranchCommit {
    pub sha: String,
}

/// Body of `GET /repos/{owner}/{repo}/branches/{branch}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeBranchDetail {
    pub name: String,
    pub commit: GiteeCommitRef,
}

/// Head commit of a single-branch response.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeCommitRef {
    pub sha: String,
    pub commit: GiteeCommitBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GiteeCommitBody {
    #[serde(default)]
    pub message: String,
}

/// Body of `GET /repos/{owner}/{repo}/releases/tags/{tag}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeRelease {
    pub tag_name: String,
    /// Commit SHA (or branch name, for releases cut from a branch) the tag
    /// points at.
    pub target_commitish: String,
}

/// Element of `GET /repos/{owner}/{repo}/hooks` and body of the single-hook
/// endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GiteeHook {
    pub id: u64,
    pub url: String,
}
