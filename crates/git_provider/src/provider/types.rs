use async_trait::async_trait;
use serde::Serialize;

use super::errors::Result;

/// A repository owned by the authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    /// Platform-specific numeric ID.
    pub id: u64,
    /// Repository name (path segment).
    pub name: String,
    /// Full name including owner (e.g., "owner/repo").
    pub full_name: String,
    /// Web URL of the repository.
    pub url: String,
    /// Unmodified response element.
    pub source: serde_json::Value,
}

/// A branch and the commit at its head.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    pub name: String,
    /// Head commit SHA.
    pub sha: String,
    /// Unmodified response element.
    pub source: serde_json::Value,
}

/// The commit a ref points at.
///
/// For a branch `message` is the head commit message. For a tag it is the
/// tag name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    /// Unmodified response body.
    pub source: serde_json::Value,
}

/// A registered webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Webhook {
    pub id: u64,
    /// Callback URL.
    pub url: String,
    /// Unmodified response element.
    pub source: serde_json::Value,
}

/// Result of creating a webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedWebhook {
    /// ID assigned by the platform.
    pub id: u64,
    /// Unmodified response body.
    pub source: serde_json::Value,
}

/// Identifies a repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub repo: String,
}

impl RepoLocator {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A ref inside a repository: `refs/heads/...`, `refs/tags/...` or a bare
/// branch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefLocator {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
}

impl RefLocator {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            git_ref: git_ref.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> RefKind {
        RefKind::parse(&self.git_ref)
    }
}

const TAG_PREFIX: &str = "refs/tags/";
const BRANCH_PREFIX: &str = "refs/heads/";

/// What a ref names once its prefix is understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    /// `refs/tags/<name>`.
    Tag(String),
    /// `refs/heads/<name>`, or anything else taken literally as a branch name.
    Branch(String),
}

impl RefKind {
    #[must_use]
    pub fn parse(git_ref: &str) -> Self {
        if let Some(tag) = git_ref.strip_prefix(TAG_PREFIX) {
            return Self::Tag(tag.to_string());
        }
        let branch = git_ref.strip_prefix(BRANCH_PREFIX).unwrap_or(git_ref);
        Self::Branch(branch.to_string())
    }

    /// Tag or branch name without the prefix.
    pub fn name(&self) -> &str {
        match self {
            Self::Tag(name) | Self::Branch(name) => name,
        }
    }
}

/// A webhook inside a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLocator {
    pub owner: String,
    pub repo: String,
    pub hook_id: u64,
}

impl HookLocator {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, hook_id: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            hook_id,
        }
    }
}

/// Settings for creating or updating a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookParams {
    /// Callback URL (absolute http or https).
    pub url: String,
    /// Shared secret sent with each delivery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub push_events: bool,
    pub tag_push_events: bool,
    pub issues_events: bool,
    pub note_events: bool,
    pub merge_requests_events: bool,
}

impl WebhookParams {
    /// Push events only, no secret.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            password: None,
            push_events: true,
            tag_push_events: false,
            issues_events: false,
            note_events: false,
            merge_requests_events: false,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

/// Operations every Git hosting platform client supports.
///
/// Implementors validate parameters before touching the network, paginate
/// list endpoints internally and return errors from the transport as-is.
#[async_trait]
pub trait GitProvider: Send + Sync {
    /// Short platform name used in logs ("gitee").
    fn platform(&self) -> &'static str;

    /// All repositories owned by the authenticated identity.
    async fn list_repos(&self) -> Result<Vec<Repository>>;

    /// All branches of a repository.
    async fn list_branches(&self, repo: &RepoLocator) -> Result<Vec<Branch>>;

    /// Resolve a branch or tag ref to the commit it points at.
    async fn get_ref_commit(&self, git_ref: &RefLocator) -> Result<Commit>;

    /// All webhooks registered on a repository.
    async fn list_webhooks(&self, repo: &RepoLocator) -> Result<Vec<Webhook>>;

    async fn get_webhook(&self, hook: &HookLocator) -> Result<Webhook>;

    async fn create_webhook(
        &self,
        repo: &RepoLocator,
        params: &WebhookParams,
    ) -> Result<CreatedWebhook>;

    /// Returns once the platform confirms the update.
    async fn update_webhook(&self, hook: &HookLocator, params: &WebhookParams) -> Result<()>;

    /// Returns once the platform confirms the deletion.
    async fn delete_webhook(&self, hook: &HookLocator) -> Result<()>;
}
