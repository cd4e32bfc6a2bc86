//! Gitee API client.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::convert::{
    branch_to_commit, release_to_commit, to_branch, to_created_webhook, to_repository, to_webhook,
};
use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, redact_token};
use crate::pagination::fetch_all_pages;
use crate::provider::{
    Branch, Commit, CreatedWebhook, GitProvider, HookLocator, ProviderConfig, ProviderError,
    RefKind, RefLocator, RepoLocator, Repository, Result, Webhook, WebhookParams, validate_hook,
    validate_ref, validate_repo, validate_webhook_params,
};

/// Default Gitee host.
pub const GITEE_HOST: &str = "https://gitee.com";

/// Versioned API prefix appended to the host.
const API_PREFIX: &str = "api/v5";

const USER_AGENT: &str = "git-provider";

/// Gitee API client.
///
/// Every request carries the access token as the `access_token` query
/// parameter. The client holds no mutable state and is cheap to clone.
#[derive(Clone)]
pub struct GiteeClient {
    transport: Arc<dyn HttpTransport>,
    config: ProviderConfig,
    api_base: reqwest::Url,
}

impl GiteeClient {
    /// Create a new Gitee client backed by reqwest.
    ///
    /// Fails with [`ProviderError::MissingToken`] when `token` is empty.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let client = GiteeClient::new(GITEE_HOST, "token")?;
    /// let repos = client.list_repos().await?;
    /// ```
    pub fn new(host: &str, token: &str) -> Result<Self> {
        let config = ProviderConfig::new(host, token)?;
        let transport = ReqwestTransport::with_timeout(StdDuration::from_secs(30))
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        Self::from_config(config, Arc::new(transport))
    }

    pub fn new_with_transport(
        host: &str,
        token: &str,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        Self::from_config(ProviderConfig::new(host, token)?, transport)
    }

    pub fn from_config(config: ProviderConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let api_base = reqwest::Url::parse(&format!("{}/{}", config.host(), API_PREFIX))
            .map_err(|e| ProviderError::Config(format!("invalid host {}: {}", config.host(), e)))?;
        if api_base.cannot_be_a_base() {
            return Err(ProviderError::Config(format!(
                "invalid host {}: not a base URL",
                config.host()
            )));
        }

        Ok(Self {
            transport,
            config,
            api_base,
        })
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        self.config.host()
    }

    /// Build an API URL from unencoded path segments and query pairs.
    ///
    /// Segments are percent-encoded, so a branch named `feature/x` stays a
    /// single segment.
    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> String {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_token", self.config.token());
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        url.into()
    }

    /// Send a request and fail on any non-2xx status.
    async fn send(&self, method: HttpMethod, url: String, body: Vec<u8>) -> Result<HttpResponse> {
        tracing::debug!(method = method.as_str(), url = %redact_token(&url), "Gitee request");

        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        if !body.is_empty() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };

        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        if !response.is_success() {
            return Err(ProviderError::Api {
                status: response.status,
                message: response.body_text(),
            });
        }

        Ok(response)
    }

    /// Make an authenticated GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let response = self.send(HttpMethod::Get, url, Vec::new()).await?;
        serde_json::from_slice(&response.body).map_err(ProviderError::Json)
    }

    /// Fetch every page of a list endpoint as raw JSON elements.
    async fn get_all_pages(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Vec<Value>> {
        fetch_all_pages(|page, per_page| {
            let mut params = query.to_vec();
            params.push(("page", page.to_string()));
            params.push(("per_page", per_page.to_string()));
            self.get::<Vec<Value>>(self.url(segments, &params))
        })
        .await
    }

    /// URL of a single webhook.
    fn hook_url(&self, hook: &HookLocator) -> String {
        let id = hook.hook_id.to_string();
        self.url(
            &["repos", hook.owner.as_str(), hook.repo.as_str(), "hooks", id.as_str()],
            &[],
        )
    }

    async fn get_branch_commit(&self, owner: &str, repo: &str, branch: &str) -> Result<Commit> {
        let body: Value = self
            .get(self.url(&["repos", owner, repo, "branches", branch], &[]))
            .await?;
        branch_to_commit(body)
    }

    async fn get_tag_commit(&self, owner: &str, repo: &str, tag: &str) -> Result<Commit> {
        let body: Value = self
            .get(self.url(&["repos", owner, repo, "releases", "tags", tag], &[]))
            .await?;
        release_to_commit(body)
    }
}

#[async_trait]
impl GitProvider for GiteeClient {
    fn platform(&self) -> &'static str {
        "gitee"
    }

    async fn list_repos(&self) -> Result<Vec<Repository>> {
        let rows = self
            .get_all_pages(&["user", "repos"], &[("type", "owner".to_string())])
            .await?;
        tracing::debug!(count = rows.len(), "Listed owned repositories");

        rows.into_iter().map(to_repository).collect()
    }

    async fn list_branches(&self, repo: &RepoLocator) -> Result<Vec<Branch>> {
        validate_repo(repo)?;

        let rows = self
            .get_all_pages(
                &["repos", repo.owner.as_str(), repo.repo.as_str(), "branches"],
                &[],
            )
            .await?;
        tracing::debug!(repo = %repo.full_name(), count = rows.len(), "Listed branches");

        rows.into_iter().map(to_branch).collect()
    }

    async fn get_ref_commit(&self, git_ref: &RefLocator) -> Result<Commit> {
        validate_ref(git_ref)?;

        match git_ref.kind() {
            RefKind::Tag(tag) => {
                self.get_tag_commit(&git_ref.owner, &git_ref.repo, &tag)
                    .await
            }
            RefKind::Branch(branch) => {
                self.get_branch_commit(&git_ref.owner, &git_ref.repo, &branch)
                    .await
            }
        }
    }

    async fn list_webhooks(&self, repo: &RepoLocator) -> Result<Vec<Webhook>> {
        validate_repo(repo)?;

        let rows = self
            .get_all_pages(&["repos", repo.owner.as_str(), repo.repo.as_str(), "hooks"], &[])
            .await?;

        rows.into_iter().map(to_webhook).collect()
    }

    async fn get_webhook(&self, hook: &HookLocator) -> Result<Webhook> {
        validate_hook(hook)?;

        let body: Value = self.get(self.hook_url(hook)).await?;
        to_webhook(body)
    }

    async fn create_webhook(
        &self,
        repo: &RepoLocator,
        params: &WebhookParams,
    ) -> Result<CreatedWebhook> {
        validate_repo(repo)?;
        validate_webhook_params(params)?;

        let url = self.url(&["repos", repo.owner.as_str(), repo.repo.as_str(), "hooks"], &[]);
        let response = self
            .send(HttpMethod::Post, url, serde_json::to_vec(params)?)
            .await?;
        let body: Value = serde_json::from_slice(&response.body)?;

        let created = to_created_webhook(body)?;
        tracing::info!(repo = %repo.full_name(), hook_id = created.id, "Created webhook");
        Ok(created)
    }

    async fn update_webhook(&self, hook: &HookLocator, params: &WebhookParams) -> Result<()> {
        validate_hook(hook)?;
        validate_webhook_params(params)?;

        let url = self.hook_url(hook);
        self.send(HttpMethod::Patch, url, serde_json::to_vec(params)?)
            .await?;
        Ok(())
    }

    async fn delete_webhook(&self, hook: &HookLocator) -> Result<()> {
        validate_hook(hook)?;

        let url = self.hook_url(hook);
        self.send(HttpMethod::Delete, url, Vec::new()).await?;
        tracing::info!(hook_id = hook.hook_id, "Deleted webhook");
        Ok(())
    }
}

/// Create a Gitee client for gitee.com (convenience function).
pub fn create_client(token: &str) -> Result<GiteeClient> {
    GiteeClient::new(GITEE_HOST, token)
}
