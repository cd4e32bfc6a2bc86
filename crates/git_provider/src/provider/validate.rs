//! Precondition checks, one per operation parameter set.
//!
//! Every provider method runs the matching check before it builds a request.

use super::errors::{ProviderError, Result};
use super::types::{HookLocator, RefLocator, RepoLocator, WebhookParams};

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ProviderError::validation(field, "is required"));
    }
    Ok(())
}

/// `owner` and `repo` must be present.
pub fn validate_repo(repo: &RepoLocator) -> Result<()> {
    require("owner", &repo.owner)?;
    require("repo", &repo.repo)
}

/// `owner`, `repo` and `ref` must be present, and a `refs/tags/` or
/// `refs/heads/` prefix must be followed by a name.
pub fn validate_ref(git_ref: &RefLocator) -> Result<()> {
    require("owner", &git_ref.owner)?;
    require("repo", &git_ref.repo)?;
    require("ref", &git_ref.git_ref)?;
    require("ref", git_ref.kind().name())
}

/// `owner`, `repo` and a non-zero `hook_id`.
pub fn validate_hook(hook: &HookLocator) -> Result<()> {
    require("owner", &hook.owner)?;
    require("repo", &hook.repo)?;
    if hook.hook_id == 0 {
        return Err(ProviderError::validation("hook_id", "must be a positive id"));
    }
    Ok(())
}

/// The callback URL must be an absolute http(s) URL.
pub fn validate_webhook_params(params: &WebhookParams) -> Result<()> {
    require("url", &params.url)?;

    let url = params.url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| ProviderError::validation("url", "must start with http:// or https://"))?;

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    if host.is_empty() || url.contains(char::is_whitespace) {
        return Err(ProviderError::validation("url", "is not a valid URL"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ProviderError) -> &'static str {
        match err {
            ProviderError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn repo_requires_owner_then_repo() {
        assert!(validate_repo(&RepoLocator::new("acme", "widgets")).is_ok());

        let err = validate_repo(&RepoLocator::new("", "")).expect_err("missing both");
        assert_eq!(field_of(err), "owner");

        let err = validate_repo(&RepoLocator::new("acme", "  ")).expect_err("blank repo");
        assert_eq!(field_of(err), "repo");
    }

    #[test]
    fn ref_requires_ref() {
        assert!(validate_ref(&RefLocator::new("acme", "widgets", "main")).is_ok());

        let err = validate_ref(&RefLocator::new("acme", "widgets", "")).expect_err("no ref");
        assert_eq!(field_of(err), "ref");

        let err = validate_ref(&RefLocator::new("acme", "widgets", "refs/tags/"))
            .expect_err("prefix without a name");
        assert_eq!(field_of(err), "ref");
    }

    #[test]
    fn hook_requires_positive_id() {
        assert!(validate_hook(&HookLocator::new("acme", "widgets", 7)).is_ok());

        let err = validate_hook(&HookLocator::new("acme", "widgets", 0)).expect_err("zero id");
        assert_eq!(field_of(err), "hook_id");

        let err = validate_hook(&HookLocator::new("", "widgets", 7)).expect_err("no owner");
        assert_eq!(field_of(err), "owner");
    }

    #[test]
    fn webhook_url_must_be_absolute_http() {
        assert!(validate_webhook_params(&WebhookParams::new("https://ci.example.com/hook")).is_ok());
        assert!(validate_webhook_params(&WebhookParams::new("http://10.0.0.1:8080")).is_ok());

        for bad in ["", "ci.example.com/hook", "ftp://ci.example.com", "https://", "https://a b"] {
            let err = validate_webhook_params(&WebhookParams::new(bad))
                .expect_err("invalid url should be rejected");
            assert_eq!(field_of(err), "url", "input: {bad:?}");
        }
    }

    #[test]
    fn validation_errors_are_flagged_non_retryable() {
        let err = validate_repo(&RepoLocator::new("", "x")).expect_err("missing owner");
        assert!(err.is_validation());
        assert!(err.to_string().contains("owner"));
    }
}
