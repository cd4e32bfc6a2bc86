use git_provider::gitee::GiteeClient;
use git_provider::{GitProvider, RefLocator, RepoLocator, WebhookParams};
use serde_json::json;

use crate::commands::output::{
    self, BranchRow, CommitRow, CreatedWebhookRow, OutputFormat, RepoRow, WebhookRow,
};
use crate::config::Config;
use crate::{HookAction, HookParamsArgs};

type CommandResult = Result<String, Box<dyn std::error::Error>>;

/// Build a Gitee client from config, letting explicit flags win.
pub(crate) fn client_from_config(
    config: &Config,
    host: Option<&str>,
    token: Option<&str>,
) -> Result<GiteeClient, Box<dyn std::error::Error>> {
    let host = config.gitee_host(host);
    let token = config.gitee_token(token).ok_or(
        "Gitee token missing: pass --token, set GIT_PROVIDER_GITEE_TOKEN, \
         or add [gitee] token to the config file",
    )?;
    tracing::debug!(host = %host, "Using Gitee host");
    Ok(GiteeClient::new(&host, &token)?)
}

impl From<HookParamsArgs> for WebhookParams {
    fn from(args: HookParamsArgs) -> Self {
        let mut params = WebhookParams::new(args.url);
        params.password = args.password;
        params.push_events = !args.no_push_events;
        params.tag_push_events = args.tag_push_events;
        params.issues_events = args.issues_events;
        params.note_events = args.note_events;
        params.merge_requests_events = args.merge_requests_events;
        params
    }
}

pub(crate) async fn handle_repos(provider: &dyn GitProvider, format: OutputFormat) -> CommandResult {
    let repos = provider.list_repos().await?;
    tracing::info!(count = repos.len(), platform = provider.platform(), "Listed repositories");
    Ok(output::render::<_, RepoRow>(&repos, format)?)
}

pub(crate) async fn handle_branches(
    provider: &dyn GitProvider,
    repo: &RepoLocator,
    format: OutputFormat,
) -> CommandResult {
    let branches = provider.list_branches(repo).await?;
    tracing::info!(count = branches.len(), repo = %repo.full_name(), "Listed branches");
    Ok(output::render::<_, BranchRow>(&branches, format)?)
}

pub(crate) async fn handle_ref_commit(
    provider: &dyn GitProvider,
    git_ref: &RefLocator,
    format: OutputFormat,
) -> CommandResult {
    let commit = provider.get_ref_commit(git_ref).await?;
    Ok(output::render::<_, CommitRow>(&[commit], format)?)
}

pub(crate) async fn handle_hooks(
    provider: &dyn GitProvider,
    action: HookAction,
    format: OutputFormat,
) -> CommandResult {
    match action {
        HookAction::List { repo } => {
            let hooks = provider.list_webhooks(&repo.locator()).await?;
            Ok(output::render::<_, WebhookRow>(&hooks, format)?)
        }
        HookAction::Get { repo, id } => {
            let hook = provider.get_webhook(&repo.hook(id)).await?;
            Ok(output::render::<_, WebhookRow>(&[hook], format)?)
        }
        HookAction::Create { repo, params } => {
            let created = provider
                .create_webhook(&repo.locator(), &params.into())
                .await?;
            Ok(output::render::<_, CreatedWebhookRow>(&[created], format)?)
        }
        HookAction::Update { repo, id, params } => {
            let hook = repo.hook(id);
            provider.update_webhook(&hook, &params.into()).await?;
            Ok(status_message(format, "updated", id, &repo.locator())?)
        }
        HookAction::Delete { repo, id } => {
            provider.delete_webhook(&repo.hook(id)).await?;
            Ok(status_message(format, "deleted", id, &repo.locator())?)
        }
    }
}

fn status_message(
    format: OutputFormat,
    status: &str,
    id: u64,
    repo: &RepoLocator,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(format!("Webhook {id} {status} on {}", repo.full_name())),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "id": id,
            "repository": repo.full_name(),
            "status": status,
        })),
    }
}
