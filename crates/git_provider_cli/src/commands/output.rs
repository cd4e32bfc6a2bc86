use clap::ValueEnum;
use git_provider::{Branch, Commit, CreatedWebhook, Repository, Webhook};
use serde::Serialize;
use tabled::Tabled;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display the full provider response as JSON
    Json,
}

/// Render `items` either as a rounded table of `R` rows or as JSON of the
/// items themselves (including their raw `source`).
pub(crate) fn render<T, R>(items: &[T], format: OutputFormat) -> serde_json::Result<String>
where
    T: Serialize,
    R: Tabled + for<'a> From<&'a T>,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = items.iter().map(R::from).collect();
            let mut table = tabled::Table::new(rows);
            table.with(tabled::settings::Style::rounded());
            Ok(table.to_string())
        }
        OutputFormat::Json => serde_json::to_string_pretty(items),
    }
}

#[derive(Debug, Clone, Tabled)]
pub(crate) struct RepoRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Full Name")]
    pub full_name: String,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&Repository> for RepoRow {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            full_name: repo.full_name.clone(),
            url: repo.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub(crate) struct BranchRow {
    #[tabled(rename = "Branch")]
    pub name: String,
    #[tabled(rename = "SHA")]
    pub sha: String,
}

impl From<&Branch> for BranchRow {
    fn from(branch: &Branch) -> Self {
        Self {
            name: branch.name.clone(),
            sha: branch.sha.clone(),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub(crate) struct CommitRow {
    #[tabled(rename = "SHA")]
    pub sha: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl From<&Commit> for CommitRow {
    fn from(commit: &Commit) -> Self {
        // Subject line only.
        let message = commit.message.lines().next().unwrap_or_default().to_string();
        Self {
            sha: commit.sha.clone(),
            message,
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub(crate) struct WebhookRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "URL")]
    pub url: String,
}

impl From<&Webhook> for WebhookRow {
    fn from(hook: &Webhook) -> Self {
        Self {
            id: hook.id,
            url: hook.url.clone(),
        }
    }
}

#[derive(Debug, Clone, Tabled)]
pub(crate) struct CreatedWebhookRow {
    #[tabled(rename = "Created Hook ID")]
    pub id: u64,
}

impl From<&CreatedWebhook> for CreatedWebhookRow {
    fn from(hook: &CreatedWebhook) -> Self {
        Self { id: hook.id }
    }
}
