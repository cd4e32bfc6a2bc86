use std::path::PathBuf;

use git_provider::{GitConfigOptions, init_git_config};
use serde_json::json;

use crate::commands::output::OutputFormat;
use crate::config::Config;

/// Merge `init-git` flags with the `[git]` config section.
fn resolve_options(
    dir: Option<PathBuf>,
    name: Option<String>,
    email: Option<String>,
    config: &Config,
) -> Result<GitConfigOptions, Box<dyn std::error::Error>> {
    let name = name
        .or_else(|| config.git.name.clone())
        .ok_or("git user name missing: pass --name or set [git] name in the config file")?;
    let email = email
        .or_else(|| config.git.email.clone())
        .ok_or("git user email missing: pass --email or set [git] email in the config file")?;

    Ok(GitConfigOptions {
        dir: dir.or_else(|| config.git.dir.clone()),
        name,
        email,
    })
}

pub(crate) fn handle_init_git(
    dir: Option<PathBuf>,
    name: Option<String>,
    email: Option<String>,
    config: &Config,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let options = resolve_options(dir, name, email, config)?;
    let dir = init_git_config(&options)?;

    Ok(match format {
        OutputFormat::Table => format!("Initialized git repository in {}", dir.display()),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "dir": dir,
            "name": options.name,
            "email": options.email,
        }))?,
    })
}
