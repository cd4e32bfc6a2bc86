//! git-provider CLI - command-line front end for Git hosting platform APIs.

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::Term;
use git_provider::gitee::GiteeClient;
use git_provider::{HookLocator, RefLocator, RepoLocator};
use tracing_subscriber::EnvFilter;

use crate::commands::output::OutputFormat;

#[derive(Parser)]
#[command(name = "git-provider")]
#[command(version)]
#[command(about = "Query and manage repositories on Git hosting platforms")]
#[command(
    long_about = "git-provider talks to a Git hosting platform's REST API (Gitee API v5) to \
list repositories and branches, resolve refs to commits and manage repository webhooks. \
It can also prepare a local git working directory with a configured identity."
)]
#[command(after_long_help = r#"EXAMPLES
    List your repositories:
        $ git-provider repos

    List branches as JSON (including the raw API response):
        $ git-provider --output json branches acme widgets

    Resolve a tag to its commit:
        $ git-provider ref-commit acme widgets refs/tags/v1.0

    Register a push webhook:
        $ git-provider hooks create acme widgets --url https://ci.example.com/hook

    Prepare a working directory for automated commits:
        $ git-provider init-git --dir ./work --name "Release Bot" --email bot@example.com

CONFIGURATION
    git-provider reads configuration from:
      1. ~/.config/git-provider/config.toml (or $XDG_CONFIG_HOME/git-provider/config.toml)
      2. ./git-provider.toml
      3. Environment variables (GIT_PROVIDER_* prefix, e.g., GIT_PROVIDER_GITEE_TOKEN)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    GIT_PROVIDER_GITEE_TOKEN    Gitee personal access token
    GIT_PROVIDER_GITEE_HOST     Gitee host (default: https://gitee.com)
    GIT_PROVIDER_GIT_NAME       Default user.name for init-git
    GIT_PROVIDER_GIT_EMAIL      Default user.email for init-git
    RUST_LOG                    Log filter (default: git_provider=info,git_provider_cli=info)
"#)]
struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    output: OutputFormat,

    /// Log at debug level (request URLs, pages fetched)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for the configured connection.
#[derive(Debug, Clone, clap::Args)]
struct ConnectionArgs {
    /// Gitee host URL (default: https://gitee.com, or from config/env)
    #[arg(short = 'H', long, global = true)]
    host: Option<String>,

    /// Personal access token (default: from config/env)
    #[arg(short, long, global = true)]
    token: Option<String>,
}

impl ConnectionArgs {
    fn client(&self, config: &config::Config) -> Result<GiteeClient, Box<dyn std::error::Error>> {
        commands::provider::client_from_config(config, self.host.as_deref(), self.token.as_deref())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List repositories owned by the authenticated user
    Repos,
    /// List all branches of a repository
    Branches {
        #[command(flatten)]
        repo: RepoArgs,
    },
    /// Resolve a branch or tag ref to its commit
    ///
    /// `refs/tags/<name>` resolves through the tag's release; anything else
    /// (`refs/heads/<name>` or a bare name) is treated as a branch.
    RefCommit {
        #[command(flatten)]
        repo: RepoArgs,

        /// Ref to resolve, e.g. refs/heads/main, refs/tags/v1.0 or main
        git_ref: String,
    },
    /// Manage repository webhooks
    Hooks {
        #[command(subcommand)]
        action: HookAction,
    },
    /// Initialize a local git repository with a user identity
    InitGit {
        /// Target directory (default: from config, else the system temp directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// user.name to configure (default: from config)
        #[arg(short, long)]
        name: Option<String>,

        /// user.email to configure (default: from config)
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Generate man page(s)
    Man {
        /// Output directory for man pages (prints to stdout if not specified)
        #[arg(short = 'O', long = "out-dir")]
        out_dir: Option<PathBuf>,
    },
}

/// Owner and name of a repository.
#[derive(Debug, Clone, clap::Args)]
struct RepoArgs {
    /// Repository owner (user or organization path)
    owner: String,
    /// Repository path
    repo: String,
}

impl RepoArgs {
    fn locator(&self) -> RepoLocator {
        RepoLocator::new(&self.owner, &self.repo)
    }

    fn git_ref(&self, git_ref: &str) -> RefLocator {
        RefLocator::new(&self.owner, &self.repo, git_ref)
    }

    fn hook(&self, id: u64) -> HookLocator {
        HookLocator::new(&self.owner, &self.repo, id)
    }
}

#[derive(Subcommand)]
enum HookAction {
    /// List all webhooks of a repository
    List {
        #[command(flatten)]
        repo: RepoArgs,
    },
    /// Show a single webhook
    Get {
        #[command(flatten)]
        repo: RepoArgs,
        /// Webhook ID
        id: u64,
    },
    /// Create a webhook
    Create {
        #[command(flatten)]
        repo: RepoArgs,
        #[command(flatten)]
        params: HookParamsArgs,
    },
    /// Replace a webhook's URL, password and events
    Update {
        #[command(flatten)]
        repo: RepoArgs,
        /// Webhook ID
        id: u64,
        #[command(flatten)]
        params: HookParamsArgs,
    },
    /// Delete a webhook
    Delete {
        #[command(flatten)]
        repo: RepoArgs,
        /// Webhook ID
        id: u64,
    },
}

/// Webhook settings sent on create and update.
#[derive(Debug, Clone, clap::Args)]
struct HookParamsArgs {
    /// Callback URL (http or https)
    #[arg(short, long)]
    url: String,

    /// Password the platform sends with each delivery
    #[arg(short, long)]
    password: Option<String>,

    /// Don't fire on pushes (push events are on by default)
    #[arg(long)]
    no_push_events: bool,

    /// Fire on tag pushes
    #[arg(long)]
    tag_push_events: bool,

    /// Fire on issue events
    #[arg(long)]
    issues_events: bool,

    /// Fire on comments
    #[arg(long)]
    note_events: bool,

    /// Fire on pull request events
    #[arg(long)]
    merge_requests_events: bool,
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("git_provider=debug,git_provider_cli=debug")
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::new("git_provider=info,git_provider_cli=info"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one parsed command. Returns the text to print, if any.
async fn run(
    cli: Cli,
    config: &config::Config,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let format = cli.output;
    let connection = cli.connection;

    let out = match cli.command {
        Commands::Repos => {
            let client = connection.client(config)?;
            commands::provider::handle_repos(&client, format).await?
        }
        Commands::Branches { repo } => {
            let client = connection.client(config)?;
            commands::provider::handle_branches(&client, &repo.locator(), format).await?
        }
        Commands::RefCommit { repo, git_ref } => {
            let client = connection.client(config)?;
            commands::provider::handle_ref_commit(&client, &repo.git_ref(&git_ref), format).await?
        }
        Commands::Hooks { action } => {
            let client = connection.client(config)?;
            commands::provider::handle_hooks(&client, action, format).await?
        }
        Commands::InitGit { dir, name, email } => {
            commands::init_git::handle_init_git(dir, name, email, config, format)?
        }
        Commands::Completions { shell } => {
            commands::meta::handle_completions(shell)?;
            return Ok(None);
        }
        Commands::Man { out_dir } => {
            commands::meta::handle_man(out_dir)?;
            return Ok(None);
        }
    };

    Ok(Some(out))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Structured logging when piped, or always with --verbose
    if cli.verbose || !Term::stdout().is_term() {
        init_tracing(cli.verbose);
    }

    // Load configuration (config file -> env vars -> defaults)
    let config = config::Config::load();

    if let Some(out) = run(cli, &config).await? {
        println!("{out}");
    }
    Ok(())
}
