//! Configuration file support for git-provider.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags (`--host`, `--token`, `init-git --name/--email/--dir`)
//! 2. Environment variables (prefixed with `GIT_PROVIDER_`, e.g., `GIT_PROVIDER_GITEE_TOKEN`)
//! 3. Config file (./git-provider.toml, then ~/.config/git-provider/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [gitee]
//! host = "https://gitee.com"  # optional, this is the default
//! token = "..."  # or use GIT_PROVIDER_GITEE_TOKEN env var
//!
//! [git]
//! name = "Release Bot"
//! email = "bot@example.com"
//! dir = "/tmp/workspace"
//! ```

use std::path::PathBuf;

use config::builder::{ConfigBuilder, DefaultState};
use config::{Config as Settings, Environment, File, FileFormat};
use directories::ProjectDirs;
use git_provider::gitee::GITEE_HOST;
use serde::Deserialize;

const APP_NAME: &str = "git-provider";
const ENV_PREFIX: &str = "GIT_PROVIDER";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gitee connection settings.
    pub gitee: GiteeConfig,
    /// Identity used by `init-git`.
    pub git: GitIdentityConfig,
}

/// Gitee configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GiteeConfig {
    /// Gitee host URL (e.g., "https://gitee.com" or a private deployment).
    /// Can also be set via GIT_PROVIDER_GITEE_HOST environment variable.
    pub host: Option<String>,
    /// Personal access token.
    /// Can also be set via GIT_PROVIDER_GITEE_TOKEN environment variable.
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitIdentityConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub dir: Option<PathBuf>,
}

/// `GIT_PROVIDER_*` variables, e.g. `GIT_PROVIDER_GITEE_TOKEN` -> `gitee.token`.
///
/// Values stay strings: tokens and identities may look numeric.
fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("_")
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/git-provider/config.toml)
    /// 3. Local config file (./git-provider.toml)
    /// 4. Environment variables with GIT_PROVIDER_ prefix
    pub fn load() -> Self {
        let mut builder = Settings::builder();

        if let Some(xdg_config) = Self::default_config_path()
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(
                File::from(xdg_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("git-provider.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./git-provider.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        builder = builder.add_source(env_source());

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Self {
        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Gitee host, with an explicit override taking precedence.
    pub fn gitee_host(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.gitee.host.clone())
            .unwrap_or_else(|| GITEE_HOST.to_string())
    }

    /// Gitee token, with an explicit override taking precedence.
    pub fn gitee_token(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string).or_else(|| self.gitee.token.clone())
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_content: &str) -> Config {
        Settings::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.gitee.host.is_none());
        assert!(config.gitee.token.is_none());
        assert!(config.git.name.is_none());
        assert!(config.git.email.is_none());
        assert!(config.git.dir.is_none());
    }

    fn from_env(vars: &[(&str, &str)]) -> Config {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_builder(Settings::builder().add_source(env_source().source(Some(vars))))
    }

    #[test]
    fn test_env_values_keep_leading_zeros() {
        let config = from_env(&[
            ("GIT_PROVIDER_GITEE_TOKEN", "00123"),
            ("GIT_PROVIDER_GIT_NAME", "007"),
            ("GIT_PROVIDER_GIT_EMAIL", "0042"),
        ]);

        assert_eq!(config.gitee.token, Some("00123".to_string()));
        assert_eq!(config.git.name, Some("007".to_string()));
        assert_eq!(config.git.email, Some("0042".to_string()));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let builder = Settings::builder()
            .add_source(config::File::from_str(
                r#"
                [gitee]
                host = "https://gitee.example.com"
                token = "from_file"
            "#,
                FileFormat::Toml,
            ))
            .add_source(env_source().source(Some(
                [("GIT_PROVIDER_GITEE_TOKEN".to_string(), "from_env".to_string())]
                    .into_iter()
                    .collect(),
            )));
        let config = Config::from_builder(builder);

        assert_eq!(config.gitee.token, Some("from_env".to_string()));
        assert_eq!(
            config.gitee.host,
            Some("https://gitee.example.com".to_string())
        );
    }

    #[test]
    fn test_unrelated_env_vars_are_ignored() {
        let config = from_env(&[("HOME", "/root"), ("GITEE_TOKEN", "nope")]);
        assert!(config.gitee.token.is_none());
    }

    #[test]
    fn test_gitee_host_default() {
        let config = Config::default();
        assert_eq!(config.gitee_host(None), "https://gitee.com");
    }

    #[test]
    fn test_full_config_parsing() {
        let config = parse(
            r#"
            [gitee]
            host = "https://gitee.example.com"
            token = "gitee_token"

            [git]
            name = "Release Bot"
            email = "bot@example.com"
            dir = "/tmp/workspace"
        "#,
        );

        assert_eq!(
            config.gitee.host,
            Some("https://gitee.example.com".to_string())
        );
        assert_eq!(config.gitee.token, Some("gitee_token".to_string()));
        assert_eq!(config.git.name, Some("Release Bot".to_string()));
        assert_eq!(config.git.email, Some("bot@example.com".to_string()));
        assert_eq!(config.git.dir, Some(PathBuf::from("/tmp/workspace")));
    }

    #[test]
    fn test_partial_config_leaves_other_sections_default() {
        let config = parse(
            r#"
            [gitee]
            token = "only_token"
        "#,
        );

        assert_eq!(config.gitee.token, Some("only_token".to_string()));
        assert!(config.gitee.host.is_none());
        assert!(config.git.name.is_none());
    }

    #[test]
    fn test_flags_override_config_values() {
        let config = parse(
            r#"
            [gitee]
            host = "https://gitee.example.com"
            token = "from_file"
        "#,
        );

        assert_eq!(config.gitee_token(None), Some("from_file".to_string()));
        assert_eq!(
            config.gitee_token(Some("from_flag")),
            Some("from_flag".to_string())
        );
        assert_eq!(config.gitee_host(None), "https://gitee.example.com");
        assert_eq!(
            config.gitee_host(Some("https://other.example.com")),
            "https://other.example.com"
        );
    }

    #[test]
    fn test_config_merging_order() {
        let base_toml = r#"
            [gitee]
            host = "https://gitee.com"
            token = "base"
        "#;

        let override_toml = r#"
            [gitee]
            token = "override"
        "#;

        let settings = Settings::builder()
            .add_source(config::File::from_str(base_toml, FileFormat::Toml))
            .add_source(config::File::from_str(override_toml, FileFormat::Toml))
            .build()
            .unwrap();

        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.gitee.token, Some("override".to_string()));
        assert_eq!(config.gitee.host, Some("https://gitee.com".to_string()));
    }

    #[test]
    fn test_config_invalid_toml() {
        let invalid_toml = r#"
            [gitee
            token = "x"
        "#;

        let result = Settings::builder()
            .add_source(config::File::from_str(invalid_toml, FileFormat::Toml))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_fields_ignored() {
        let config = parse(
            r#"
            [gitee]
            token = "t"
            unknown_field = "should be ignored"

            [other]
            value = 1
        "#,
        );
        assert_eq!(config.gitee.token, Some("t".to_string()));
    }

    #[test]
    fn test_default_config_path_mentions_app_name() {
        if let Some(path) = Config::default_config_path() {
            assert!(path.to_string_lossy().contains("git-provider"));
            assert!(path.ends_with("config.toml"));
        }
    }
}
