//! Local git repository initializer.
//!
//! Prepares a working directory for commits made by automation: creates the
//! directory, runs `git init` and writes `user.name` / `user.email` into the
//! repository's local config. All real work is delegated to the `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from preparing a local repository.
#[derive(Debug, Error)]
pub enum GitConfigError {
    /// A required option was missing.
    #[error("Invalid parameter `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Filesystem or process-spawn failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// git ran but exited unsuccessfully.
    #[error("`git {args}` failed: {stderr}")]
    Command { args: String, stderr: String },
}

/// Captured result of one git invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Abstract interface for running git commands.
/// This allows faking the git CLI in tests.
pub trait GitRunner: Send + Sync {
    /// Run git with `args` inside `cwd`.
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput, GitConfigError>;
}

/// Runs the `git` binary found on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliGitRunner;

impl GitRunner for CliGitRunner {
    fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput, GitConfigError> {
        let output = Command::new("git").args(args).current_dir(cwd).output()?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Where to initialize and which identity to configure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitConfigOptions {
    /// Target directory. Defaults to the system temp directory; relative
    /// paths are resolved against the current working directory.
    pub dir: Option<PathBuf>,
    pub name: String,
    pub email: String,
}

impl GitConfigOptions {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            dir: None,
            name: name.into(),
            email: email.into(),
        }
    }

    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }
}

/// Resolve the target directory against `cwd`.
pub fn resolve_dir(dir: Option<&Path>, cwd: &Path) -> PathBuf {
    match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => std::env::temp_dir(),
    }
}

/// Initialize a repository and set its identity using the `git` binary.
///
/// Returns the absolute directory that was initialized.
pub fn init_git_config(options: &GitConfigOptions) -> Result<PathBuf, GitConfigError> {
    init_git_config_with(&CliGitRunner, options)
}

/// Same as [`init_git_config`] with an explicit runner.
pub fn init_git_config_with(
    runner: &dyn GitRunner,
    options: &GitConfigOptions,
) -> Result<PathBuf, GitConfigError> {
    if options.name.trim().is_empty() {
        return Err(GitConfigError::Validation {
            field: "name",
            message: "is required".to_string(),
        });
    }
    if options.email.trim().is_empty() {
        return Err(GitConfigError::Validation {
            field: "email",
            message: "is required".to_string(),
        });
    }

    let cwd = std::env::current_dir()?;
    let dir = resolve_dir(options.dir.as_deref(), &cwd);

    std::fs::create_dir_all(&dir)?;
    tracing::info!(dir = %dir.display(), "Initializing git repository");

    run_checked(runner, &["init"], &dir)?;
    run_checked(runner, &["config", "user.name", &options.name], &dir)?;
    run_checked(runner, &["config", "user.email", &options.email], &dir)?;

    tracing::info!(
        dir = %dir.display(),
        name = %options.name,
        email = %options.email,
        "Configured git identity"
    );
    Ok(dir)
}

fn run_checked(runner: &dyn GitRunner, args: &[&str], cwd: &Path) -> Result<(), GitConfigError> {
    tracing::debug!(args = ?args, cwd = %cwd.display(), "Running git");

    let output = runner.run(args, cwd)?;
    if !output.success {
        return Err(GitConfigError::Command {
            args: args.join(" "),
            stderr: output.stderr,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Records every invocation and answers with a fixed outcome.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(Vec<String>, PathBuf)>>,
        fail_on: Option<&'static str>,
    }

    impl RecordingRunner {
        fn failing_on(arg: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on: Some(arg),
            }
        }

        fn calls(&self) -> Vec<(Vec<String>, PathBuf)> {
            self.calls.lock().expect("runner lock").clone()
        }
    }

    impl GitRunner for RecordingRunner {
        fn run(&self, args: &[&str], cwd: &Path) -> Result<GitOutput, GitConfigError> {
            self.calls.lock().expect("runner lock").push((
                args.iter().map(|a| a.to_string()).collect(),
                cwd.to_path_buf(),
            ));

            let failed = self.fail_on.is_some_and(|arg| args.contains(&arg));
            Ok(GitOutput {
                success: !failed,
                stdout: String::new(),
                stderr: if failed {
                    "fatal: simulated".to_string()
                } else {
                    String::new()
                },
            })
        }
    }

    #[test]
    fn resolve_dir_handles_absolute_relative_and_default() {
        let cwd = Path::new("/work");
        assert_eq!(
            resolve_dir(Some(Path::new("/srv/repo")), cwd),
            PathBuf::from("/srv/repo")
        );
        assert_eq!(
            resolve_dir(Some(Path::new("repo/sub")), cwd),
            PathBuf::from("/work/repo/sub")
        );
        assert_eq!(resolve_dir(None, cwd), std::env::temp_dir());
    }

    #[test]
    fn creates_directory_and_runs_init_then_identity() {
        let temp = tempfile::tempdir().expect("tempdir");
        let target = temp.path().join("nested").join("repo");
        let runner = RecordingRunner::default();

        let options = GitConfigOptions::new("Release Bot", "bot@example.com").with_dir(&target);
        let dir = init_git_config_with(&runner, &options).expect("init should succeed");

        assert_eq!(dir, target);
        assert!(target.is_dir());

        let calls = runner.calls();
        let args: Vec<Vec<String>> = calls.iter().map(|(args, _)| args.clone()).collect();
        assert_eq!(
            args,
            vec![
                vec!["init".to_string()],
                vec![
                    "config".to_string(),
                    "user.name".to_string(),
                    "Release Bot".to_string()
                ],
                vec![
                    "config".to_string(),
                    "user.email".to_string(),
                    "bot@example.com".to_string()
                ],
            ]
        );
        assert!(calls.iter().all(|(_, cwd)| cwd == &target));
    }

    #[test]
    fn stops_at_first_failing_command() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = RecordingRunner::failing_on("user.name");

        let options = GitConfigOptions::new("bot", "bot@example.com").with_dir(temp.path());
        let err = init_git_config_with(&runner, &options).expect_err("config should fail");

        match err {
            GitConfigError::Command { args, stderr } => {
                assert_eq!(args, "config user.name bot");
                assert_eq!(stderr, "fatal: simulated");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(runner.calls().len(), 2);
    }

    #[test]
    fn missing_identity_is_rejected_before_any_git_call() {
        let runner = RecordingRunner::default();

        let err = init_git_config_with(&runner, &GitConfigOptions::new("", "bot@example.com"))
            .expect_err("missing name");
        assert!(matches!(err, GitConfigError::Validation { field: "name", .. }));

        let err = init_git_config_with(&runner, &GitConfigOptions::new("bot", " "))
            .expect_err("missing email");
        assert!(matches!(err, GitConfigError::Validation { field: "email", .. }));

        assert!(runner.calls().is_empty());
    }

    #[test]
    fn real_git_writes_local_identity() {
        if Command::new("git").arg("--version").output().is_err() {
            return;
        }

        let temp = tempfile::tempdir().expect("tempdir");
        let options =
            GitConfigOptions::new("Release Bot", "bot@example.com").with_dir(temp.path());
        let dir = init_git_config(&options).expect("init should succeed");

        assert!(dir.join(".git").is_dir());
        let output = CliGitRunner
            .run(&["config", "--local", "user.email"], &dir)
            .expect("git config should run");
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "bot@example.com");
    }
}
