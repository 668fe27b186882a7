use std::path::PathBuf;
use std::process::Stdio;

/// A fully resolved foreground command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    /// Applied on top of the inherited environment.
    pub envs: Vec<(String, String)>,
}

/// Abstraction over child process execution for testability.
///
/// Production code uses [`RealRunner`], tests use mockall-generated mocks.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner: Send + Sync {
    /// Run to completion with inherited stdio.
    ///
    /// Returns the exit code, or `None` when the child was killed by a signal.
    async fn run(&self, command: &LaunchCommand) -> Result<Option<i32>, RunError>;
}

pub struct RealRunner;

impl ProcessRunner for RealRunner {
    async fn run(&self, command: &LaunchCommand) -> Result<Option<i32>, RunError> {
        tracing::debug!(
            program = %command.program.display(),
            args = ?command.args,
            cwd = %command.cwd.display(),
            "spawning dev server",
        );

        let status = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .envs(command.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| RunError::Spawn {
                program: command.program.clone(),
                source: e,
            })?;

        Ok(status.code())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to start {program}")]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },
}
