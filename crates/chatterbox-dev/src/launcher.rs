use std::fmt;
use std::path::{Path, PathBuf};

use chatterbox_core::{DevConfig, EnvFileError, Environment};

use crate::runner::{LaunchCommand, ProcessRunner, RealRunner, RunError};

const MAVEN_HOME_VAR: &str = "MAVEN_HOME";
const ENV_FILE: &str = ".env";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DevServer {
    /// Spring Boot backend, started through Maven.
    Api,
    /// Quarkus email service in dev mode.
    Email,
}

impl fmt::Display for DevServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api => f.write_str("api server"),
            Self::Email => f.write_str("email service"),
        }
    }
}

/// Runs dev servers, parameterized over the process runner for testability.
pub struct Launcher<R: ProcessRunner = RealRunner> {
    runner: R,
}

impl Launcher<RealRunner> {
    pub fn new() -> Self {
        Self { runner: RealRunner }
    }
}

impl Default for Launcher<RealRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Launcher<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Load the service env file, then run the server in the foreground.
    ///
    /// Returns the child's exit code (`None` if it was killed by a signal).
    pub async fn launch(
        &self,
        server: DevServer,
        config: &DevConfig,
        project_dir: &Path,
        env: &mut Environment,
    ) -> Result<Option<i32>, LaunchError> {
        let command = prepare(server, config, project_dir, env)?;

        tracing::info!(
            %server,
            program = %command.program.display(),
            args = ?command.args,
            "starting dev server",
        );
        let code = self.runner.run(&command).await?;
        tracing::info!(%server, ?code, "dev server exited");

        Ok(code)
    }
}

/// Resolve the command for `server`, loading its `.env` into `env` first.
pub fn prepare(
    server: DevServer,
    config: &DevConfig,
    project_dir: &Path,
    env: &mut Environment,
) -> Result<LaunchCommand, LaunchError> {
    let service_dir = match server {
        DevServer::Api => project_dir.join(&config.server.dir),
        DevServer::Email => project_dir.join(&config.email.dir),
    };

    env.load_file(&service_dir.join(ENV_FILE))?;

    let (program, args) = match server {
        DevServer::Api => (maven_executable(env)?, vec![config.server.goal.clone()]),
        DevServer::Email => (
            quarkus_executable(),
            vec![
                "dev".to_owned(),
                format!("-Dquarkus.http.port={}", config.email.port),
            ],
        ),
    };

    Ok(LaunchCommand {
        program,
        args,
        cwd: service_dir,
        envs: env
            .loaded()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect(),
    })
}

/// `$MAVEN_HOME/bin/mvn` (`mvn.cmd` on Windows).
pub fn maven_executable(env: &Environment) -> Result<PathBuf, LaunchError> {
    let home = env
        .get(MAVEN_HOME_VAR)
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| LaunchError::MissingEnvVar(MAVEN_HOME_VAR.to_owned()))?;

    let binary = if cfg!(windows) { "mvn.cmd" } else { "mvn" };
    Ok(Path::new(&home).join("bin").join(binary))
}

/// `quarkus` from `PATH` (`quarkus.cmd` on Windows).
pub fn quarkus_executable() -> PathBuf {
    PathBuf::from(if cfg!(windows) { "quarkus.cmd" } else { "quarkus" })
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to load service environment")]
    EnvFile(#[from] EnvFileError),

    #[error("{0} environment variable is not set")]
    MissingEnvVar(String),

    #[error(transparent)]
    Run(#[from] RunError),
}
