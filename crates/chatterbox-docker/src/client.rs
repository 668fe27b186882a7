use crate::docker::DockerError;
use crate::executor::{DockerExecutor, RealExecutor};
use chatterbox_core::{BuiltImage, ImageRef};
use std::path::{Path, PathBuf};

/// Docker operations client, parameterized over the executor for testability.
pub struct DockerClient<E: DockerExecutor = RealExecutor> {
    executor: E,
}

impl DockerClient<RealExecutor> {
    pub fn new() -> Self {
        Self {
            executor: RealExecutor,
        }
    }
}

impl Default for DockerClient<RealExecutor> {
    fn default() -> Self {
        Self::new()
    }
}

/// What to do when a build, tag, or push exits non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop and return the error.
    Abort,
    /// Log a warning and carry on with the next step.
    #[default]
    KeepGoing,
}

/// Inputs for one image build.
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    pub repository: &'a str,
    pub latest_tag: &'a str,
    /// Directory holding the Dockerfile.
    pub context: &'a Path,
    /// Unix seconds used for the versioned tag.
    pub timestamp: u64,
}

impl<E: DockerExecutor> DockerClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Preflight ──

    /// Verify the docker daemon answers `docker info`.
    pub async fn check_daemon(&self) -> Result<(), PreflightError> {
        match self.executor.exec(&args(["info"])).await {
            Ok(_) => Ok(()),
            Err(DockerError::NotFound { .. }) => Err(PreflightError::DockerNotInstalled),
            Err(e) => Err(PreflightError::DaemonNotRunning { source: e }),
        }
    }

    // ── Build ──

    /// Build `<repository>:v<timestamp>` from the context directory and tag
    /// the result as `<repository>:<latest_tag>`.
    pub async fn build_image(
        &self,
        request: &BuildRequest<'_>,
        policy: FailurePolicy,
    ) -> Result<BuiltImage, BuildError> {
        if !request.context.is_dir() {
            return Err(BuildError::MissingContext(request.context.to_path_buf()));
        }

        let versioned = ImageRef::timestamped(request.repository, request.timestamp);
        let latest = versioned.retag(request.latest_tag);
        let versioned_str = versioned.to_string();
        let latest_str = latest.to_string();

        tracing::info!(image = %versioned, context = %request.context.display(), "building image");
        let built = self
            .executor
            .exec_streaming(&args(["build", "-t", &versioned_str, "."]), request.context)
            .await
            .map_err(|e| BuildError::Build {
                image: versioned_str.clone(),
                source: e,
            });
        tolerate(built, policy)?;

        tracing::info!(image = %versioned, tag = %latest, "tagging image");
        let tagged = self
            .executor
            .exec_streaming(&args(["tag", &versioned_str, &latest_str]), request.context)
            .await
            .map_err(|e| BuildError::Tag {
                target: latest_str.clone(),
                source: e,
            });
        tolerate(tagged, policy)?;

        Ok(BuiltImage { versioned, latest })
    }

    // ── Registry ──

    pub async fn push(&self, image: &ImageRef, policy: FailurePolicy) -> Result<(), PushError> {
        let image_str = image.to_string();

        tracing::info!(image = %image, "pushing image");
        let pushed = self
            .executor
            .exec_streaming(&args(["push", &image_str]), Path::new("."))
            .await
            .map_err(|e| PushError::Push {
                image: image_str.clone(),
                source: e,
            });
        tolerate(pushed, policy)
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn tolerate<T: std::error::Error>(result: Result<(), T>, policy: FailurePolicy) -> Result<(), T> {
    match (result, policy) {
        (Err(e), FailurePolicy::KeepGoing) => {
            tracing::warn!(error = %e, "step failed, continuing");
            Ok(())
        }
        (result, _) => result,
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("docker CLI not installed: https://docs.docker.com/get-docker/")]
    DockerNotInstalled,

    #[error("Docker is not running. Please start Docker Desktop.")]
    DaemonNotRunning { source: DockerError },
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build context {0} is not a directory")]
    MissingContext(PathBuf),

    #[error("docker build failed for {image}")]
    Build { image: String, source: DockerError },

    #[error("failed to tag image as {target}")]
    Tag { target: String, source: DockerError },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("docker push failed for {image}")]
    Push { image: String, source: DockerError },
}
